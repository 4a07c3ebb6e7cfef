//! Segment queries against an obstacle field
//!
//! Composes the quadtree broadphase with the SAT narrow-phase into
//! ray-cast and line-of-sight queries, including the padding-aware
//! "fat ray" test used by the graph builder.

use tracing::trace;

use crate::collision::quadtree::QuadTree;
use crate::collision::sat::shapes_intersect;
use crate::decoder::Obstacle;
use crate::errors::NavgraphResult;
use crate::geometry::{Line, Rect, Vec2};

/// One broadphase query as it happened: the cast segment and the candidate
/// obstacle indices the index returned. Diagnostic only; never feeds back
/// into query results.
#[derive(Debug, Clone)]
pub struct BroadphaseRecord {
    pub segment: (Vec2, Vec2),
    pub candidates: Vec<usize>,
}

/// An immutable obstacle set with a broadphase index over it.
#[derive(Debug)]
pub struct CollisionField {
    obstacles: Vec<Rect>,
    index: QuadTree,
    broadphase_log: Vec<BroadphaseRecord>,
}

impl CollisionField {
    pub fn new(obstacles: &[Obstacle]) -> Self {
        let obstacles: Vec<Rect> = obstacles.iter().map(Rect::from).collect();

        let root_bounds = obstacles
            .iter()
            .fold(Rect::default(), |bounds, o| bounds.union(o));
        let mut index = QuadTree::new(root_bounds);
        for (i, obstacle) in obstacles.iter().enumerate() {
            index.insert(i, obstacle.clone());
        }

        Self {
            obstacles,
            index,
            broadphase_log: Vec::new(),
        }
    }

    pub fn obstacle(&self, index: usize) -> Option<&Rect> {
        self.obstacles.get(index)
    }

    /// Indices of every obstacle the segment truly intersects, empty if none.
    ///
    /// Broadphase candidates are confirmed with a fast AABB overlap pre-check
    /// and then the full SAT test.
    pub fn ray_cast(&mut self, line: &Line) -> Vec<usize> {
        let candidates = self.index.retrieve(line.bounds());
        trace!(candidates = candidates.len(), "broadphase retrieve");

        let mut hits = Vec::new();
        for &i in &candidates {
            let obstacle = &self.obstacles[i];
            if line.bounds().overlaps(obstacle) && shapes_intersect(line, obstacle) {
                hits.push(i);
            }
        }

        self.broadphase_log.push(BroadphaseRecord {
            segment: line.endpoints(),
            candidates,
        });

        hits
    }

    /// True iff the segment touches no obstacle.
    pub fn has_los(&mut self, line: &Line) -> bool {
        self.ray_cast(line).is_empty()
    }

    /// Line of sight for an agent of clearance radius `padding`.
    ///
    /// With zero padding this is a plain [`has_los`](Self::has_los) on the
    /// direct segment. Otherwise the direct segment and four parallel copies,
    /// translated by every `(±padding, ±padding)` combination, must all be
    /// clear. This approximates disk clearance without Minkowski-sum
    /// geometry; diagonal clearance at corners is not exactly checked, so the
    /// test is slightly optimistic there.
    ///
    /// Fails with `DegenerateGeometry` when the endpoints coincide.
    pub fn has_free_los(&mut self, segment: (Vec2, Vec2), padding: f32) -> NavgraphResult<bool> {
        let (p1, p2) = segment;

        if !self.has_los(&Line::new(p1, p2)?) {
            return Ok(false);
        }

        if padding > 0.0 {
            let offsets = [
                Vec2::new(padding, padding),
                Vec2::new(-padding, padding),
                Vec2::new(-padding, -padding),
                Vec2::new(padding, -padding),
            ];
            for offset in offsets {
                if !self.has_los(&Line::new(p1 + offset, p2 + offset)?) {
                    return Ok(false);
                }
            }
        }

        Ok(true)
    }

    /// Broadphase queries recorded over this field's lifetime.
    pub fn broadphase_log(&self) -> &[BroadphaseRecord] {
        &self.broadphase_log
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obstacle(x: f32, y: f32, width: f32, height: f32) -> Obstacle {
        Obstacle {
            x,
            y,
            width,
            height,
        }
    }

    fn single_block_field() -> CollisionField {
        CollisionField::new(&[obstacle(0.0, 0.0, 10.0, 10.0)])
    }

    #[test]
    fn test_ray_cast_hit() {
        let mut field = single_block_field();
        let line = Line::new(Vec2::new(-5.0, 5.0), Vec2::new(15.0, 5.0)).unwrap();
        assert_eq!(field.ray_cast(&line), vec![0]);
    }

    #[test]
    fn test_ray_cast_miss() {
        let mut field = single_block_field();
        let line = Line::new(Vec2::new(-5.0, 20.0), Vec2::new(15.0, 20.0)).unwrap();
        assert!(field.ray_cast(&line).is_empty());
        assert!(field.has_los(&line));
    }

    #[test]
    fn test_free_los_without_padding() {
        let mut field = single_block_field();

        // clear segment far from the obstacle
        assert!(field
            .has_free_los((Vec2::new(0.0, 30.0), Vec2::new(50.0, 30.0)), 0.0)
            .unwrap());

        // obstacle squarely on the segment
        assert!(!field
            .has_free_los((Vec2::new(-5.0, 5.0), Vec2::new(15.0, 5.0)), 0.0)
            .unwrap());
    }

    #[test]
    fn test_padding_rejects_near_miss() {
        let mut field = single_block_field();
        // clears the obstacle's bottom edge (y = 10) by 2 units
        let segment = (Vec2::new(-5.0, 12.0), Vec2::new(15.0, 12.0));

        assert!(field.has_free_los(segment, 0.0).unwrap());
        assert!(!field.has_free_los(segment, 5.0).unwrap());
    }

    #[test]
    fn test_padding_passes_with_enough_clearance() {
        let mut field = single_block_field();
        let segment = (Vec2::new(-5.0, 20.0), Vec2::new(15.0, 20.0));
        assert!(field.has_free_los(segment, 5.0).unwrap());
    }

    #[test]
    fn test_degenerate_segment_is_an_error() {
        let mut field = single_block_field();
        let p = Vec2::new(30.0, 30.0);
        assert!(field.has_free_los((p, p), 0.0).is_err());
    }

    #[test]
    fn test_broadphase_log_records_queries() {
        let mut field = single_block_field();
        let line = Line::new(Vec2::new(-5.0, 5.0), Vec2::new(15.0, 5.0)).unwrap();
        field.ray_cast(&line);
        field.ray_cast(&line);

        let log = field.broadphase_log();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].segment, (Vec2::new(-5.0, 5.0), Vec2::new(15.0, 5.0)));
    }

    #[test]
    fn test_log_does_not_affect_results() {
        let mut a = single_block_field();
        let mut b = single_block_field();
        let miss = Line::new(Vec2::new(-5.0, 20.0), Vec2::new(15.0, 20.0)).unwrap();
        let hit = Line::new(Vec2::new(5.0, -5.0), Vec2::new(5.0, 15.0)).unwrap();

        // b has seen queries before; results must match a fresh field
        b.ray_cast(&miss);
        b.ray_cast(&hit);
        assert_eq!(a.ray_cast(&hit), b.ray_cast(&hit));
        assert_eq!(a.ray_cast(&miss), b.ray_cast(&miss));
    }
}
