//! Visibility graph construction
//!
//! Turns one source's obstacle list, map bounds, and agent padding into
//! `{obstacles, nodes, edges}`: obstacle corners (padding-inflated and
//! bounds-clipped) become nodes, and every node pair within the distance
//! cutoff that survives the padded line-of-sight test becomes a weighted
//! edge.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::collision::CollisionField;
use crate::config::DEFAULT_DISTANCE_CUTOFF;
use crate::decoder::Obstacle;
use crate::errors::NavgraphResult;
use crate::geometry::{Rect, Vec2};

/// A traversable straight segment and its Euclidean length as weight.
/// Serializes as `[[x1, y1], [x2, y2], weight]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge(pub Vec2, pub Vec2, pub f32);

/// The graph built from a single source, rebuilt wholesale whenever the
/// source set is dirty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceGraph {
    pub obstacles: Vec<Obstacle>,
    pub nodes: Vec<Vec2>,
    pub edges: Vec<Edge>,
}

/// Builds visibility graphs for a fixed padding and distance cutoff.
#[derive(Debug, Clone)]
pub struct GraphBuilder {
    padding: f32,
    distance_cutoff: f32,
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new(0.0, DEFAULT_DISTANCE_CUTOFF)
    }
}

impl GraphBuilder {
    pub fn new(padding: f32, distance_cutoff: f32) -> Self {
        Self {
            padding,
            distance_cutoff,
        }
    }

    /// Build the graph for one source.
    ///
    /// Node and edge order is deterministic for fixed input: obstacles are
    /// walked in sequence and pairs in index order, so repeated builds yield
    /// identical serialized output.
    pub fn build(&self, obstacles: &[Obstacle], bounds: &Rect) -> NavgraphResult<SourceGraph> {
        let nodes = self.collect_nodes(obstacles, bounds);

        // LOS runs against the unpadded obstacles; the padding tolerance is
        // applied per query by the fat-ray test.
        let mut field = CollisionField::new(obstacles);

        let mut edges = Vec::new();
        for i in 0..nodes.len() {
            for j in (i + 1)..nodes.len() {
                let (a, b) = (nodes[i], nodes[j]);
                let distance = a.distance(b);

                // coincident duplicate corners from adjacent obstacles carry
                // no traversable segment
                if distance <= 0.0 || distance >= self.distance_cutoff {
                    continue;
                }

                if field.has_free_los((a, b), self.padding)? {
                    edges.push(Edge(a, b, distance));
                }
            }
        }

        debug!(
            obstacles = obstacles.len(),
            nodes = nodes.len(),
            edges = edges.len(),
            "visibility graph built"
        );

        Ok(SourceGraph {
            obstacles: obstacles.to_vec(),
            nodes,
            edges,
        })
    }

    /// Candidate nodes: each obstacle's four corners, inflated by the
    /// padding radius and clipped to the map bounds. Duplicates across
    /// adjacent obstacles are kept.
    fn collect_nodes(&self, obstacles: &[Obstacle], bounds: &Rect) -> Vec<Vec2> {
        let mut nodes = Vec::with_capacity(obstacles.len() * 4);

        for o in obstacles {
            let rect = if self.padding > 0.0 {
                Rect::new(
                    o.x - self.padding,
                    o.y - self.padding,
                    o.width + 2.0 * self.padding,
                    o.height + 2.0 * self.padding,
                )
                .intersect(bounds)
            } else {
                Rect::from(o)
            };
            nodes.extend_from_slice(rect.corners());
        }

        nodes
    }
}
