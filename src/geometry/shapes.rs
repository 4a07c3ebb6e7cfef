//! Convex shape descriptions consumed by the SAT narrow-phase

use crate::errors::{NavgraphError, NavgraphResult};
use crate::geometry::Vec2;

/// Capability shared by everything the narrow-phase can test: an ordered
/// vertex sequence plus one outward unit normal per edge.
///
/// All coordinates are absolute map coordinates; the collision engine never
/// translates shapes relative to each other.
pub trait Shape {
    fn points(&self) -> &[Vec2];
    fn normals(&self) -> &[Vec2];
}

/// A 2-point segment with a single edge normal, usable directly as a SAT
/// shape for ray casts.
#[derive(Debug, Clone)]
pub struct Line {
    points: [Vec2; 2],
    normals: [Vec2; 1],
    bounds: Rect,
}

impl Line {
    /// Build a segment between two points.
    ///
    /// Fails with [`NavgraphError::DegenerateGeometry`] when the endpoints
    /// coincide: a zero-length edge has no defined normal.
    pub fn new(p1: Vec2, p2: Vec2) -> NavgraphResult<Self> {
        let normal = (p2 - p1)
            .perp()
            .normalize()
            .ok_or_else(|| NavgraphError::DegenerateGeometry {
                reason: format!("zero-length segment at ({}, {})", p1.x, p1.y),
            })?;

        Ok(Self {
            points: [p1, p2],
            normals: [normal],
            bounds: Rect::from_corners(p1, p2),
        })
    }

    /// Axis-aligned bounding rect over both endpoints, the broadphase query
    /// key for ray casts.
    pub fn bounds(&self) -> &Rect {
        &self.bounds
    }

    pub fn endpoints(&self) -> (Vec2, Vec2) {
        (self.points[0], self.points[1])
    }
}

impl Shape for Line {
    fn points(&self) -> &[Vec2] {
        &self.points
    }

    fn normals(&self) -> &[Vec2] {
        &self.normals
    }
}

// Outward unit normals for the corner ordering below (y grows downward):
// top, right, bottom, left.
const EDGE_NORMALS: [Vec2; 4] = [
    Vec2 { x: 0.0, y: -1.0 },
    Vec2 { x: 1.0, y: 0.0 },
    Vec2 { x: 0.0, y: 1.0 },
    Vec2 { x: -1.0, y: 0.0 },
];

/// An axis-aligned rectangle with its four corner points materialized.
#[derive(Debug, Clone, PartialEq)]
pub struct Rect {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    points: [Vec2; 4],
}

impl Default for Rect {
    fn default() -> Self {
        Rect::new(0.0, 0.0, 0.0, 0.0)
    }
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        let points = [
            Vec2::new(x, y),
            Vec2::new(x + width, y),
            Vec2::new(x + width, y + height),
            Vec2::new(x, y + height),
        ];

        Self {
            x,
            y,
            width,
            height,
            points,
        }
    }

    /// Build the rect spanning two opposite corners, in either order.
    pub fn from_corners(p1: Vec2, p2: Vec2) -> Self {
        let delta = (p2 - p1).abs();
        Rect::new(p1.x.min(p2.x), p1.y.min(p2.y), delta.x, delta.y)
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Corner points in clockwise order starting at `(x, y)`.
    pub fn corners(&self) -> &[Vec2; 4] {
        &self.points
    }

    /// Open-interval AABB overlap test: rects that merely touch along an
    /// edge do NOT overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Smallest rect containing both `self` and `other`.
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.left().min(other.left());
        let y = self.top().min(other.top());
        let width = self.right().max(other.right()) - x;
        let height = self.bottom().max(other.bottom()) - y;

        Rect::new(x, y, width, height)
    }

    /// Largest rect contained in both `self` and `other`. When `self` already
    /// lies fully inside `other` the result equals `self`; callers may rely
    /// on containment equality only, not on instance identity.
    pub fn intersect(&self, other: &Rect) -> Rect {
        if self.top() >= other.top()
            && self.right() <= other.right()
            && self.bottom() <= other.bottom()
            && self.left() >= other.left()
        {
            return self.clone();
        }

        let x = self.left().max(other.left());
        let y = self.top().max(other.top());
        let width = self.right().min(other.right()) - x;
        let height = self.bottom().min(other.bottom()) - y;

        Rect::new(x, y, width, height)
    }
}

impl Shape for Rect {
    fn points(&self) -> &[Vec2] {
        &self.points
    }

    fn normals(&self) -> &[Vec2] {
        &EDGE_NORMALS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_corner_points() {
        let rect = Rect::new(1.0, 2.0, 10.0, 20.0);
        assert_eq!(
            rect.corners(),
            &[
                Vec2::new(1.0, 2.0),
                Vec2::new(11.0, 2.0),
                Vec2::new(11.0, 22.0),
                Vec2::new(1.0, 22.0),
            ]
        );
        assert_eq!(rect.left(), 1.0);
        assert_eq!(rect.right(), 11.0);
        assert_eq!(rect.top(), 2.0);
        assert_eq!(rect.bottom(), 22.0);
    }

    #[test]
    fn test_rect_normals_are_outward_units() {
        let rect = Rect::new(0.0, 0.0, 4.0, 4.0);
        for normal in rect.normals() {
            assert_eq!(normal.length(), 1.0);
        }
        assert_eq!(rect.normals()[0], Vec2::new(0.0, -1.0));
        assert_eq!(rect.normals()[2], Vec2::new(0.0, 1.0));
    }

    #[test]
    fn test_from_corners_any_order() {
        let a = Rect::from_corners(Vec2::new(5.0, 1.0), Vec2::new(1.0, 4.0));
        let b = Rect::from_corners(Vec2::new(1.0, 4.0), Vec2::new(5.0, 1.0));
        assert_eq!(a, b);
        assert_eq!(a, Rect::new(1.0, 1.0, 4.0, 3.0));
    }

    #[test]
    fn test_overlaps_is_symmetric() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        let c = Rect::new(50.0, 50.0, 5.0, 5.0);

        assert_eq!(a.overlaps(&b), b.overlaps(&a));
        assert!(a.overlaps(&b));
        assert_eq!(a.overlaps(&c), c.overlaps(&a));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let shifted = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&shifted));
        assert!(!shifted.overlaps(&a));
    }

    #[test]
    fn test_union_contains_both() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(20.0, 5.0, 10.0, 10.0);
        let u = a.union(&b);

        assert!(u.overlaps(&a));
        assert!(u.overlaps(&b));
        assert!(u.left() <= a.left() && u.left() <= b.left());
        assert!(u.right() >= a.right() && u.right() >= b.right());
        assert!(u.top() <= a.top() && u.top() <= b.top());
        assert!(u.bottom() >= a.bottom() && u.bottom() >= b.bottom());
    }

    #[test]
    fn test_intersect_clips() {
        let a = Rect::new(-5.0, -5.0, 20.0, 20.0);
        let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert_eq!(a.intersect(&bounds), Rect::new(0.0, 0.0, 15.0, 15.0));
    }

    #[test]
    fn test_intersect_contained_equals_self() {
        let inner = Rect::new(10.0, 10.0, 5.0, 5.0);
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert_eq!(inner.intersect(&outer), inner);
    }

    #[test]
    fn test_line_normal_unit_perpendicular() {
        let line = Line::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0)).unwrap();
        let normal = line.normals()[0];
        let direction = Vec2::new(10.0, 10.0) - Vec2::new(0.0, 0.0);

        assert!((normal.length() - 1.0).abs() < 1e-6);
        assert!(normal.dot(direction).abs() < 1e-6);
    }

    #[test]
    fn test_line_bounds_cover_endpoints() {
        let line = Line::new(Vec2::new(5.0, 8.0), Vec2::new(-3.0, 2.0)).unwrap();
        assert_eq!(*line.bounds(), Rect::new(-3.0, 2.0, 8.0, 6.0));
    }

    #[test]
    fn test_degenerate_line_rejected() {
        let p = Vec2::new(4.0, 4.0);
        assert!(matches!(
            Line::new(p, p),
            Err(crate::errors::NavgraphError::DegenerateGeometry { .. })
        ));
    }
}
