//! Separating Axis Theorem narrow-phase
//!
//! Two convex shapes do not intersect iff some axis, drawn from the edge
//! normals of either shape, projects their point sets onto disjoint ranges.
//! Both shapes must already be expressed in the same absolute coordinate
//! frame; the engine performs no translation between them.

use crate::geometry::{Shape, Vec2};

/// Project every point onto `axis`, returning the covered `(min, max)` range.
fn project(points: &[Vec2], axis: Vec2) -> (f32, f32) {
    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;

    for point in points {
        let dot = point.dot(axis);
        min = min.min(dot);
        max = max.max(dot);
    }

    (min, max)
}

fn is_separating_axis(a_points: &[Vec2], b_points: &[Vec2], axis: Vec2) -> bool {
    let (a_min, a_max) = project(a_points, axis);
    let (b_min, b_max) = project(b_points, axis);

    a_min > b_max || b_min > a_max
}

/// Exact intersection test for two convex shapes.
///
/// A's normals are checked first, short-circuiting on the first separating
/// axis, then B's. Degenerate to segment-vs-polygon when one shape is a
/// 2-point [`Line`](crate::geometry::Line): its single normal still
/// participates.
pub fn shapes_intersect<A, B>(a: &A, b: &B) -> bool
where
    A: Shape + ?Sized,
    B: Shape + ?Sized,
{
    for axis in a.normals() {
        if is_separating_axis(a.points(), b.points(), *axis) {
            return false;
        }
    }

    for axis in b.normals() {
        if is_separating_axis(a.points(), b.points(), *axis) {
            return false;
        }
    }

    true
}
