//! 2D vector value type

use derive_more::{Add, AddAssign, From, Sub};
use serde::{Deserialize, Serialize};

/// A 2D point or direction in map coordinates.
///
/// Every operation takes `self` by value and returns a new vector, so the
/// original always survives a chain of operations.
///
/// Serializes as a two-element `[x, y]` array, the form nodes take in the
/// graph artifact.
#[derive(
    Debug, Clone, Copy, PartialEq, Default, Add, AddAssign, Sub, From, Serialize, Deserialize,
)]
#[serde(into = "(f32, f32)", from = "(f32, f32)")]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl From<Vec2> for (f32, f32) {
    fn from(v: Vec2) -> Self {
        (v.x, v.y)
    }
}

impl std::ops::Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn dot(self, other: Vec2) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// Rotate 90 degrees: the perpendicular of an edge direction is its normal.
    pub fn perp(self) -> Vec2 {
        Vec2::new(self.y, -self.x)
    }

    pub fn abs(self) -> Vec2 {
        Vec2::new(self.x.abs(), self.y.abs())
    }

    pub fn length_squared(self) -> f32 {
        self.dot(self)
    }

    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    pub fn distance(self, other: Vec2) -> f32 {
        (other - self).length()
    }

    /// Scale to unit length. Returns `None` for a zero-length vector, where
    /// the direction is undefined.
    pub fn normalize(self) -> Option<Vec2> {
        let len = self.length();
        if len > 0.0 && len.is_finite() {
            Some(Vec2::new(self.x / len, self.y / len))
        } else {
            None
        }
    }
}
