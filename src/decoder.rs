//! The decoder seam: how already-parsed obstacle sets enter the core
//!
//! Map parsing itself (tile formats, object layers) lives outside this
//! crate; implementors of [`ObstacleDecoder`] hand the core a decoded
//! rectangle list plus the map's bounding dimensions.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::NavgraphResult;
use crate::geometry::Rect;

/// One axis-aligned rectangular obstacle as decoded from a source and as
/// serialized into the graph artifact.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl From<&Obstacle> for Rect {
    fn from(o: &Obstacle) -> Self {
        Rect::new(o.x, o.y, o.width, o.height)
    }
}

/// Everything the core needs from one decoded source.
#[derive(Debug, Clone)]
pub struct DecodedSource {
    pub bounds_width: f32,
    pub bounds_height: f32,
    pub obstacles: Vec<Obstacle>,
}

impl DecodedSource {
    /// The map's bounding rect, anchored at the origin.
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.bounds_width, self.bounds_height)
    }
}

/// External collaborator that turns a source identifier into obstacles.
///
/// Which object layers count as obstacles is this layer's decision; the core
/// does not interpret layer predicates. A failed decode fails the whole
/// rebuild rather than silently dropping the source.
#[async_trait]
pub trait ObstacleDecoder: Send + Sync {
    async fn decode(&self, source_id: &str) -> NavgraphResult<DecodedSource>;
}
