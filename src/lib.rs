//! Visibility-graph generation for rectangular obstacle maps.
//!
//! Given a set of axis-aligned rectangular obstacles and a bounding rect,
//! this crate produces a weighted visibility graph in which every edge is a
//! straight segment an agent of a configured clearance radius can traverse
//! without hitting an obstacle. Obstacle corners (padding-inflated, clipped
//! to the map) become nodes; node pairs within a distance cutoff are kept as
//! edges when a padded line-of-sight test against a quadtree-indexed, SAT
//! narrow-phased obstacle field succeeds.
//!
//! Map parsing, file watching, and pathfinding search over the produced
//! graph all live outside this crate; see [`decoder::ObstacleDecoder`] and
//! [`service::GraphService`] for the seams they plug into.

pub mod collision;
pub mod config;
pub mod decoder;
pub mod errors;
pub mod geometry;
pub mod graph;
pub mod service;
pub mod sources;

// Selective re-exports for external consumers

pub use config::{DEFAULT_DISTANCE_CUTOFF, NavgraphConfig};
pub use decoder::{DecodedSource, Obstacle, ObstacleDecoder};
pub use errors::{NavgraphError, NavgraphResult};
pub use geometry::{Line, Rect, Shape, Vec2};
pub use graph::{Edge, GraphBuilder, SourceGraph};
pub use service::{GraphArtifact, GraphService, RebuildOutcome};
pub use sources::{SourcePattern, SourceTracker};
