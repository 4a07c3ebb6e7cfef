//! Broadphase culling, SAT narrow-phase, and segment queries over an
//! obstacle field

pub mod field;
pub mod quadtree;
pub mod sat;

pub use field::{BroadphaseRecord, CollisionField};
pub use quadtree::QuadTree;
pub use sat::shapes_intersect;
