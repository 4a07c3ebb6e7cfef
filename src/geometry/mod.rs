//! Vector algebra and shape descriptions shared by all higher layers

pub mod shapes;
pub mod vector;

pub use shapes::{Line, Rect, Shape};
pub use vector::Vec2;
