//! Spatial helpers over table rows

mod aabb;
mod kdtree;

pub use aabb::Aabb;
pub use kdtree::{KdNode, KdTree, Nearest, NodeId};
