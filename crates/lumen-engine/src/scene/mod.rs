//! Minimal scene-graph store.
//!
//! Tracks what the frame loop touches: named nodes with an optional line mesh,
//! their transforms and visibility, and a dirty flag the draw surface consumes
//! to decide when to rebuild geometry.

mod graph;
mod mesh;
mod transform;

pub use graph::{Node, NodeId, SceneGraph};
pub use mesh::{Mesh, Segment};
pub use transform::Transform;
