//! Declaration tree: slotmap-backed arena of one node per declared attribute.

pub mod node;
#[allow(clippy::module_inception)]
pub mod tree;

pub use node::{Declaration, DeclarationNode, FieldElements, NodeElements, NodeId};
pub use tree::DeclarationTree;
