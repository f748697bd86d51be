//! # Entities
//!
//! Types with identity and a lifecycle: the tree itself, not just a slice
//! of its data.

mod tree;

pub use tree::{IndexedMerkleTree, TreeState};
