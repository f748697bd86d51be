//! # Proof Types
//!
//! Plain data produced by [`crate::domain::entities::IndexedMerkleTree`] and
//! consumed by [`crate::domain::services::ProofVerifier`]. None of these
//! types do any hashing themselves — they are witnesses, not verifiers.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::domain::value_objects::{FieldElement, Node};

/// Sibling path from a leaf up to the root, paired with the leaf's index.
///
/// `siblings[0]` is the leaf's immediate sibling; `siblings[last]` is the
/// sibling just below the root. `siblings.len()` is the tree's current
/// effective height (`⌈log₂ num_of_leaves⌉`, see spec.md Q1 / DESIGN.md),
/// which may differ by at most one from another proof's path length if a
/// leaf was inserted in between.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MerklePath {
	pub leaf_index: usize,
	pub siblings: Vec<FieldElement>,
}

/// Witness that `node` occupies `path.leaf_index` and hashes into `root`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MembershipProof {
	pub node: Node,
	pub path: MerklePath,
}

/// Witness for a single insertion transition: the low-nullifier update plus
/// the new leaf's insertion, tying `root_before` to `root_after`.
///
/// Field names follow spec.md §4.3: `og*` is the predecessor ("original")
/// node, `new*` is the freshly inserted node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InsertionProof {
	pub root_before: FieldElement,
	pub root_after: FieldElement,
	/// The predecessor before re-linking, with its path under `root_before`.
	pub og_before: Node,
	pub og_path_before: MerklePath,
	/// The predecessor after re-linking, with its path under `root_after`.
	pub og_after: Node,
	pub og_path_after: MerklePath,
	/// The newly inserted node, with its path under `root_after`.
	pub new_node: Node,
	pub new_path_after: MerklePath,
}

/// Witness for a batch insertion transition: one low-nullifier update and
/// one new-leaf insertion per item, chained so that item `i`'s "after" root
/// is item `i+1`'s "before" root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchInsertionProof {
	pub root_before: FieldElement,
	pub root_after: FieldElement,
	pub steps: Vec<InsertionProof>,
}
