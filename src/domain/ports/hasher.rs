//! # Hasher Port
//!
//! The seam through which the tree's hash function is injected. The domain
//! never hard-codes Poseidon; it only depends on this trait.

use crate::domain::value_objects::FieldElement;

/// Capability to hash 2 or 4 field elements down to one.
///
/// The reference adapter is [`crate::infrastructure::crypto::PoseidonBn254Hasher`],
/// but any implementation satisfying the arithmetic contract (collision
/// resistant over `F`, deterministic) is a conforming instantiation.
pub trait MerkleHasher {
	/// `H2: F² → F`, used to combine sibling nodes while walking up the tree.
	fn hash2(&self, inputs: [FieldElement; 2]) -> FieldElement;

	/// `H4: F⁴ → F`, used to commit a [`crate::domain::value_objects::Node`]
	/// to its leaf hash.
	fn hash4(&self, inputs: [FieldElement; 4]) -> FieldElement;
}
