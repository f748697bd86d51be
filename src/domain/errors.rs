//! # Tree Errors
//!
//! Precondition / Input / Capacity / Lookup taxonomy, returned by the tree's
//! mutators. Verifiers never use this type — a malformed proof is reported
//! as `false`, not an error.

#[cfg(feature = "std")]
extern crate std;

/// Failure modes of [`crate::domain::entities::IndexedMerkleTree`] mutators.
///
/// All variants are precondition, input, capacity, or lookup failures; a
/// mutator that returns `Err` leaves the tree exactly as it was before the
/// call (atomic mutators, see spec.md §4.4).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TreeError {
	// Precondition
	/// `init` was called with a depth outside `[1, 254]`.
	BadDepth,
	/// A mutator that requires an initialized tree was called before `init`.
	NotInit,
	/// `init` was called on a tree that is already initialized.
	AlreadyInit,
	/// `insert_at`/`insert_batch_at` was given a predecessor that does not
	/// actually precede the key, or whose witnessed index breaks the
	/// monotonicity discipline over existing nodes.
	BadPrev,
	/// `insert_batch`/`insert_batch_at` was called with zero items.
	EmptyBatch,

	// Input
	/// Key is zero, or (with `fail_on_truncation`) not a canonical field
	/// element.
	InvalidKey,
	/// Value is not a canonical field element under `fail_on_truncation`.
	InvalidValue,
	/// `insert`/`insert_at`/`insert_batch` was given a key already present.
	DuplicateKey,

	// Capacity
	/// The tree has reached `2^depth` leaves; no further insertion fits.
	Full,

	// Lookup
	/// A membership lookup (`prove`) found no node with the requested key.
	NotFound,
	/// `prove_exclusion` was asked to exclude a key that is present.
	KeyExists,
}

impl core::fmt::Display for TreeError {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		let msg = match self {
			TreeError::BadDepth => "depth must be in [1, 254]",
			TreeError::NotInit => "tree has not been initialized",
			TreeError::AlreadyInit => "tree is already initialized",
			TreeError::BadPrev => "supplied predecessor does not precede the key, or breaks prev_idx monotonicity",
			TreeError::EmptyBatch => "batch insertion requires at least one item",
			TreeError::InvalidKey => "key is zero or not a canonical field element",
			TreeError::InvalidValue => "value is not a canonical field element",
			TreeError::DuplicateKey => "key is already present in the tree",
			TreeError::Full => "tree has reached its capacity of 2^depth leaves",
			TreeError::NotFound => "no node with the requested key",
			TreeError::KeyExists => "key is present, so it cannot be excluded",
		};
		f.write_str(msg)
	}
}

#[cfg(feature = "std")]
impl std::error::Error for TreeError {}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn display_is_non_empty_for_every_variant() {
		let variants = [
			TreeError::BadDepth,
			TreeError::NotInit,
			TreeError::AlreadyInit,
			TreeError::BadPrev,
			TreeError::EmptyBatch,
			TreeError::InvalidKey,
			TreeError::InvalidValue,
			TreeError::DuplicateKey,
			TreeError::Full,
			TreeError::NotFound,
			TreeError::KeyExists,
		];
		for variant in variants {
			assert!(!variant.to_string().is_empty());
		}
	}
}
