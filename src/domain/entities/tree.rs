//! # Indexed Merkle Tree Entity
//!
//! The tree owns the record array, the derived leaf hashes, and the cached
//! root. Every mutator restores invariants I1-I7 (spec.md §3) before
//! returning, or leaves the tree byte-for-byte unchanged and returns an
//! error (spec.md §4.4: atomic mutators).
//!
//! Verification lives in [`crate::domain::services::ProofVerifier`], not
//! here — this entity only ever produces witnesses, mirroring the way the
//! teacher's `Note` entity exposes domain operations directly without a
//! use-case wrapper.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::domain::constants::{MAX_DEPTH, MIN_DEPTH};
use crate::domain::errors::TreeError;
use crate::domain::ports::MerkleHasher;
use crate::domain::proofs::{BatchInsertionProof, InsertionProof, MembershipProof, MerklePath};
use crate::domain::value_objects::{FieldElement, Node};

/// Lifecycle state of a tree, per spec.md §4.4: `Uninit -> Init -> Populated`.
/// There is no `Closed` state; this is read-only introspection, not a gate
/// any method switches on directly (every mutator checks `initialized`
/// itself).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TreeState {
	Uninit,
	Init,
	Populated,
}

/// Append-only indexed Merkle tree: record store, sorted linked list, and
/// Merkle/proof engine over a pluggable [`MerkleHasher`].
pub struct IndexedMerkleTree<H: MerkleHasher> {
	hasher: H,
	depth: u8,
	nodes: Vec<Node>,
	leaves: Vec<FieldElement>,
	root: FieldElement,
	zero_leaf: FieldElement,
	initialized: bool,
	/// Configuration: reject non-canonical field encodings at the decoding
	/// boundary rather than silently reducing them mod `p`. Has no effect on
	/// `insert`/`insert_at`/`insert_batch`, whose `key`/`value` arguments
	/// are already-constructed field elements; it governs
	/// [`IndexedMerkleTree::decode_field`].
	fail_on_truncation: bool,
}

impl<H: MerkleHasher> IndexedMerkleTree<H> {
	/// Construct an uninitialized tree. Call [`IndexedMerkleTree::init`]
	/// before any other mutator.
	pub fn new(hasher: H, fail_on_truncation: bool) -> Self {
		Self {
			hasher,
			depth: 0,
			nodes: Vec::new(),
			leaves: Vec::new(),
			root: FieldElement::zero(),
			zero_leaf: FieldElement::zero(),
			initialized: false,
			fail_on_truncation,
		}
	}

	/// `init(depth)` — spec.md §4.2.
	pub fn init(&mut self, depth: u8) -> Result<(), TreeError> {
		if self.initialized {
			return Err(TreeError::AlreadyInit);
		}
		if depth < MIN_DEPTH || depth > MAX_DEPTH {
			return Err(TreeError::BadDepth);
		}
		self.depth = depth;
		self.zero_leaf = self.hasher.hash4([FieldElement::zero(); 4]);
		self.nodes = alloc::vec![Node::sentinel()];
		self.leaves = alloc::vec![self.zero_leaf];
		self.root = self.zero_leaf;
		self.initialized = true;
		Ok(())
	}

	pub fn state(&self) -> TreeState {
		if !self.initialized {
			TreeState::Uninit
		} else if self.nodes.len() <= 1 {
			TreeState::Init
		} else {
			TreeState::Populated
		}
	}

	pub fn depth(&self) -> u8 {
		self.depth
	}

	pub fn num_of_leaves(&self) -> usize {
		self.nodes.len()
	}

	/// `root()` — the cached Merkle root, updated by every successful
	/// mutator (I7).
	pub fn root(&self) -> FieldElement {
		self.root
	}

	/// Decode a big-endian 32-byte field encoding, honoring
	/// `fail_on_truncation`.
	pub fn decode_field(&self, bytes: &[u8; 32]) -> Result<FieldElement, TreeError> {
		if self.fail_on_truncation {
			FieldElement::from_be_bytes_checked(bytes).ok_or(TreeError::InvalidValue)
		} else {
			Ok(FieldElement::from_be_bytes(bytes))
		}
	}

	fn capacity(&self) -> usize {
		1usize.checked_shl(self.depth as u32).unwrap_or(usize::MAX)
	}

	/// `findPrev(key)` — spec.md §4.2. Scans `1..numOfLeaves`, tracking the
	/// greatest key strictly less than `key`, with the early exit the spec
	/// permits when an adjacent key is found (B2).
	fn find_prev(&self, key: FieldElement) -> usize {
		let mut best_idx = 0usize;
		let mut best_key = self.nodes[0].key;
		for i in 1..self.nodes.len() {
			let k = self.nodes[i].key;
			if k < key {
				if k > best_key {
					best_key = k;
					best_idx = i;
				}
				if k.succ() == key {
					break;
				}
			}
		}
		best_idx
	}

	/// Rebuild the full level pyramid from the current leaves, freshly
	/// padded to `size = 2^ceil(log2(max(N,1)))` with `ZERO_LEAF` (spec.md
	/// §4.3's "Canonical Merkle root").
	fn levels(&self) -> Vec<Vec<FieldElement>> {
		let size = self.leaves.len().max(1).next_power_of_two();
		let mut level = self.leaves.clone();
		level.resize(size, self.zero_leaf);
		let mut levels = alloc::vec![level];
		while levels.last().expect("levels always non-empty").len() > 1 {
			let prev = levels.last().expect("checked above");
			let mut next = Vec::with_capacity(prev.len() / 2);
			for pair in prev.chunks(2) {
				next.push(self.hasher.hash2([pair[0], pair[1]]));
			}
			levels.push(next);
		}
		levels
	}

	fn root_from_levels(levels: &[Vec<FieldElement>]) -> FieldElement {
		levels.last().expect("levels always non-empty")[0]
	}

	/// Sibling path for `leaf_index` through `levels`, per the `prove`
	/// algorithm: `sibIdx = idx ^ 1` at each level, `idx >>= 1` going up.
	fn path_for(levels: &[Vec<FieldElement>], mut idx: usize) -> Vec<FieldElement> {
		let mut siblings = Vec::with_capacity(levels.len().saturating_sub(1));
		for level in &levels[..levels.len() - 1] {
			siblings.push(level[idx ^ 1]);
			idx >>= 1;
		}
		siblings
	}

	/// Perform one insertion directly against `self`, used by both the
	/// single-item mutators and the batch loop. `witnessed_prev`, when
	/// `Some`, is the on-chain caller-supplied predecessor index and is
	/// checked rather than trusted (spec.md §4.2).
	///
	/// `monotonic_guard` tracks the last existing-node predecessor index
	/// seen in the enclosing batch, enforcing Q3's monotonicity requirement
	/// (see DESIGN.md); pass `None` for single-item inserts, where it does
	/// not apply.
	fn insert_one(
		&mut self,
		key: FieldElement,
		value: FieldElement,
		witnessed_prev: Option<u32>,
		existing_node_bound: usize,
		monotonic_guard: Option<&mut Option<usize>>,
	) -> Result<InsertionProof, TreeError> {
		if !self.initialized {
			return Err(TreeError::NotInit);
		}
		if key.is_zero() {
			return Err(TreeError::InvalidKey);
		}
		// `capacity()` bounds the number of *user* records (spec.md B1: a
		// depth-1 tree accepts two inserts, i.e. two user keys, before
		// failing Full); the sentinel at index 0 sits outside that count.
		if self.nodes.len() - 1 >= self.capacity() {
			return Err(TreeError::Full);
		}

		let prev_idx = match witnessed_prev {
			Some(p) => {
				let p = p as usize;
				if p >= self.nodes.len() {
					return Err(TreeError::BadPrev);
				}
				if p < existing_node_bound {
					if let Some(guard) = monotonic_guard {
						if let Some(last) = *guard {
							if p <= last {
								return Err(TreeError::BadPrev);
							}
						}
						*guard = Some(p);
					}
				}
				let prev = self.nodes[p];
				if !(prev.key < key) {
					return Err(TreeError::BadPrev);
				}
				if !(prev.next_key > key || prev.next_key.is_zero()) {
					return Err(TreeError::BadPrev);
				}
				p
			}
			None => self.find_prev(key),
		};

		let prev = self.nodes[prev_idx];
		if prev.next_key == key {
			return Err(TreeError::DuplicateKey);
		}

		let new_idx = self.nodes.len();
		let next_idx = prev.next_idx;
		let next_key = prev.next_key;

		let levels_before = self.levels();
		let root_before = Self::root_from_levels(&levels_before);
		let og_before = prev;
		let og_path_before = MerklePath { leaf_index: prev_idx, siblings: Self::path_for(&levels_before, prev_idx) };

		let new_node = Node::new(key, value, next_idx, next_key);
		self.nodes[prev_idx].next_idx = new_idx as u32;
		self.nodes[prev_idx].next_key = key;
		self.nodes.push(new_node);

		let updated_prev_leaf = self.hasher.hash4(self.nodes[prev_idx].to_fields());
		let new_leaf = self.hasher.hash4(new_node.to_fields());
		self.leaves[prev_idx] = updated_prev_leaf;
		self.leaves.push(new_leaf);

		let levels_after = self.levels();
		let root_after = Self::root_from_levels(&levels_after);
		self.root = root_after;

		let og_after = self.nodes[prev_idx];
		let og_path_after = MerklePath { leaf_index: prev_idx, siblings: Self::path_for(&levels_after, prev_idx) };
		let new_path_after = MerklePath { leaf_index: new_idx, siblings: Self::path_for(&levels_after, new_idx) };

		Ok(InsertionProof { root_before, root_after, og_before, og_path_before, og_after, og_path_after, new_node, new_path_after })
	}

	/// `insert(key, value)` — spec.md §4.2.
	pub fn insert(&mut self, key: FieldElement, value: FieldElement) -> Result<InsertionProof, TreeError> {
		let bound = self.nodes.len();
		self.insert_one(key, value, None, bound, None)
	}

	/// `insertAt(prevIdx, key, value)` — spec.md §4.2, the caller-witnessed
	/// variant.
	pub fn insert_at(&mut self, prev_idx: u32, key: FieldElement, value: FieldElement) -> Result<InsertionProof, TreeError> {
		let bound = self.nodes.len();
		self.insert_one(key, value, Some(prev_idx), bound, None)
	}

	/// `insertBatch(items)` — spec.md §4.2. Atomic: either every item is
	/// inserted or the tree is left exactly as it was.
	pub fn insert_batch(&mut self, items: &[(FieldElement, FieldElement)]) -> Result<BatchInsertionProof, TreeError> {
		self.insert_batch_internal(items, None)
	}

	/// On-chain `insertBatch` variant: `prev_idxs[i]` is the caller-supplied
	/// predecessor witness for `items[i]`, checked against the in-progress
	/// state rather than trusted. Existing-node witnesses (indices below the
	/// batch's starting `numOfLeaves`) must be strictly increasing (Q3).
	pub fn insert_batch_at(&mut self, items: &[(FieldElement, FieldElement)], prev_idxs: &[u32]) -> Result<BatchInsertionProof, TreeError> {
		if items.len() != prev_idxs.len() {
			return Err(TreeError::BadPrev);
		}
		self.insert_batch_internal(items, Some(prev_idxs))
	}

	fn insert_batch_internal(&mut self, items: &[(FieldElement, FieldElement)], prev_idxs: Option<&[u32]>) -> Result<BatchInsertionProof, TreeError> {
		if items.is_empty() {
			return Err(TreeError::EmptyBatch);
		}

		let snapshot_nodes = self.nodes.clone();
		let snapshot_leaves = self.leaves.clone();
		let snapshot_root = self.root;

		let root_before = self.root;
		let existing_node_bound = self.nodes.len();
		let mut monotonic_guard: Option<usize> = None;
		let mut steps = Vec::with_capacity(items.len());

		for (i, &(key, value)) in items.iter().enumerate() {
			let witnessed = prev_idxs.map(|p| p[i]);
			match self.insert_one(key, value, witnessed, existing_node_bound, Some(&mut monotonic_guard)) {
				Ok(step) => steps.push(step),
				Err(err) => {
					self.nodes = snapshot_nodes;
					self.leaves = snapshot_leaves;
					self.root = snapshot_root;
					return Err(err);
				}
			}
		}

		let root_after = self.root;
		Ok(BatchInsertionProof { root_before, root_after, steps })
	}

	/// `prove(key)` — spec.md §4.3.
	pub fn prove(&self, key: FieldElement) -> Result<MembershipProof, TreeError> {
		let idx = self.nodes.iter().position(|n| n.key == key).ok_or(TreeError::NotFound)?;
		let levels = self.levels();
		let path = MerklePath { leaf_index: idx, siblings: Self::path_for(&levels, idx) };
		Ok(MembershipProof { node: self.nodes[idx], path })
	}

	/// `proveExclusion(key)` — spec.md §4.3.
	pub fn prove_exclusion(&self, key: FieldElement) -> Result<MembershipProof, TreeError> {
		if key.is_zero() {
			return Err(TreeError::InvalidKey);
		}
		let prev_idx = self.find_prev(key);
		let prev = self.nodes[prev_idx];
		if prev.next_key == key {
			return Err(TreeError::KeyExists);
		}
		self.prove(prev.key)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::infrastructure::crypto::PoseidonBn254Hasher;

	fn tree() -> IndexedMerkleTree<PoseidonBn254Hasher> {
		IndexedMerkleTree::new(PoseidonBn254Hasher::default(), true)
	}

	#[test]
	fn fresh_tree_is_uninit() {
		assert_eq!(tree().state(), TreeState::Uninit);
	}

	#[test]
	fn init_rejects_zero_depth() {
		let mut t = tree();
		assert_eq!(t.init(0), Err(TreeError::BadDepth));
	}

	#[test]
	fn init_rejects_depth_255() {
		let mut t = tree();
		assert_eq!(t.init(255), Err(TreeError::BadDepth));
	}

	#[test]
	fn init_accepts_depth_one() {
		let mut t = tree();
		assert!(t.init(1).is_ok());
		assert_eq!(t.state(), TreeState::Init);
	}

	#[test]
	fn init_twice_fails() {
		let mut t = tree();
		t.init(8).unwrap();
		assert_eq!(t.init(8), Err(TreeError::AlreadyInit));
	}

	#[test]
	fn depth_one_tree_is_full_after_two_inserts() {
		let mut t = tree();
		t.init(1).unwrap();
		t.insert(FieldElement::from_u64(1), FieldElement::from_u64(1)).unwrap();
		t.insert(FieldElement::from_u64(2), FieldElement::from_u64(2)).unwrap();
		assert_eq!(t.insert(FieldElement::from_u64(3), FieldElement::from_u64(3)), Err(TreeError::Full));
	}

	#[test]
	fn insert_before_init_fails() {
		let mut t = tree();
		assert_eq!(t.insert(FieldElement::from_u64(1), FieldElement::from_u64(1)), Err(TreeError::NotInit));
	}

	#[test]
	fn insert_zero_key_fails() {
		let mut t = tree();
		t.init(4).unwrap();
		assert_eq!(t.insert(FieldElement::zero(), FieldElement::from_u64(1)), Err(TreeError::InvalidKey));
	}

	#[test]
	fn duplicate_key_fails() {
		let mut t = tree();
		t.init(4).unwrap();
		t.insert(FieldElement::from_u64(5), FieldElement::from_u64(50)).unwrap();
		assert_eq!(t.insert(FieldElement::from_u64(5), FieldElement::from_u64(99)), Err(TreeError::DuplicateKey));
	}

	#[test]
	fn failing_insert_leaves_root_unchanged() {
		let mut t = tree();
		t.init(4).unwrap();
		t.insert(FieldElement::from_u64(5), FieldElement::from_u64(50)).unwrap();
		let root_before = t.root();
		let _ = t.insert(FieldElement::from_u64(5), FieldElement::from_u64(99));
		assert_eq!(t.root(), root_before);
		assert_eq!(t.num_of_leaves(), 2);
	}

	#[test]
	fn smallest_key_updates_sentinel() {
		let mut t = tree();
		t.init(4).unwrap();
		t.insert(FieldElement::from_u64(10), FieldElement::from_u64(100)).unwrap();
		t.insert(FieldElement::from_u64(5), FieldElement::from_u64(50)).unwrap();
		let proof = t.prove(FieldElement::zero()).unwrap();
		assert_eq!(proof.node.next_key, FieldElement::from_u64(5));
	}

	#[test]
	fn largest_key_is_terminal() {
		let mut t = tree();
		t.init(4).unwrap();
		t.insert(FieldElement::from_u64(5), FieldElement::from_u64(50)).unwrap();
		t.insert(FieldElement::from_u64(10), FieldElement::from_u64(100)).unwrap();
		let proof = t.prove(FieldElement::from_u64(10)).unwrap();
		assert_eq!(proof.node.next_idx, 0);
		assert!(proof.node.next_key.is_zero());
	}

	#[test]
	fn adjacent_keys_exercise_early_exit() {
		let mut t = tree();
		t.init(8).unwrap();
		t.insert(FieldElement::from_u64(1), FieldElement::from_u64(1)).unwrap();
		t.insert(FieldElement::from_u64(2), FieldElement::from_u64(2)).unwrap();
		let proof = t.prove(FieldElement::from_u64(1)).unwrap();
		assert_eq!(proof.node.next_key, FieldElement::from_u64(2));
	}

	#[test]
	fn prove_missing_key_fails() {
		let mut t = tree();
		t.init(4).unwrap();
		t.insert(FieldElement::from_u64(5), FieldElement::from_u64(50)).unwrap();
		assert_eq!(t.prove(FieldElement::from_u64(999)), Err(TreeError::NotFound));
	}

	#[test]
	fn exclusion_proof_rejects_present_key() {
		let mut t = tree();
		t.init(4).unwrap();
		t.insert(FieldElement::from_u64(5), FieldElement::from_u64(50)).unwrap();
		assert_eq!(t.prove_exclusion(FieldElement::from_u64(5)), Err(TreeError::KeyExists));
	}

	#[test]
	fn exclusion_proof_finds_predecessor_for_absent_key() {
		let mut t = tree();
		t.init(4).unwrap();
		t.insert(FieldElement::from_u64(5), FieldElement::from_u64(50)).unwrap();
		t.insert(FieldElement::from_u64(20), FieldElement::from_u64(200)).unwrap();
		let proof = t.prove_exclusion(FieldElement::from_u64(12)).unwrap();
		assert_eq!(proof.node.key, FieldElement::from_u64(5));
	}

	#[test]
	fn insert_batch_rejects_empty_items() {
		let mut t = tree();
		t.init(8).unwrap();
		assert_eq!(t.insert_batch(&[]), Err(TreeError::EmptyBatch));
	}

	#[test]
	fn insert_batch_matches_sequential_inserts() {
		let mut single = tree();
		single.init(16).unwrap();
		for (k, v) in [(1u64, 1u64), (2, 2), (3, 3), (6, 6)] {
			single.insert(FieldElement::from_u64(k), FieldElement::from_u64(v)).unwrap();
		}

		let mut batched = tree();
		batched.init(16).unwrap();
		let items: Vec<(FieldElement, FieldElement)> =
			[(1u64, 1u64), (2, 2), (3, 3), (6, 6)].into_iter().map(|(k, v)| (FieldElement::from_u64(k), FieldElement::from_u64(v))).collect();
		batched.insert_batch(&items).unwrap();

		assert_eq!(single.root(), batched.root());
	}

	#[test]
	fn insert_batch_at_enforces_monotonic_existing_predecessors() {
		let mut t = tree();
		t.init(16).unwrap();
		t.insert(FieldElement::from_u64(1), FieldElement::from_u64(1)).unwrap();
		t.insert(FieldElement::from_u64(10), FieldElement::from_u64(10)).unwrap();
		// Predecessor for key 5 is node at index 1 (key=1); predecessor for
		// key 2 would also be index 1 -- non-monotonic, must fail.
		let items = [(FieldElement::from_u64(5), FieldElement::from_u64(5)), (FieldElement::from_u64(2), FieldElement::from_u64(2))];
		let prev_idxs = [1u32, 1u32];
		assert_eq!(t.insert_batch_at(&items, &prev_idxs), Err(TreeError::BadPrev));
	}
}
