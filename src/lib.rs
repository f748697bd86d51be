//! # Indexed Merkle Tree
//!
//! Append-only, sparse Merkle commitment to a set of `(key, value)` records
//! whose leaves additionally form a singly-linked sorted list by key. The
//! linked-list layer gives succinct membership, non-membership (exclusion),
//! single-insertion and batch-insertion transition proofs suitable for
//! zero-knowledge circuits — the "low-nullifier" pattern used by privacy
//! protocols.
//!
//! ## Architecture
//!
//! - **Domain**: the record store, linked list, Merkle/proof engine, and the
//!   [`MerkleHasher`] port the hash function is injected through.
//! - **Infrastructure**: [`PoseidonBn254Hasher`], the reference Poseidon/BN254
//!   instantiation.
//!
//! This crate does not own persistence, a wire format, or concurrent
//! mutation: callers that need those wrap an [`IndexedMerkleTree`] in their
//! own storage and locking.
//!
//! ## Features
//!
//! - `std`: enable standard library support (default).
//!
//! ## No-std Support
//!
//! `no_std` compatible by default, using `alloc` for heap allocations.
//! Enable the `std` feature for standard library support.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod domain;
pub mod infrastructure;

pub use domain::{
	entities::{IndexedMerkleTree, TreeState},
	errors::TreeError,
	ports::MerkleHasher,
	proofs::{BatchInsertionProof, InsertionProof, MembershipProof, MerklePath},
	services::ProofVerifier,
	value_objects::{FieldElement, Node},
};

pub use infrastructure::crypto::PoseidonBn254Hasher;
