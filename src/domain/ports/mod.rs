//! # Ports
//!
//! Traits the domain depends on but does not implement. Infrastructure
//! provides the concrete adapters.

mod hasher;

pub use hasher::MerkleHasher;
