//! # Domain Layer
//!
//! Pure tree logic: value objects, ports, entities, services, and the
//! error taxonomy. This layer depends only on `core`/`alloc` and the field
//! arithmetic crates (`ark-bn254`, `ark-ff`) — never on
//! `crate::infrastructure`.

pub mod constants;
pub mod entities;
pub mod errors;
pub mod ports;
pub mod proofs;
pub mod services;
pub mod value_objects;

pub use entities::{IndexedMerkleTree, TreeState};
pub use errors::TreeError;
pub use ports::MerkleHasher;
pub use proofs::{BatchInsertionProof, InsertionProof, MembershipProof, MerklePath};
pub use services::ProofVerifier;
pub use value_objects::{FieldElement, Node};
