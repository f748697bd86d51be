//! # Crypto Adapters

mod poseidon_hasher;

pub use poseidon_hasher::PoseidonBn254Hasher;
