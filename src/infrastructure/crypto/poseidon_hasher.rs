//! # Poseidon/BN254 Hasher Adapter
//!
//! Reference implementation of [`MerkleHasher`], grounded on the teacher's
//! `LightPoseidonHasher`: circomlib-parameterized Poseidon over the BN254
//! scalar field via `light-poseidon-nostd`.

use ark_bn254::Fr;
use light_poseidon_nostd::{Poseidon, PoseidonHasher as LightHasher};

use crate::domain::ports::MerkleHasher;
use crate::domain::value_objects::FieldElement;

/// Zero-sized adapter: each call constructs a circomlib-parameterized
/// `Poseidon<Fr>` instance for the arity it needs. `light-poseidon-nostd`
/// instances are cheap to build (round constants are embedded tables, not
/// computed), so there is no benefit to caching one per arity here.
#[derive(Clone, Copy, Debug, Default)]
pub struct PoseidonBn254Hasher;

impl MerkleHasher for PoseidonBn254Hasher {
	fn hash2(&self, inputs: [FieldElement; 2]) -> FieldElement {
		let raw = [inputs[0].inner(), inputs[1].inner()];
		let result = Poseidon::<Fr>::new_circom(2)
			.expect("circomlib Poseidon(2) parameters are always valid")
			.hash(&raw)
			.expect("fixed 2-element input always hashes");
		FieldElement::new(result)
	}

	fn hash4(&self, inputs: [FieldElement; 4]) -> FieldElement {
		let raw = [inputs[0].inner(), inputs[1].inner(), inputs[2].inner(), inputs[3].inner()];
		let result = Poseidon::<Fr>::new_circom(4)
			.expect("circomlib Poseidon(4) parameters are always valid")
			.hash(&raw)
			.expect("fixed 4-element input always hashes");
		FieldElement::new(result)
	}
}
