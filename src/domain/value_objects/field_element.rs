//! # Field Element Value Object
//!
//! Base value object for BN254 scalar field elements.
//! Wraps arkworks `Fr` with domain semantics: canonical-range checks and
//! big-endian byte encoding matching circomlib / snarkjs conventions.

use ark_ff::{BigInteger, PrimeField};

use ark_bn254::Fr;

/// Field element in the BN254 scalar field.
///
/// This is the foundational value object. [`crate::domain::value_objects::Node`]
/// and every proof type are built out of it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FieldElement(Fr);

impl FieldElement {
	/// Create a new field element from a raw `Fr`.
	pub fn new(value: Fr) -> Self {
		Self(value)
	}

	/// Get the inner `Fr` value.
	pub fn inner(&self) -> Fr {
		self.0
	}

	/// Create from a `u64` value.
	pub fn from_u64(value: u64) -> Self {
		Self(Fr::from(value))
	}

	/// Create from a `u32` value (used for widening `next_idx` losslessly).
	pub fn from_u32(value: u32) -> Self {
		Self(Fr::from(value))
	}

	/// Create the zero element.
	pub fn zero() -> Self {
		Self(Fr::from(0u64))
	}

	/// Check whether this element is zero.
	pub fn is_zero(&self) -> bool {
		self.0 == Fr::from(0u64)
	}

	/// `self + 1`, the only arithmetic this field needs beyond comparison.
	pub fn succ(&self) -> Self {
		Self(self.0 + Fr::from(1u64))
	}

	/// Big-endian 32-byte encoding, matching circomlib / snarkjs conventions.
	pub fn to_be_bytes(&self) -> [u8; 32] {
		let bytes = self.0.into_bigint().to_bytes_be();
		let mut out = [0u8; 32];
		// `to_bytes_be` on BN254's BigInteger256 always yields 32 bytes, but
		// guard defensively against a shorter representation of small values.
		let offset = 32usize.saturating_sub(bytes.len());
		out[offset..].copy_from_slice(&bytes);
		out
	}

	/// Parse a big-endian 32-byte encoding, reducing modulo the field prime.
	/// Use [`FieldElement::from_be_bytes_checked`] to reject non-canonical
	/// (`>= p`) input instead of silently truncating it.
	pub fn from_be_bytes(bytes: &[u8; 32]) -> Self {
		Self(Fr::from_be_bytes_mod_order(bytes))
	}

	/// Parse a big-endian 32-byte encoding, rejecting values `>= p`.
	///
	/// Re-encodes after a mod-order reduction and compares to the input to
	/// catch a value that wasn't already in canonical form.
	pub fn from_be_bytes_checked(bytes: &[u8; 32]) -> Option<Self> {
		let candidate = Self::from_be_bytes(bytes);
		if &candidate.to_be_bytes() == bytes {
			Some(candidate)
		} else {
			None
		}
	}
}

impl PartialOrd for FieldElement {
	fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
		Some(self.cmp(other))
	}
}

impl Ord for FieldElement {
	/// Orders by the element's canonical big-integer representation.
	///
	/// Compares `BigInteger` representations rather than the field's own
	/// (non-canonical) residue encoding.
	fn cmp(&self, other: &Self) -> core::cmp::Ordering {
		self.0.into_bigint().cmp(&other.0.into_bigint())
	}
}

impl From<Fr> for FieldElement {
	fn from(value: Fr) -> Self {
		Self(value)
	}
}

impl From<FieldElement> for Fr {
	fn from(element: FieldElement) -> Self {
		element.0
	}
}

impl From<u64> for FieldElement {
	fn from(value: u64) -> Self {
		Self::from_u64(value)
	}
}
