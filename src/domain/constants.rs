//! # Domain Constants
//!
//! Bounds and reference values fixed by the specification rather than
//! derived at runtime.

/// Smallest legal tree depth (spec.md §3, Tree.depth).
pub const MIN_DEPTH: u8 = 1;

/// Largest legal tree depth.
pub const MAX_DEPTH: u8 = 254;

/// Decimal encoding of `ZERO_LEAF = H4(0,0,0,0)` under the reference
/// Poseidon/BN254 instantiation (spec.md §3). Exposed for tests and callers
/// that want to sanity-check their hasher without constructing a tree.
pub const REFERENCE_ZERO_LEAF_DECIMAL: &str = "2351654555892372227640888372176282444150254868378439619268573230312091195718";
