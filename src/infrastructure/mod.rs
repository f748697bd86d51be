//! # Infrastructure Layer
//!
//! Concrete adapters for the ports the domain declares. Depends on
//! `crate::domain`; never the reverse.

pub mod crypto;
