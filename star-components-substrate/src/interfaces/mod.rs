//! Interface definitions for the distributed substrate.
//!
//! This module defines the abstract `Substrate` trait that allows the
//! contraction algorithm to run on any backend providing the primitives.

mod substrate;

pub use substrate::Substrate;
