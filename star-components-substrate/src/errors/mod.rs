//! Error types for the substrate.
//!
//! This module provides a unified error type for all substrate operations.

mod substrate_error;

pub use substrate_error::SubstrateError;
