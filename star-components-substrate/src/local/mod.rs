//! In-process substrate implementation.
//!
//! This module contains `LocalSubstrate`, which executes every partition of
//! every stage as a blocking task on the tokio runtime, and the hash shuffle
//! used by key-grouped operations.

mod local_substrate;
mod shuffle;

pub use local_substrate::LocalSubstrate;
