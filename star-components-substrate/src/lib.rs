//! # Star Components Substrate
//!
//! This crate provides the distributed primitives consumed by the contraction
//! algorithm. It includes the partitioned `Dataset` collection, the abstract
//! `Substrate` trait (map, flat_map, reduce_by_key, distinct, reduce), error
//! definitions, and `LocalSubstrate`, a concrete implementation that runs each
//! partition as a blocking task on the tokio runtime.

pub mod config;
pub mod dataset;
pub mod errors;
pub mod interfaces;
pub mod local;

pub use config::LocalSubstrateConfig;
pub use dataset::Dataset;
pub use errors::SubstrateError;
pub use interfaces::Substrate;
pub use local::LocalSubstrate;
