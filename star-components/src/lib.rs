//! # Star Components
//!
//! Connected components of an undirected graph by iterated star contraction,
//! expressed as data-parallel stages over a partitioned substrate.
//!
//! ## Architecture
//!
//! A run follows the Reader-Contraction-Emitter pattern:
//!
//! 1. **Reader**: Parses the edge list into canonical edges
//! 2. **Contraction**: Alternates large-star and small-star rounds until the
//!    convergence sum stops dropping
//! 3. **Emitter**: Writes one `(vertex, representative)` record per vertex
//! 4. **Orchestrator**: Coordinates the run
//!
//! ## Modules
//!
//! - [`config`]: Settings, command line arguments and dependency wiring
//! - [`reader`]: Edge list reader
//! - [`star`]: Large-star and small-star operators
//! - [`convergence`]: Convergence sum and progress tracking
//! - [`orchestrator`]: Contraction loop and run coordination
//! - [`emitter`]: Component assignment output
//! - [`errors`]: Error types for each stage

pub mod config;
pub mod convergence;
pub mod emitter;
pub mod errors;
pub mod orchestrator;
pub mod reader;
pub mod star;

pub use config::Dependencies;
pub use errors::{ContractionError, EmitError, ReadError};

use thiserror::Error;

/// Errors that can occur during initialization or execution of a run.
#[derive(Error, Debug)]
pub enum RunError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Input error.
    #[error("Read error: {0}")]
    Read(#[from] ReadError),

    /// Contraction error.
    #[error("Contraction error: {0}")]
    Contraction(#[from] ContractionError),

    /// Output error.
    #[error("Emit error: {0}")]
    Emit(#[from] EmitError),
}

impl RunError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
