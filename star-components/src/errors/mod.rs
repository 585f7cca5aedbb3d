//! Error types for the connected components job.
//!
//! Each stage of a run has its own error type. None of them is ever recovered
//! from: every round must be complete and exact, so any failure aborts the run
//! before output is written.

use std::path::PathBuf;

use star_components_shared::MalformedInputError;
use star_components_substrate::SubstrateError;
use thiserror::Error;

use crate::orchestrator::Phase;

/// Errors that can occur while reading the input edge list.
#[derive(Error, Debug)]
pub enum ReadError {
    /// The input could not be opened or read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A line could not be parsed into an edge.
    #[error("Malformed input at line {line}: {source}")]
    Malformed {
        line: usize,
        #[source]
        source: MalformedInputError,
    },
}

impl ReadError {
    /// Create an I/O error for the given path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a malformed input error for a 1-based line number.
    pub fn malformed(line: usize, source: MalformedInputError) -> Self {
        Self::Malformed { line, source }
    }
}

/// Errors that abort the contraction loop.
#[derive(Error, Debug)]
pub enum ContractionError {
    /// A substrate operation failed while executing a round.
    #[error("Substrate failure in {phase} round {round}: {source}")]
    Substrate {
        phase: Phase,
        round: u32,
        #[source]
        source: SubstrateError,
    },

    /// Cancellation was requested; observed before starting the given round.
    #[error("Contraction cancelled before {phase} round {round}")]
    Cancelled { phase: Phase, round: u32 },

    /// The configured maximum number of rounds was reached without converging.
    #[error("Contraction did not converge within {limit} rounds")]
    RoundLimitExceeded { limit: u32 },
}

impl ContractionError {
    /// Create a substrate failure error for the given phase and round.
    pub fn substrate(phase: Phase, round: u32, source: SubstrateError) -> Self {
        Self::Substrate {
            phase,
            round,
            source,
        }
    }

    /// The phase and round the error is attributed to, if any.
    pub fn location(&self) -> Option<(Phase, u32)> {
        match self {
            Self::Substrate { phase, round, .. } | Self::Cancelled { phase, round } => {
                Some((*phase, *round))
            }
            Self::RoundLimitExceeded { .. } => None,
        }
    }
}

/// Errors that can occur while emitting component assignments.
#[derive(Error, Debug)]
pub enum EmitError {
    /// Reversing the final pairs failed on the substrate.
    #[error("Substrate error: {0}")]
    Substrate(#[from] SubstrateError),

    /// A record could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The output could not be written.
    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl EmitError {
    /// Create an I/O error for the given path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
