//! Substrate error types.
//!
//! This module defines the unified error type for all substrate operations,
//! covering both partition execution failures and invalid configuration.

use thiserror::Error;

/// Unified errors from substrate operations.
///
/// Used by the `Substrate` trait and `LocalSubstrate`. A failed partition
/// invalidates the whole operation: partial results are never returned.
#[derive(Debug, Clone, Error)]
pub enum SubstrateError {
    /// A partition task failed (panicked or was cancelled) while executing an operation.
    #[error("Partition {partition} failed during {operation}: {message}")]
    PartitionFailed {
        operation: &'static str,
        partition: usize,
        message: String,
    },

    /// The substrate was configured with invalid settings.
    #[error("Invalid substrate configuration: {0}")]
    InvalidConfiguration(String),
}

impl SubstrateError {
    /// Create a partition failure error.
    pub fn partition_failed(
        operation: &'static str,
        partition: usize,
        message: impl Into<String>,
    ) -> Self {
        Self::PartitionFailed {
            operation,
            partition,
            message: message.into(),
        }
    }

    /// Create an invalid configuration error.
    pub fn invalid_configuration(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    /// The name of the operation that failed, if the error came from a partition.
    pub fn operation(&self) -> Option<&'static str> {
        match self {
            Self::PartitionFailed { operation, .. } => Some(operation),
            Self::InvalidConfiguration(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partition_failed_display() {
        let err = SubstrateError::partition_failed("distinct", 3, "lost partition");
        assert_eq!(
            err.to_string(),
            "Partition 3 failed during distinct: lost partition"
        );
        assert_eq!(err.operation(), Some("distinct"));
    }

    #[test]
    fn test_invalid_configuration_has_no_operation() {
        let err = SubstrateError::invalid_configuration("partitions must be positive");
        assert!(err.operation().is_none());
    }
}
