//! Configuration types for the LocalSubstrate.

use std::num::NonZeroUsize;

/// Configuration for the LocalSubstrate.
///
/// Controls how many partitions datasets are split into. Every stage of an
/// operation runs one blocking task per partition, so this is also the upper
/// bound on the parallelism of a single stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalSubstrateConfig {
    /// Number of partitions for new and shuffled datasets.
    ///
    /// Defaults to the available parallelism of the host.
    pub partitions: usize,
}

impl Default for LocalSubstrateConfig {
    fn default() -> Self {
        Self {
            partitions: std::thread::available_parallelism()
                .map(NonZeroUsize::get)
                .unwrap_or(1),
        }
    }
}

impl LocalSubstrateConfig {
    /// Create a config with a fixed partition count.
    ///
    /// # Arguments
    ///
    /// * `partitions` - Number of partitions for new and shuffled datasets
    ///
    /// # Returns
    ///
    /// A `LocalSubstrateConfig` with the specified partition count.
    pub fn with_partitions(partitions: usize) -> Self {
        Self { partitions }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_at_least_one_partition() {
        assert!(LocalSubstrateConfig::default().partitions >= 1);
    }

    #[test]
    fn test_with_partitions() {
        assert_eq!(LocalSubstrateConfig::with_partitions(8).partitions, 8);
    }
}
