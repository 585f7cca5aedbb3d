//! Local substrate implementation.
//!
//! This module provides the concrete implementation of `Substrate` that runs
//! on a single host. Each stage spawns one blocking tokio task per partition
//! and waits for all of them; key-grouped operations run as two stages around
//! a hash shuffle (map-side combine, then reduce-side merge).

use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::try_join_all;
use tokio::task::JoinError;
use tracing::debug;

use crate::config::LocalSubstrateConfig;
use crate::dataset::Dataset;
use crate::errors::SubstrateError;
use crate::interfaces::Substrate;
use crate::local::shuffle::{bucket_for, gather, scatter};

/// In-process partitioned substrate.
///
/// # Example
///
/// ```
/// use star_components_substrate::{LocalSubstrate, LocalSubstrateConfig, Substrate};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let substrate = LocalSubstrate::with_config(LocalSubstrateConfig::with_partitions(4))?;
/// let numbers = substrate.parallelize(vec![1u64, 2, 3, 4]);
/// let doubled = substrate.map(&numbers, |n| n * 2).await?;
/// let total = substrate.reduce(&doubled, |a, b| a + b).await?;
/// assert_eq!(total, Some(20));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct LocalSubstrate {
    config: LocalSubstrateConfig,
}

impl LocalSubstrate {
    /// Create a new local substrate with the default configuration.
    pub fn new() -> Self {
        Self {
            config: LocalSubstrateConfig::default(),
        }
    }

    /// Create a new local substrate with a custom configuration.
    ///
    /// # Returns
    ///
    /// * `Ok(LocalSubstrate)` - The configured substrate
    /// * `Err(SubstrateError)` - If the configuration requests zero partitions
    pub fn with_config(config: LocalSubstrateConfig) -> Result<Self, SubstrateError> {
        if config.partitions == 0 {
            return Err(SubstrateError::invalid_configuration(
                "partitions must be at least 1",
            ));
        }
        Ok(Self { config })
    }

    /// The configuration this substrate runs with.
    pub fn config(&self) -> &LocalSubstrateConfig {
        &self.config
    }
}

impl Default for LocalSubstrate {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Substrate for LocalSubstrate {
    fn partitions(&self) -> usize {
        self.config.partitions
    }

    fn parallelize<T>(&self, items: Vec<T>) -> Dataset<T>
    where
        T: Send + Sync + 'static,
    {
        let partitions = self.config.partitions;
        let chunk_size = items.len().div_ceil(partitions).max(1);

        let mut remaining = items.into_iter();
        let chunks: Vec<Vec<T>> = (0..partitions)
            .map(|_| remaining.by_ref().take(chunk_size).collect())
            .collect();

        Dataset::from_partitions(chunks)
    }

    async fn map<T, U, F>(&self, input: &Dataset<T>, f: F) -> Result<Dataset<U>, SubstrateError>
    where
        T: Send + Sync + 'static,
        U: Send + Sync + 'static,
        F: Fn(&T) -> U + Send + Sync + 'static,
    {
        let mapped = run_partitions(
            "map",
            input.partitions().to_vec(),
            move |partition: Arc<Vec<T>>| partition.iter().map(&f).collect::<Vec<U>>(),
        )
        .await?;

        Ok(Dataset::from_partitions(mapped))
    }

    async fn flat_map<T, U, I, F>(
        &self,
        input: &Dataset<T>,
        f: F,
    ) -> Result<Dataset<U>, SubstrateError>
    where
        T: Send + Sync + 'static,
        U: Send + Sync + 'static,
        I: IntoIterator<Item = U>,
        F: Fn(&T) -> I + Send + Sync + 'static,
    {
        let flattened = run_partitions(
            "flat_map",
            input.partitions().to_vec(),
            move |partition: Arc<Vec<T>>| partition.iter().flat_map(&f).collect::<Vec<U>>(),
        )
        .await?;

        Ok(Dataset::from_partitions(flattened))
    }

    async fn reduce_by_key<K, V, F>(
        &self,
        input: &Dataset<(K, V)>,
        op: F,
    ) -> Result<Dataset<(K, V)>, SubstrateError>
    where
        K: Hash + Eq + Clone + Send + Sync + 'static,
        V: Clone + Send + Sync + 'static,
        F: Fn(V, V) -> V + Send + Sync + 'static,
    {
        let buckets = self.config.partitions;
        let op = Arc::new(op);

        let combine_op = Arc::clone(&op);
        let combined = run_partitions(
            "reduce_by_key:combine",
            input.partitions().to_vec(),
            move |partition: Arc<Vec<(K, V)>>| {
                let mut local: HashMap<K, V> = HashMap::new();
                for (key, value) in partition.iter() {
                    combine_into(&mut local, key.clone(), value.clone(), combine_op.as_ref());
                }
                scatter(local, buckets, |record: &(K, V)| bucket_for(&record.0, buckets))
            },
        )
        .await?;

        let merged = run_partitions(
            "reduce_by_key:merge",
            gather(combined, buckets),
            move |bucket: Vec<(K, V)>| {
                let mut reduced: HashMap<K, V> = HashMap::new();
                for (key, value) in bucket {
                    combine_into(&mut reduced, key, value, op.as_ref());
                }
                reduced.into_iter().collect::<Vec<(K, V)>>()
            },
        )
        .await?;

        let output = Dataset::from_partitions(merged);
        debug!(
            input_records = input.len(),
            output_keys = output.len(),
            "reduce_by_key complete"
        );
        Ok(output)
    }

    async fn distinct<T>(&self, input: &Dataset<T>) -> Result<Dataset<T>, SubstrateError>
    where
        T: Hash + Eq + Clone + Send + Sync + 'static,
    {
        let buckets = self.config.partitions;

        let scattered = run_partitions(
            "distinct:combine",
            input.partitions().to_vec(),
            move |partition: Arc<Vec<T>>| {
                let unique: HashSet<T> = partition.iter().cloned().collect();
                scatter(unique, buckets, |item: &T| bucket_for(item, buckets))
            },
        )
        .await?;

        let deduplicated = run_partitions(
            "distinct:merge",
            gather(scattered, buckets),
            |bucket: Vec<T>| {
                bucket
                    .into_iter()
                    .collect::<HashSet<T>>()
                    .into_iter()
                    .collect::<Vec<T>>()
            },
        )
        .await?;

        let output = Dataset::from_partitions(deduplicated);
        debug!(
            input_records = input.len(),
            output_records = output.len(),
            "distinct complete"
        );
        Ok(output)
    }

    async fn reduce<T, F>(&self, input: &Dataset<T>, op: F) -> Result<Option<T>, SubstrateError>
    where
        T: Clone + Send + Sync + 'static,
        F: Fn(T, T) -> T + Send + Sync + 'static,
    {
        let op = Arc::new(op);

        let partial_op = Arc::clone(&op);
        let partials = run_partitions(
            "reduce",
            input.partitions().to_vec(),
            move |partition: Arc<Vec<T>>| partition.iter().cloned().reduce(|a, b| (*partial_op)(a, b)),
        )
        .await?;

        Ok(partials.into_iter().flatten().reduce(|a, b| (*op)(a, b)))
    }
}

/// Run `task` once per input partition on the blocking pool and wait for all of them.
///
/// The first failed partition fails the whole stage.
async fn run_partitions<P, U, F>(
    operation: &'static str,
    inputs: Vec<P>,
    task: F,
) -> Result<Vec<U>, SubstrateError>
where
    P: Send + 'static,
    U: Send + 'static,
    F: Fn(P) -> U + Send + Sync + 'static,
{
    let task = Arc::new(task);
    let partitions = inputs.into_iter().enumerate().map(|(partition, input)| {
        let task = Arc::clone(&task);
        async move {
            tokio::task::spawn_blocking(move || (*task)(input))
                .await
                .map_err(|e| {
                    SubstrateError::partition_failed(operation, partition, join_error_message(e))
                })
        }
    });

    try_join_all(partitions).await
}

fn combine_into<K, V, F>(map: &mut HashMap<K, V>, key: K, value: V, op: &F)
where
    K: Hash + Eq,
    F: Fn(V, V) -> V + ?Sized,
{
    let combined = match map.remove(&key) {
        Some(existing) => op(existing, value),
        None => value,
    };
    map.insert(key, combined);
}

fn join_error_message(err: JoinError) -> String {
    if !err.is_panic() {
        return err.to_string();
    }

    let payload = err.into_panic();
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "partition task panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn substrate(partitions: usize) -> LocalSubstrate {
        LocalSubstrate::with_config(LocalSubstrateConfig::with_partitions(partitions)).unwrap()
    }

    fn sorted<T: Ord>(mut items: Vec<T>) -> Vec<T> {
        items.sort();
        items
    }

    #[test]
    fn test_zero_partitions_is_rejected() {
        let result = LocalSubstrate::with_config(LocalSubstrateConfig::with_partitions(0));
        assert!(matches!(
            result,
            Err(SubstrateError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_parallelize_spreads_items() {
        let substrate = substrate(3);
        let dataset = substrate.parallelize((0u64..10).collect());

        assert_eq!(dataset.num_partitions(), 3);
        assert_eq!(dataset.len(), 10);
        assert_eq!(dataset.to_vec(), (0u64..10).collect::<Vec<_>>());
        assert!(dataset.partitions().iter().all(|p| p.len() <= 4));
    }

    #[test]
    fn test_parallelize_empty() {
        let substrate = substrate(4);
        let dataset = substrate.parallelize(Vec::<u64>::new());
        assert_eq!(dataset.num_partitions(), 4);
        assert!(dataset.is_empty());
    }

    #[tokio::test]
    async fn test_map_one_output_per_input() {
        let substrate = substrate(2);
        let dataset = substrate.parallelize(vec![1u64, 2, 3]);

        let mapped = substrate.map(&dataset, |n| n + 10).await.unwrap();

        assert_eq!(mapped.to_vec(), vec![11, 12, 13]);
        assert_eq!(dataset.to_vec(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_flat_map_flattens() {
        let substrate = substrate(2);
        let dataset = substrate.parallelize(vec![0u64, 1, 2, 3]);

        let expanded = substrate
            .flat_map(&dataset, |n| vec![*n; *n as usize])
            .await
            .unwrap();

        assert_eq!(expanded.to_vec(), vec![1, 2, 2, 3, 3, 3]);
    }

    #[tokio::test]
    async fn test_reduce_by_key_merges_across_partitions() {
        let substrate = substrate(3);
        let dataset = substrate.parallelize(vec![
            (1u64, 10u64),
            (2, 1),
            (1, 5),
            (3, 7),
            (2, 2),
            (1, 1),
        ]);

        let reduced = substrate
            .reduce_by_key(&dataset, |a, b| a + b)
            .await
            .unwrap();

        assert_eq!(sorted(reduced.to_vec()), vec![(1, 16), (2, 3), (3, 7)]);
        assert_eq!(reduced.num_partitions(), 3);
    }

    #[tokio::test]
    async fn test_reduce_by_key_with_list_values() {
        let substrate = substrate(2);
        let dataset = substrate.parallelize(vec![(1u64, vec![2u64]), (1, vec![3]), (4, vec![5])]);

        let reduced = substrate
            .reduce_by_key(&dataset, |mut a, mut b| {
                a.append(&mut b);
                a
            })
            .await
            .unwrap();

        let mut grouped: Vec<(u64, Vec<u64>)> = reduced
            .to_vec()
            .into_iter()
            .map(|(key, values)| (key, sorted(values)))
            .collect();
        grouped.sort();
        assert_eq!(grouped, vec![(1, vec![2, 3]), (4, vec![5])]);
    }

    #[tokio::test]
    async fn test_distinct_removes_duplicates_across_partitions() {
        let substrate = substrate(4);
        let dataset = substrate.parallelize(vec![(1u64, 2u64), (2, 1), (1, 2), (3, 4), (1, 2)]);

        let unique = substrate.distinct(&dataset).await.unwrap();

        assert_eq!(sorted(unique.to_vec()), vec![(1, 2), (2, 1), (3, 4)]);
    }

    #[tokio::test]
    async fn test_reduce_sums_everything() {
        let substrate = substrate(3);
        let dataset = substrate.parallelize((1u64..=100).collect());

        let total = substrate.reduce(&dataset, |a, b| a + b).await.unwrap();

        assert_eq!(total, Some(5050));
    }

    #[tokio::test]
    async fn test_reduce_empty_is_none() {
        let substrate = substrate(2);
        let dataset = substrate.parallelize(Vec::<u64>::new());

        let total = substrate.reduce(&dataset, |a, b| a + b).await.unwrap();

        assert_eq!(total, None);
    }

    #[tokio::test]
    async fn test_panicking_partition_fails_operation() {
        let substrate = substrate(2);
        let dataset = substrate.parallelize(vec![1u64, 2, 3, 4]);

        let result = substrate
            .map(&dataset, |n| {
                if *n == 4 {
                    panic!("lost partition");
                }
                *n
            })
            .await;

        match result {
            Err(SubstrateError::PartitionFailed {
                operation,
                partition,
                message,
            }) => {
                assert_eq!(operation, "map");
                assert_eq!(partition, 1);
                assert_eq!(message, "lost partition");
            }
            other => panic!("Expected PartitionFailed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_panicking_reduce_operator_names_stage() {
        let substrate = substrate(2);
        let dataset = substrate.parallelize(vec![(1u64, 1u64), (1, 2)]);

        let err = substrate
            .reduce_by_key(&dataset, |_, _| -> u64 { panic!("combine failed") })
            .await
            .unwrap_err();

        assert!(err.operation().unwrap().starts_with("reduce_by_key"));
    }
}
