//! Substrate trait definition.
//!
//! This module defines the abstract interface for the distributed primitives,
//! allowing for different backend implementations (in-process, cluster, etc.).

use std::hash::Hash;

use async_trait::async_trait;

use crate::dataset::Dataset;
use crate::errors::SubstrateError;

/// Abstracts the underlying data-parallel execution engine.
///
/// Every operation consumes an immutable `Dataset` snapshot and either produces
/// a new snapshot or a scalar. An operation resolves only once every partition
/// has completed, so awaiting it is a full materialization point.
///
/// Operators passed to `reduce_by_key` and `reduce` must be associative and
/// commutative: implementations are free to combine values in any grouping and
/// any order across partitions.
///
/// All methods return `Result<T, SubstrateError>`; a single failed partition
/// fails the whole operation.
#[async_trait]
pub trait Substrate: Send + Sync {
    /// Number of partitions new datasets are split into.
    fn partitions(&self) -> usize;

    /// Distribute a local collection across the substrate's partitions.
    fn parallelize<T>(&self, items: Vec<T>) -> Dataset<T>
    where
        T: Send + Sync + 'static;

    /// Apply `f` to every element, producing exactly one output per input.
    async fn map<T, U, F>(&self, input: &Dataset<T>, f: F) -> Result<Dataset<U>, SubstrateError>
    where
        T: Send + Sync + 'static,
        U: Send + Sync + 'static,
        F: Fn(&T) -> U + Send + Sync + 'static;

    /// Apply `f` to every element, producing zero or more outputs per input,
    /// flattened into one collection.
    async fn flat_map<T, U, I, F>(
        &self,
        input: &Dataset<T>,
        f: F,
    ) -> Result<Dataset<U>, SubstrateError>
    where
        T: Send + Sync + 'static,
        U: Send + Sync + 'static,
        I: IntoIterator<Item = U>,
        F: Fn(&T) -> I + Send + Sync + 'static;

    /// Group elements by key and combine all values sharing a key with `op`.
    ///
    /// The output holds exactly one element per distinct key.
    async fn reduce_by_key<K, V, F>(
        &self,
        input: &Dataset<(K, V)>,
        op: F,
    ) -> Result<Dataset<(K, V)>, SubstrateError>
    where
        K: Hash + Eq + Clone + Send + Sync + 'static,
        V: Clone + Send + Sync + 'static,
        F: Fn(V, V) -> V + Send + Sync + 'static;

    /// Remove duplicate elements.
    async fn distinct<T>(&self, input: &Dataset<T>) -> Result<Dataset<T>, SubstrateError>
    where
        T: Hash + Eq + Clone + Send + Sync + 'static;

    /// Reduce the whole collection to a single value with `op`.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(value))` - The reduction of a non-empty collection
    /// * `Ok(None)` - If the collection is empty
    /// * `Err(SubstrateError)` - If any partition fails
    async fn reduce<T, F>(&self, input: &Dataset<T>, op: F) -> Result<Option<T>, SubstrateError>
    where
        T: Clone + Send + Sync + 'static,
        F: Fn(T, T) -> T + Send + Sync + 'static;
}
