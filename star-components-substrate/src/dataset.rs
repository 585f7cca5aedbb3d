//! Partitioned immutable collection.
//!
//! A `Dataset` is one snapshot of a distributed collection. Partitions are
//! reference counted, so cloning a dataset never copies its elements and no
//! operation can mutate a snapshot another holder still observes.

use std::sync::Arc;

/// An immutable collection split into partitions.
#[derive(Debug)]
pub struct Dataset<T> {
    partitions: Vec<Arc<Vec<T>>>,
}

impl<T> Clone for Dataset<T> {
    fn clone(&self) -> Self {
        Self {
            partitions: self.partitions.clone(),
        }
    }
}

impl<T> Default for Dataset<T> {
    fn default() -> Self {
        Self {
            partitions: Vec::new(),
        }
    }
}

impl<T> Dataset<T> {
    /// Create a dataset from already partitioned elements.
    pub fn from_partitions(partitions: Vec<Vec<T>>) -> Self {
        Self {
            partitions: partitions.into_iter().map(Arc::new).collect(),
        }
    }

    /// The partitions of this dataset.
    pub fn partitions(&self) -> &[Arc<Vec<T>>] {
        &self.partitions
    }

    /// Number of partitions, including empty ones.
    pub fn num_partitions(&self) -> usize {
        self.partitions.len()
    }

    /// Total number of elements across all partitions.
    pub fn len(&self) -> usize {
        self.partitions.iter().map(|partition| partition.len()).sum()
    }

    /// Returns true if no partition holds any element.
    pub fn is_empty(&self) -> bool {
        self.partitions.iter().all(|partition| partition.is_empty())
    }

    /// Iterate over all elements, partition by partition.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.partitions.iter().flat_map(|partition| partition.iter())
    }

    /// Collect all elements into a local vector.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_len_and_partitions() {
        let dataset = Dataset::from_partitions(vec![vec![1, 2], vec![], vec![3]]);
        assert_eq!(dataset.num_partitions(), 3);
        assert_eq!(dataset.len(), 3);
        assert!(!dataset.is_empty());
        assert_eq!(dataset.to_vec(), vec![1, 2, 3]);
    }

    #[test]
    fn test_empty_dataset() {
        let dataset: Dataset<u64> = Dataset::from_partitions(vec![vec![], vec![]]);
        assert!(dataset.is_empty());
        assert_eq!(dataset.len(), 0);
        assert!(Dataset::<u64>::default().is_empty());
    }

    #[test]
    fn test_clone_shares_partitions() {
        let dataset = Dataset::from_partitions(vec![vec![String::from("a")]]);
        let cloned = dataset.clone();
        assert!(Arc::ptr_eq(&dataset.partitions()[0], &cloned.partitions()[0]));
    }
}
