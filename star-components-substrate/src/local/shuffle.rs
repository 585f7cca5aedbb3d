//! Hash shuffle helpers.
//!
//! Records are routed to output partitions by the hash of their key, so every
//! record sharing a key lands in the same partition regardless of which input
//! partition produced it.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Output partition for `key` among `buckets` partitions.
pub(crate) fn bucket_for<K: Hash + ?Sized>(key: &K, buckets: usize) -> usize {
    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);
    (hasher.finish() % buckets as u64) as usize
}

/// Split records into `buckets` lists, routing each record to `bucket_of(record)`.
pub(crate) fn scatter<T, I, F>(records: I, buckets: usize, bucket_of: F) -> Vec<Vec<T>>
where
    I: IntoIterator<Item = T>,
    F: Fn(&T) -> usize,
{
    let mut scattered: Vec<Vec<T>> = (0..buckets).map(|_| Vec::new()).collect();
    for record in records {
        let bucket = bucket_of(&record);
        scattered[bucket].push(record);
    }
    scattered
}

/// Merge the scattered output of every source partition bucket by bucket.
pub(crate) fn gather<T>(scattered: Vec<Vec<Vec<T>>>, buckets: usize) -> Vec<Vec<T>> {
    let mut gathered: Vec<Vec<T>> = (0..buckets).map(|_| Vec::new()).collect();
    for source in scattered {
        for (bucket, records) in source.into_iter().enumerate() {
            gathered[bucket].extend(records);
        }
    }
    gathered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_for_is_stable() {
        for key in 0u64..100 {
            let bucket = bucket_for(&key, 7);
            assert!(bucket < 7);
            assert_eq!(bucket, bucket_for(&key, 7));
        }
    }

    #[test]
    fn test_scatter_routes_equal_keys_together() {
        let records = vec![(1u64, 'a'), (2, 'b'), (1, 'c'), (3, 'd'), (2, 'e')];
        let scattered = scatter(records, 4, |record: &(u64, char)| bucket_for(&record.0, 4));

        assert_eq!(scattered.len(), 4);
        for (index, bucket) in scattered.iter().enumerate() {
            for (key, _) in bucket {
                assert_eq!(bucket_for(key, 4), index);
            }
        }
        assert_eq!(scattered.iter().map(Vec::len).sum::<usize>(), 5);
    }

    #[test]
    fn test_gather_concatenates_matching_buckets() {
        let scattered = vec![vec![vec![1], vec![2]], vec![vec![3], vec![]]];
        let gathered = gather(scattered, 2);
        assert_eq!(gathered, vec![vec![1, 3], vec![2]]);
    }
}
