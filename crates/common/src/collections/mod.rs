//! Collection helpers
//!
//! Small, allocation-conscious helpers over slices and iterators:
//! order-preserving de-duplication, batching, keyed maps and groups, and
//! [`immutable`] for handing out shared read-only views.
//!
//! ```rust
//! use cornerstone_common::collections::{distinct, partition_by};
//!
//! assert_eq!(distinct(vec![3, 1, 3, 2, 1]), vec![3, 1, 2]);
//! assert_eq!(partition_by(&[1, 2, 3, 4, 5], 2).unwrap(), vec![vec![1, 2], vec![3, 4], vec![5]]);
//! ```

use std::collections::{BTreeMap, HashMap, HashSet};
use std::hash::Hash;
use std::sync::Arc;

use crate::error::CommonResult;
use crate::validation::require_positive;

/// Whether an optional slice is absent or empty
pub fn is_empty_slice<T>(values: Option<&[T]>) -> bool {
    values.map_or(true, <[T]>::is_empty)
}

/// First element, if any
pub fn first<T>(values: &[T]) -> Option<&T> {
    values.first()
}

/// Last element, if any
pub fn last<T>(values: &[T]) -> Option<&T> {
    values.last()
}

/// Drops repeated values, keeping the first occurrence of each
pub fn distinct<T, I>(values: I) -> Vec<T>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = T>,
{
    let mut seen = HashSet::new();
    values.into_iter().filter(|value| seen.insert(value.clone())).collect()
}

/// Splits `values` into batches of at most `size` elements
pub fn partition_by<T: Clone>(values: &[T], size: usize) -> CommonResult<Vec<Vec<T>>> {
    let size = require_positive(size, "size")?;
    Ok(values.chunks(size).map(<[T]>::to_vec).collect())
}

/// Freezes a vector into a cheaply clonable, read-only slice
pub fn immutable<T>(values: Vec<T>) -> Arc<[T]> {
    Arc::from(values)
}

/// Indexes values by key; later values replace earlier ones with the same key
pub fn to_map<K, V, I, F>(values: I, key: F) -> HashMap<K, V>
where
    K: Eq + Hash,
    I: IntoIterator<Item = V>,
    F: Fn(&V) -> K,
{
    values.into_iter().map(|value| (key(&value), value)).collect()
}

/// Groups values by key, keys sorted, values in encounter order
pub fn group_by<K, V, I, F>(values: I, key: F) -> BTreeMap<K, Vec<V>>
where
    K: Ord,
    I: IntoIterator<Item = V>,
    F: Fn(&V) -> K,
{
    let mut groups: BTreeMap<K, Vec<V>> = BTreeMap::new();
    for value in values {
        groups.entry(key(&value)).or_default().push(value);
    }
    groups
}

/// Whether the two slices share at least one element
pub fn intersects<T: Eq + Hash>(left: &[T], right: &[T]) -> bool {
    let (small, large) = if left.len() <= right.len() { (left, right) } else { (right, left) };
    let index: HashSet<&T> = small.iter().collect();
    large.iter().any(|value| index.contains(value))
}
