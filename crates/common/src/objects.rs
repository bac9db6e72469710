//! Emptiness checks and defaults for values of any shape
//!
//! [`IsEmpty`] gives strings, collections and options one notion of "empty"
//! so argument checks and defaults work the same way for all of them.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

/// Values that can be empty
pub trait IsEmpty {
    /// Whether the value holds nothing
    fn is_empty_value(&self) -> bool;
}

impl IsEmpty for str {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl IsEmpty for String {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<T> IsEmpty for [T] {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<T> IsEmpty for Vec<T> {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<K, V, S> IsEmpty for HashMap<K, V, S> {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<T, S> IsEmpty for HashSet<T, S> {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<K, V> IsEmpty for BTreeMap<K, V> {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<T> IsEmpty for BTreeSet<T> {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

/// `None` is empty; `Some` is empty when its content is.
impl<T: IsEmpty> IsEmpty for Option<T> {
    fn is_empty_value(&self) -> bool {
        self.as_ref().map_or(true, |value| value.is_empty_value())
    }
}

impl<T: IsEmpty + ?Sized> IsEmpty for &T {
    fn is_empty_value(&self) -> bool {
        (**self).is_empty_value()
    }
}

/// Whether `value` is empty
pub fn is_empty<T: IsEmpty + ?Sized>(value: &T) -> bool {
    value.is_empty_value()
}

/// Whether `value` holds something
pub fn is_not_empty<T: IsEmpty + ?Sized>(value: &T) -> bool {
    !value.is_empty_value()
}

/// `value` unless it is empty, in which case `default`
///
/// ```
/// use cornerstone_common::objects::default_if_empty;
///
/// assert_eq!(default_if_empty("", "n/a"), "n/a");
/// assert_eq!(default_if_empty(vec![1], vec![2]), vec![1]);
/// ```
pub fn default_if_empty<T: IsEmpty>(value: T, default: T) -> T {
    if value.is_empty_value() {
        default
    } else {
        value
    }
}

/// First value in `values` that is not empty
pub fn first_non_empty<T, I>(values: I) -> Option<T>
where
    T: IsEmpty,
    I: IntoIterator<Item = T>,
{
    values.into_iter().find(|value| !value.is_empty_value())
}
