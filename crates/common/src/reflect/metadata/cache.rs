//! Process-wide metadata cache
//!
//! Descriptors are keyed by [`TypeId`]; flattened field lists by
//! `(TypeId, include_statics)`. Entries are built on first use and never
//! change afterwards. Two threads racing on the same key both build equal
//! values; the first insert wins and the other copy is dropped.

use std::any::TypeId;
use std::sync::Arc;

use dashmap::DashMap;
use once_cell::sync::Lazy;
use tracing::debug;

use super::{Described, FieldDescriptor, TypeDescriptor};

static DESCRIPTORS: Lazy<DashMap<TypeId, Arc<TypeDescriptor>>> = Lazy::new(DashMap::new);
static FIELDS: Lazy<DashMap<(TypeId, bool), Arc<[FieldDescriptor]>>> = Lazy::new(DashMap::new);

/// Cached descriptor of `T`
pub fn descriptor<T: Described>() -> Arc<TypeDescriptor> {
    let key = TypeId::of::<T>();
    if let Some(existing) = DESCRIPTORS.get(&key) {
        return Arc::clone(existing.value());
    }

    let built = Arc::new(T::descriptor());
    debug!(
        type_name = built.type_name(),
        fields = built.declared_fields().len(),
        "Cached type descriptor"
    );
    Arc::clone(DESCRIPTORS.entry(key).or_insert(built).value())
}

/// Fields of `T` followed by those of its parent chain
///
/// Fields marked [`Static`](super::Marker::Static) are left out unless
/// `include_statics` is set.
pub fn fields<T: Described>(include_statics: bool) -> Arc<[FieldDescriptor]> {
    let key = (TypeId::of::<T>(), include_statics);
    if let Some(existing) = FIELDS.get(&key) {
        return Arc::clone(existing.value());
    }

    let descriptor = descriptor::<T>();
    let collected: Arc<[FieldDescriptor]> = descriptor
        .all_fields()
        .into_iter()
        .filter(|field| include_statics || !field.is_static())
        .collect();
    debug!(
        type_name = descriptor.type_name(),
        include_statics,
        fields = collected.len(),
        "Cached field list"
    );
    Arc::clone(FIELDS.entry(key).or_insert(collected).value())
}

/// Field `name` of `T`, searching own fields before inherited ones
pub fn field<T: Described>(name: &str) -> Option<FieldDescriptor> {
    fields::<T>(true).iter().find(|field| field.name() == name).cloned()
}

/// Drops every cached entry
pub fn clear() {
    DESCRIPTORS.clear();
    FIELDS.clear();
}

/// Number of types with a cached descriptor
pub fn cached_types() -> usize {
    DESCRIPTORS.len()
}
