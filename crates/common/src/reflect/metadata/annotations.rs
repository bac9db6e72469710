//! Reading markers back out of described objects

use super::{cache, Described, FieldDescriptor, TimestampKind};
use crate::text::strings::append;

/// Value of the first `Id` field
pub fn id_of<T: Described>(object: &T) -> Option<String> {
    cache::fields::<T>(true)
        .iter()
        .find(|field| field.is_id())
        .and_then(|field| object.field_value(field.name()))
}

/// Display name of `object`
///
/// Values of `Name` fields in declaration order, joined with the type's
/// glue. Empty values are skipped. Falls back to the id when no name field
/// has a value.
pub fn name_of<T: Described>(object: &T) -> Option<String> {
    let glue = cache::descriptor::<T>().glue_str();
    let mut name = String::new();
    for field in cache::fields::<T>(true).iter().filter(|field| field.is_name()) {
        if let Some(value) = object.field_value(field.name()) {
            append(&mut name, value.trim(), glue);
        }
    }
    if name.is_empty() {
        id_of(object)
    } else {
        Some(name)
    }
}

/// Label of `T`: the declared one, else the beautified type name
pub fn label_of<T: Described>() -> String {
    cache::descriptor::<T>().display_label()
}

/// Whether `T` is marked as a provider
pub fn is_provider<T: Described>() -> bool {
    cache::descriptor::<T>().is_provider()
}

/// Instance fields sorted by `Order`; ties keep declaration order
pub fn ordered_fields<T: Described>() -> Vec<FieldDescriptor> {
    let mut fields = cache::fields::<T>(false).to_vec();
    fields.sort_by_key(FieldDescriptor::order);
    fields
}

/// Ordered fields not marked `Visible(false)`
pub fn visible_fields<T: Described>() -> Vec<FieldDescriptor> {
    ordered_fields::<T>().into_iter().filter(FieldDescriptor::is_visible).collect()
}

/// Ordered fields marked `ReadOnly`
pub fn read_only_fields<T: Described>() -> Vec<FieldDescriptor> {
    ordered_fields::<T>().into_iter().filter(FieldDescriptor::is_read_only).collect()
}

/// First field playing the given audit role
pub fn timestamp_field<T: Described>(kind: TimestampKind) -> Option<FieldDescriptor> {
    cache::fields::<T>(false).iter().find(|field| field.timestamp_kind() == Some(kind)).cloned()
}

/// Ordered fields carrying `tag`
pub fn tagged_fields<T: Described>(tag: &str) -> Vec<FieldDescriptor> {
    ordered_fields::<T>().into_iter().filter(|field| field.has_tag(tag)).collect()
}

/// `(label, value)` pairs of the visible fields that have a value
pub fn visible_values<T: Described>(object: &T) -> Vec<(String, String)> {
    visible_fields::<T>()
        .into_iter()
        .filter_map(|field| object.field_value(field.name()).map(|value| (field.label(), value)))
        .collect()
}
