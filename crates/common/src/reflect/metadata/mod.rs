//! Declarative field metadata
//!
//! A type describes itself through [`Described`]: a [`TypeDescriptor`]
//! listing its fields and their [`Marker`]s, plus access to field values
//! rendered as strings. [`impl_described!`](crate::impl_described)
//! generates both from a field list:
//!
//! ```rust
//! use cornerstone_common::impl_described;
//! use cornerstone_common::reflect::metadata::annotations::{id_of, name_of};
//!
//! struct Person {
//!     id: u64,
//!     first_name: String,
//!     last_name: String,
//! }
//!
//! impl_described!(Person {
//!     id => [Id, ReadOnly],
//!     first_name => [Name, Order(1)],
//!     last_name => [Name, Order(2)],
//! });
//!
//! let person = Person { id: 7, first_name: "Ada".into(), last_name: "Lovelace".into() };
//! assert_eq!(id_of(&person).as_deref(), Some("7"));
//! assert_eq!(name_of(&person).as_deref(), Some("Ada Lovelace"));
//! ```

pub mod annotations;
pub mod cache;
pub mod descriptor;
pub mod markers;

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use uuid::Uuid;

pub use descriptor::{FieldDescriptor, TypeDescriptor};
pub use markers::{Marker, TimestampKind};

/// Types that publish field metadata
pub trait Described: 'static {
    /// Metadata for the type, built fresh on each call
    ///
    /// Prefer [`cache::descriptor`], which builds it once.
    fn descriptor() -> TypeDescriptor;

    /// Value of the named field rendered as text, `None` when the field is
    /// unknown or unset
    fn field_value(&self, field: &str) -> Option<String>;
}

/// Types that announce themselves for discovery by external scanners
pub trait Provider: Described + Sized {
    /// Name the type is registered under
    fn provider_name() -> String {
        cache::descriptor::<Self>().type_name().to_string()
    }
}

/// Text rendering of a field value for [`Described::field_value`]
pub trait FieldValue {
    fn to_field_value(&self) -> Option<String>;
}

macro_rules! display_field_value {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl FieldValue for $ty {
                fn to_field_value(&self) -> Option<String> {
                    Some(self.to_string())
                }
            }
        )+
    };
}

display_field_value!(
    String, str, bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32,
    f64, Uuid
);

impl FieldValue for DateTime<Utc> {
    fn to_field_value(&self) -> Option<String> {
        Some(self.to_rfc3339())
    }
}

impl<T: FieldValue> FieldValue for Option<T> {
    fn to_field_value(&self) -> Option<String> {
        self.as_ref().and_then(FieldValue::to_field_value)
    }
}

impl<T: FieldValue + ?Sized> FieldValue for &T {
    fn to_field_value(&self) -> Option<String> {
        (**self).to_field_value()
    }
}

impl<T: FieldValue> FieldValue for BTreeSet<T> {
    fn to_field_value(&self) -> Option<String> {
        let parts: Vec<String> = self.iter().filter_map(FieldValue::to_field_value).collect();
        Some(parts.join(","))
    }
}
