//! Macros for reducing boilerplate code
//!
//! - [`impl_enumerated!`](crate::impl_enumerated): name/alias tables for
//!   unit enums
//! - [`impl_described!`](crate::impl_described): field metadata for structs
//! - [`impl_status_conversions!`](crate::impl_status_conversions):
//!   `Display`/`FromStr` for status enums

/// Implements [`Enumerated`](crate::reflect::enums::Enumerated) for a unit
/// enum
///
/// Each variant maps to its canonical name, optionally followed by a
/// bracketed alias list. Variants are listed in ordinal order.
///
/// ```rust
/// use cornerstone_common::impl_enumerated;
/// use cornerstone_common::reflect::enums::{from_name, Enumerated};
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// enum Color {
///     Red,
///     Green,
/// }
///
/// impl_enumerated!(Color {
///     Red => "RED" ["crimson"],
///     Green => "GREEN",
/// });
///
/// assert_eq!(Color::Green.ordinal(), 1);
/// assert_eq!(from_name::<Color>("Crimson").unwrap(), Color::Red);
/// ```
#[macro_export]
macro_rules! impl_enumerated {
    ($enum_name:ty {
        $($variant:ident => $name:literal $([$($alias:literal),* $(,)?])?),+ $(,)?
    }) => {
        impl $crate::reflect::enums::Enumerated for $enum_name {
            fn variants() -> &'static [Self] {
                &[$(Self::$variant),+]
            }

            fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)+
                }
            }

            fn aliases(&self) -> &'static [&'static str] {
                match self {
                    $(Self::$variant => &[$($($alias),*)?],)+
                }
            }
        }
    };
}

/// Implements [`Described`](crate::reflect::metadata::Described) for a
/// struct
///
/// Fields are listed with their [`Marker`](crate::reflect::metadata::Marker)s
/// (variant names, no path). Every listed field must implement
/// [`FieldValue`](crate::reflect::metadata::FieldValue).
///
/// An optional `: Parent => field` clause inherits the metadata of an
/// embedded `Described` value; lookups of unknown fields are forwarded to
/// it. Trailing [`TypeDescriptor`](crate::reflect::metadata::TypeDescriptor)
/// builder calls set type-level metadata.
///
/// ```rust
/// use cornerstone_common::impl_described;
/// use cornerstone_common::reflect::metadata::annotations::{label_of, name_of};
///
/// struct Audit {
///     modified_by: String,
/// }
///
/// impl_described!(Audit {
///     modified_by => [ModifiedBy, ReadOnly],
/// });
///
/// struct Invoice {
///     number: String,
///     customer: String,
///     audit: Audit,
/// }
///
/// impl_described!(Invoice: Audit => audit {
///     number => [Id, Name, Order(1)],
///     customer => [Name, Label("Billed to")],
/// } glue(" / "), label("Customer invoice"));
///
/// let invoice = Invoice {
///     number: "INV-7".into(),
///     customer: "ACME".into(),
///     audit: Audit { modified_by: "ops".into() },
/// };
/// assert_eq!(name_of(&invoice).as_deref(), Some("INV-7 / ACME"));
/// assert_eq!(label_of::<Invoice>(), "Customer invoice");
/// ```
#[macro_export]
macro_rules! impl_described {
    (@parent $self:ident, $field:ident) => {
        None
    };
    (@parent $self:ident, $field:ident, $via:ident) => {
        $crate::reflect::metadata::Described::field_value(&$self.$via, $field)
    };
    ($type_name:ty $(: $parent:ty => $via:ident)? {
        $($field:ident => [$($marker:expr),* $(,)?]),* $(,)?
    } $($method:ident($($arg:expr),*)),* $(,)?) => {
        impl $crate::reflect::metadata::Described for $type_name {
            fn descriptor() -> $crate::reflect::metadata::TypeDescriptor {
                #[allow(unused_imports)]
                use $crate::reflect::metadata::Marker::*;

                $crate::reflect::metadata::TypeDescriptor::new::<Self>()
                    $(.with_parent::<$parent>())?
                    $(.field($crate::reflect::metadata::FieldDescriptor::new::<Self>(
                        stringify!($field),
                        {
                            const MARKERS: &[$crate::reflect::metadata::Marker] = &[$($marker),*];
                            MARKERS
                        },
                    )))*
                    $(.$method($($arg),*))*
            }

            #[allow(unused_variables)]
            fn field_value(&self, field: &str) -> Option<String> {
                match field {
                    $(stringify!($field) => {
                        $crate::reflect::metadata::FieldValue::to_field_value(&self.$field)
                    })*
                    _ => $crate::impl_described!(@parent self, field $(, $via)?),
                }
            }
        }
    };
}

/// Implements `Display` and `FromStr` for status enums
///
/// Display writes the mapped string; parsing is case-insensitive and fails
/// with [`CommonError::Parse`](crate::error::CommonError::Parse).
///
/// # Example
///
/// ```rust
/// use cornerstone_common::impl_status_conversions;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// pub enum LatchState {
///     Waiting,
///     Released,
///     TimedOut,
/// }
///
/// impl_status_conversions!(LatchState {
///     Waiting => "waiting",
///     Released => "released",
///     TimedOut => "timed_out",
/// });
///
/// assert_eq!(LatchState::TimedOut.to_string(), "timed_out");
/// assert_eq!("RELEASED".parse::<LatchState>().unwrap(), LatchState::Released);
/// ```
#[macro_export]
macro_rules! impl_status_conversions {
    ($enum_name:ident { $($variant:ident => $str:literal),+ $(,)? }) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Self::$variant => f.write_str($str),)+
                }
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = $crate::error::CommonError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err($crate::error::CommonError::parse(
                        stringify!($enum_name),
                        s,
                        "unknown value",
                    )),
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    //! Unit tests for utils::macros.
    use std::str::FromStr;

    use crate::error::CommonError;
    use crate::reflect::enums::{self, Enumerated};
    use crate::reflect::metadata::annotations;
    use crate::reflect::metadata::{cache, Described, TimestampKind};

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum TestStatus {
        Pending,
        Completed,
        Failed,
    }

    impl_status_conversions!(TestStatus {
        Pending => "pending",
        Completed => "completed",
        Failed => "failed",
    });

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Priority {
        Low,
        Urgent,
    }

    impl_enumerated!(Priority {
        Low => "LOW",
        Urgent => "URGENT" ["asap", "p0",],
    });

    struct Entity {
        uuid: String,
        updated_at: Option<String>,
    }

    impl_described!(Entity {
        uuid => [Id, ReadOnly],
        updated_at => [ModifiedAt],
    });

    struct Task {
        title: String,
        priority: u8,
        entity: Entity,
    }

    impl_described!(Task: Entity => entity {
        title => [Name, Order(1), Tag("summary")],
        priority => [Order(0), Visible(false)],
    } provider(), tag("work"));

    fn task() -> Task {
        Task {
            title: "Write docs".to_string(),
            priority: 2,
            entity: Entity { uuid: "t-1".to_string(), updated_at: None },
        }
    }

    #[test]
    fn test_status_display_and_parse() {
        assert_eq!(TestStatus::Completed.to_string(), "completed");
        assert_eq!(TestStatus::from_str("PENDING").unwrap(), TestStatus::Pending);
        assert_eq!(TestStatus::from_str(" Failed ").unwrap(), TestStatus::Failed);
    }

    #[test]
    fn test_status_parse_error() {
        let err = TestStatus::from_str("unknown").unwrap_err();
        assert!(matches!(err, CommonError::Parse { ref kind, .. } if kind == "TestStatus"));
    }

    #[test]
    fn test_enumerated_macro() {
        assert_eq!(Priority::variants(), &[Priority::Low, Priority::Urgent]);
        assert_eq!(Priority::Urgent.name(), "URGENT");
        assert_eq!(Priority::Urgent.aliases(), &["asap", "p0"]);
        assert!(Priority::Low.aliases().is_empty());
        assert_eq!(Priority::Urgent.ordinal(), 1);
        assert_eq!(enums::from_name::<Priority>("ASAP").unwrap(), Priority::Urgent);
    }

    #[test]
    fn test_described_macro_fields() {
        let descriptor = Task::descriptor();
        assert_eq!(descriptor.type_name(), "Task");
        assert!(descriptor.is_provider());
        assert_eq!(descriptor.tags(), &["work"]);
        assert_eq!(descriptor.parent().map(|p| p.type_name()), Some("Entity"));

        let names: Vec<_> = cache::fields::<Task>(false).iter().map(|f| f.name()).collect();
        assert_eq!(names, vec!["title", "priority", "uuid", "updated_at"]);
    }

    #[test]
    fn test_described_macro_values() {
        let task = task();
        assert_eq!(task.field_value("title").as_deref(), Some("Write docs"));
        assert_eq!(task.field_value("priority").as_deref(), Some("2"));
        assert_eq!(task.field_value("uuid").as_deref(), Some("t-1"));
        assert_eq!(task.field_value("updated_at"), None);
        assert_eq!(task.field_value("nope"), None);
    }

    #[test]
    fn test_described_macro_with_annotations() {
        let task = task();
        assert_eq!(annotations::id_of(&task).as_deref(), Some("t-1"));
        assert_eq!(annotations::name_of(&task).as_deref(), Some("Write docs"));
        assert!(annotations::is_provider::<Task>());
        let visible: Vec<_> =
            annotations::visible_fields::<Task>().iter().map(|f| f.name()).collect();
        assert_eq!(visible, vec!["title", "uuid", "updated_at"]);
        assert_eq!(
            annotations::timestamp_field::<Task>(TimestampKind::ModifiedAt)
                .map(|f| f.declaring_type().to_string()),
            Some("Entity".to_string())
        );
    }
}
