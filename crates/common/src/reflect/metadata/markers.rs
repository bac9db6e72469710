//! Field markers
//!
//! Declarative tags attached to fields through
//! [`impl_described!`](crate::impl_described). They carry no behavior;
//! [`annotations`](super::annotations) and downstream code interpret them.

use std::fmt;

/// Metadata tag on a described field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    /// Field holds the object's identifier
    Id,
    /// Field contributes to the object's display name
    Name,
    /// Display label, overriding the beautified field name
    Label(&'static str),
    /// Free-form description
    Description(&'static str),
    /// Sort position; unmarked fields sort last
    Order(i32),
    /// Field must not be edited by consumers
    ReadOnly,
    /// Whether consumers should show the field
    Visible(bool),
    /// Arbitrary grouping tag
    Tag(&'static str),
    /// Creation timestamp
    Timestamp,
    /// Last modification timestamp
    ModifiedAt,
    /// Who last modified the object
    ModifiedBy,
    /// Shared by all instances rather than per-object state
    Static,
}

/// Which audit role a timestamp-like field plays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimestampKind {
    Created,
    ModifiedAt,
    ModifiedBy,
}

impl Marker {
    /// The audit role this marker assigns, if any
    pub fn timestamp_kind(&self) -> Option<TimestampKind> {
        match self {
            Self::Timestamp => Some(TimestampKind::Created),
            Self::ModifiedAt => Some(TimestampKind::ModifiedAt),
            Self::ModifiedBy => Some(TimestampKind::ModifiedBy),
            _ => None,
        }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id => write!(f, "Id"),
            Self::Name => write!(f, "Name"),
            Self::Label(label) => write!(f, "Label({label})"),
            Self::Description(text) => write!(f, "Description({text})"),
            Self::Order(order) => write!(f, "Order({order})"),
            Self::ReadOnly => write!(f, "ReadOnly"),
            Self::Visible(visible) => write!(f, "Visible({visible})"),
            Self::Tag(tag) => write!(f, "Tag({tag})"),
            Self::Timestamp => write!(f, "Timestamp"),
            Self::ModifiedAt => write!(f, "ModifiedAt"),
            Self::ModifiedBy => write!(f, "ModifiedBy"),
            Self::Static => write!(f, "Static"),
        }
    }
}
