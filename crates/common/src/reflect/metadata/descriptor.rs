//! Type and field descriptors

use super::markers::{Marker, TimestampKind};
use super::Described;
use crate::reflect::types::simple_name;
use crate::text::strings::beautify;

/// Default separator for joining name fields
pub const DEFAULT_GLUE: &str = " ";

/// One declared field and its markers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    name: &'static str,
    declaring_type: String,
    markers: &'static [Marker],
}

impl FieldDescriptor {
    /// Field `name` declared on `T`
    pub fn new<T: ?Sized>(name: &'static str, markers: &'static [Marker]) -> Self {
        Self { name, declaring_type: simple_name::<T>(), markers }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Simple name of the type that declares the field
    pub fn declaring_type(&self) -> &str {
        &self.declaring_type
    }

    pub fn markers(&self) -> &'static [Marker] {
        self.markers
    }

    pub fn has(&self, marker: Marker) -> bool {
        self.markers.contains(&marker)
    }

    pub fn is_id(&self) -> bool {
        self.has(Marker::Id)
    }

    pub fn is_name(&self) -> bool {
        self.has(Marker::Name)
    }

    pub fn is_read_only(&self) -> bool {
        self.has(Marker::ReadOnly)
    }

    pub fn is_static(&self) -> bool {
        self.has(Marker::Static)
    }

    /// Declared label, or the beautified field name
    pub fn label(&self) -> String {
        self.markers
            .iter()
            .find_map(|marker| match marker {
                Marker::Label(label) => Some((*label).to_string()),
                _ => None,
            })
            .unwrap_or_else(|| beautify(self.name))
    }

    pub fn description(&self) -> Option<&'static str> {
        self.markers.iter().find_map(|marker| match marker {
            Marker::Description(text) => Some(*text),
            _ => None,
        })
    }

    /// Declared order, `i32::MAX` when unordered
    pub fn order(&self) -> i32 {
        self.markers
            .iter()
            .find_map(|marker| match marker {
                Marker::Order(order) => Some(*order),
                _ => None,
            })
            .unwrap_or(i32::MAX)
    }

    /// Visible unless marked `Visible(false)`
    pub fn is_visible(&self) -> bool {
        self.markers
            .iter()
            .find_map(|marker| match marker {
                Marker::Visible(visible) => Some(*visible),
                _ => None,
            })
            .unwrap_or(true)
    }

    pub fn tags(&self) -> Vec<&'static str> {
        self.markers
            .iter()
            .filter_map(|marker| match marker {
                Marker::Tag(tag) => Some(*tag),
                _ => None,
            })
            .collect()
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.markers.iter().any(|marker| matches!(marker, Marker::Tag(t) if *t == tag))
    }

    pub fn timestamp_kind(&self) -> Option<TimestampKind> {
        self.markers.iter().find_map(Marker::timestamp_kind)
    }
}

/// Type-level metadata plus the fields the type declares itself
///
/// Fields inherited through [`with_parent`](TypeDescriptor::with_parent)
/// stay on the parent descriptor; the metadata cache flattens the chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
    type_name: String,
    label: Option<&'static str>,
    glue: &'static str,
    provider: bool,
    tags: Vec<&'static str>,
    parent: Option<Box<TypeDescriptor>>,
    fields: Vec<FieldDescriptor>,
}

impl TypeDescriptor {
    /// Empty descriptor for `T`
    pub fn new<T: ?Sized>() -> Self {
        Self {
            type_name: simple_name::<T>(),
            label: None,
            glue: DEFAULT_GLUE,
            provider: false,
            tags: Vec::new(),
            parent: None,
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    pub fn label(mut self, label: &'static str) -> Self {
        self.label = Some(label);
        self
    }

    /// Separator used when joining name fields
    pub fn glue(mut self, glue: &'static str) -> Self {
        self.glue = glue;
        self
    }

    /// Marks the type as discoverable
    pub fn provider(mut self) -> Self {
        self.provider = true;
        self
    }

    pub fn tag(mut self, tag: &'static str) -> Self {
        self.tags.push(tag);
        self
    }

    /// Inherits the fields of `P`, searched after this type's own fields
    pub fn with_parent<P: Described>(mut self) -> Self {
        self.parent = Some(Box::new(P::descriptor()));
        self
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Declared label, or the beautified type name
    pub fn display_label(&self) -> String {
        self.label.map_or_else(|| beautify(&self.type_name), str::to_string)
    }

    pub fn glue_str(&self) -> &'static str {
        self.glue
    }

    pub fn is_provider(&self) -> bool {
        self.provider
    }

    pub fn tags(&self) -> &[&'static str] {
        &self.tags
    }

    pub fn parent(&self) -> Option<&TypeDescriptor> {
        self.parent.as_deref()
    }

    /// Fields declared directly on this type
    pub fn declared_fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Own fields followed by each ancestor's, nearest first
    pub fn all_fields(&self) -> Vec<FieldDescriptor> {
        let mut fields = Vec::new();
        let mut current = Some(self);
        while let Some(descriptor) = current {
            fields.extend(descriptor.fields.iter().cloned());
            current = descriptor.parent();
        }
        fields
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for reflect::metadata::descriptor.
    use super::*;

    struct Account;

    #[test]
    fn test_field_defaults() {
        let field = FieldDescriptor::new::<Account>("created_at", &[]);
        assert_eq!(field.label(), "Created At");
        assert_eq!(field.order(), i32::MAX);
        assert!(field.is_visible());
        assert!(!field.is_id());
        assert!(field.tags().is_empty());
        assert_eq!(field.declaring_type(), "Account");
    }

    #[test]
    fn test_field_markers() {
        let field = FieldDescriptor::new::<Account>(
            "secret",
            &[
                Marker::Label("API secret"),
                Marker::Order(4),
                Marker::Visible(false),
                Marker::ReadOnly,
                Marker::Tag("security"),
                Marker::Tag("auth"),
                Marker::ModifiedAt,
            ],
        );
        assert_eq!(field.label(), "API secret");
        assert_eq!(field.order(), 4);
        assert!(!field.is_visible());
        assert!(field.is_read_only());
        assert_eq!(field.tags(), vec!["security", "auth"]);
        assert!(field.has_tag("auth"));
        assert_eq!(field.timestamp_kind(), Some(TimestampKind::ModifiedAt));
    }

    #[test]
    fn test_type_descriptor_builder() {
        let descriptor = TypeDescriptor::new::<Account>()
            .glue(", ")
            .tag("billing")
            .provider()
            .field(FieldDescriptor::new::<Account>("id", &[Marker::Id]));
        assert_eq!(descriptor.type_name(), "Account");
        assert_eq!(descriptor.display_label(), "Account");
        assert_eq!(descriptor.glue_str(), ", ");
        assert!(descriptor.is_provider());
        assert_eq!(descriptor.tags(), &["billing"]);
        assert_eq!(descriptor.declared_fields().len(), 1);
        assert!(descriptor.parent().is_none());
    }
}
