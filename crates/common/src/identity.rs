//! Identity-aware values
//!
//! An identity is an immutable, non-blank identifier fixed when the value
//! is built. Equality and hashing look at the identifier only; names,
//! descriptions and tags are display data.
//!
//! ```rust
//! use cornerstone_common::identity::{IdentityAware, NamedIdentity, NamedIdentityAware};
//!
//! let region = NamedIdentity::builder().id("eu_west".to_string()).build()?;
//! assert_eq!(region.id(), "eu_west");
//! assert_eq!(region.name(), "Eu West");
//!
//! let renamed = NamedIdentity::builder()
//!     .id("eu_west".to_string())
//!     .name("Europe (West)")
//!     .build()?;
//! assert_eq!(region, renamed);
//! # Ok::<(), cornerstone_common::error::CommonError>(())
//! ```

use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CommonError, CommonResult};
use crate::text::strings::{self, beautify};

/// Values usable as identifiers
pub trait Identifier:
    Clone + Eq + Hash + fmt::Debug + fmt::Display + Send + Sync + 'static
{
    /// Whether the value carries no identity (empty text, nil UUID)
    fn is_blank(&self) -> bool {
        false
    }
}

impl Identifier for String {
    fn is_blank(&self) -> bool {
        strings::is_blank(self)
    }
}

impl Identifier for &'static str {
    fn is_blank(&self) -> bool {
        strings::is_blank(self)
    }
}

impl Identifier for Uuid {
    fn is_blank(&self) -> bool {
        self.is_nil()
    }
}

macro_rules! integer_identifiers {
    ($($ty:ty),+) => {
        $(impl Identifier for $ty {})+
    };
}

integer_identifiers!(i16, i32, i64, i128, u16, u32, u64, u128, usize);

fn require_identifier<T: Identifier>(id: Option<T>) -> CommonResult<T> {
    match id {
        None => Err(CommonError::invalid_argument("id", "is required")),
        Some(id) if id.is_blank() => {
            Err(CommonError::invalid_argument_with_value("id", "must not be blank", id.to_string()))
        }
        Some(id) => Ok(id),
    }
}

/// Trims `value`, dropping it when blank
fn clean(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Values with a stable identifier
pub trait IdentityAware {
    type Id: Identifier;

    fn id(&self) -> &Self::Id;
}

/// Identity with a display name and an optional description
pub trait NamedIdentityAware: IdentityAware {
    fn name(&self) -> &str;

    fn description(&self) -> Option<&str>;
}

/// Named identity carrying a set of tags
pub trait TaggedIdentityAware: NamedIdentityAware {
    fn tags(&self) -> &BTreeSet<String>;

    fn has_tag(&self, tag: &str) -> bool {
        self.tags().contains(tag)
    }
}

/// Whether two values carry the same identifier
pub fn same_identity<A, B>(left: &A, right: &B) -> bool
where
    A: IdentityAware + ?Sized,
    B: IdentityAware<Id = A::Id> + ?Sized,
{
    left.id() == right.id()
}

// ----------------------------------------------------------------------------
// Identity
// ----------------------------------------------------------------------------

/// Bare identifier holder
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "IdentityData<T>", bound(deserialize = "T: Identifier + Deserialize<'de>"))]
pub struct Identity<T> {
    id: T,
}

#[derive(Deserialize)]
struct IdentityData<T> {
    id: Option<T>,
}

impl<T: Identifier> TryFrom<IdentityData<T>> for Identity<T> {
    type Error = CommonError;

    fn try_from(data: IdentityData<T>) -> Result<Self, Self::Error> {
        Self::builder().maybe_id(data.id).build()
    }
}

impl<T: Identifier> Identity<T> {
    pub fn new(id: T) -> CommonResult<Self> {
        Self::builder().id(id).build()
    }

    pub fn builder() -> IdentityBuilder<T> {
        IdentityBuilder { id: None }
    }
}

impl<T: Identifier> IdentityAware for Identity<T> {
    type Id = T;

    fn id(&self) -> &T {
        &self.id
    }
}

impl<T: Identifier> fmt::Display for Identity<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.id, f)
    }
}

#[derive(Debug, Clone)]
pub struct IdentityBuilder<T> {
    id: Option<T>,
}

impl<T: Identifier> IdentityBuilder<T> {
    pub fn id(mut self, id: T) -> Self {
        self.id = Some(id);
        self
    }

    fn maybe_id(mut self, id: Option<T>) -> Self {
        self.id = id;
        self
    }

    /// Fails with `InvalidArgument` when the id is missing or blank
    pub fn build(self) -> CommonResult<Identity<T>> {
        Ok(Identity { id: require_identifier(self.id)? })
    }
}

// ----------------------------------------------------------------------------
// NamedIdentity
// ----------------------------------------------------------------------------

/// Identifier plus display name and optional description
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "NamedData<T>", bound(deserialize = "T: Identifier + Deserialize<'de>"))]
pub struct NamedIdentity<T> {
    id: T,
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

#[derive(Deserialize)]
struct NamedData<T> {
    id: Option<T>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

impl<T: Identifier> TryFrom<NamedData<T>> for NamedIdentity<T> {
    type Error = CommonError;

    fn try_from(data: NamedData<T>) -> Result<Self, Self::Error> {
        NamedIdentityBuilder { id: data.id, name: data.name, description: data.description }.build()
    }
}

impl<T: Identifier> NamedIdentity<T> {
    pub fn builder() -> NamedIdentityBuilder<T> {
        NamedIdentityBuilder { id: None, name: None, description: None }
    }
}

impl<T: Identifier> IdentityAware for NamedIdentity<T> {
    type Id = T;

    fn id(&self) -> &T {
        &self.id
    }
}

impl<T: Identifier> NamedIdentityAware for NamedIdentity<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl<T: PartialEq> PartialEq for NamedIdentity<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T: Eq> Eq for NamedIdentity<T> {}

impl<T: Hash> Hash for NamedIdentity<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<T> fmt::Display for NamedIdentity<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Debug, Clone)]
pub struct NamedIdentityBuilder<T> {
    id: Option<T>,
    name: Option<String>,
    description: Option<String>,
}

impl<T: Identifier> NamedIdentityBuilder<T> {
    pub fn id(mut self, id: T) -> Self {
        self.id = Some(id);
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Fails with `InvalidArgument` when the id is missing or blank
    ///
    /// A missing or blank name becomes the beautified id.
    pub fn build(self) -> CommonResult<NamedIdentity<T>> {
        let id = require_identifier(self.id)?;
        let name = clean(self.name).unwrap_or_else(|| beautify(&id.to_string()));
        Ok(NamedIdentity { id, name, description: clean(self.description) })
    }
}

// ----------------------------------------------------------------------------
// TaggedIdentity
// ----------------------------------------------------------------------------

/// Named identity with tags
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "TaggedData<T>", bound(deserialize = "T: Identifier + Deserialize<'de>"))]
pub struct TaggedIdentity<T> {
    #[serde(flatten)]
    named: NamedIdentity<T>,
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    tags: BTreeSet<String>,
}

#[derive(Deserialize)]
struct TaggedData<T> {
    id: Option<T>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
}

impl<T: Identifier> TryFrom<TaggedData<T>> for TaggedIdentity<T> {
    type Error = CommonError;

    fn try_from(data: TaggedData<T>) -> Result<Self, Self::Error> {
        let named =
            NamedIdentityBuilder { id: data.id, name: data.name, description: data.description };
        TaggedIdentityBuilder { named, tags: BTreeSet::new() }.tags(data.tags).build()
    }
}

impl<T: Identifier> TaggedIdentity<T> {
    pub fn builder() -> TaggedIdentityBuilder<T> {
        TaggedIdentityBuilder { named: NamedIdentity::builder(), tags: BTreeSet::new() }
    }
}

impl<T: Identifier> IdentityAware for TaggedIdentity<T> {
    type Id = T;

    fn id(&self) -> &T {
        self.named.id()
    }
}

impl<T: Identifier> NamedIdentityAware for TaggedIdentity<T> {
    fn name(&self) -> &str {
        self.named.name()
    }

    fn description(&self) -> Option<&str> {
        self.named.description()
    }
}

impl<T: Identifier> TaggedIdentityAware for TaggedIdentity<T> {
    fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }
}

impl<T: PartialEq> PartialEq for TaggedIdentity<T> {
    fn eq(&self, other: &Self) -> bool {
        self.named == other.named
    }
}

impl<T: Eq> Eq for TaggedIdentity<T> {}

impl<T: Hash> Hash for TaggedIdentity<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.named.hash(state);
    }
}

impl<T> fmt::Display for TaggedIdentity<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.named, f)
    }
}

#[derive(Debug, Clone)]
pub struct TaggedIdentityBuilder<T> {
    named: NamedIdentityBuilder<T>,
    tags: BTreeSet<String>,
}

impl<T: Identifier> TaggedIdentityBuilder<T> {
    pub fn id(mut self, id: T) -> Self {
        self.named = self.named.id(id);
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.named = self.named.name(name);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.named = self.named.description(description);
        self
    }

    /// Adds a tag; blank tags are ignored
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        if let Some(tag) = clean(Some(tag.into())) {
            self.tags.insert(tag);
        }
        self
    }

    pub fn tags<I, S>(self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        tags.into_iter().fold(self, |builder, tag| builder.tag(tag))
    }

    pub fn build(self) -> CommonResult<TaggedIdentity<T>> {
        Ok(TaggedIdentity { named: self.named.build()?, tags: self.tags })
    }
}
