//! Enum lookup by name, alias and ordinal
//!
//! Types opt in by implementing [`Enumerated`] (usually through
//! [`impl_enumerated!`](crate::impl_enumerated)). The first lookup for a
//! type builds a name table that is cached for the life of the process.
//!
//! # Name resolution
//!
//! A name matches a variant when it equals, after trimming, one of:
//! - the declared name,
//! - its upper- or lower-case form,
//! - one of the declared aliases (in any of those forms),
//!
//! and `-` in the input is read as `_`, so `"in-progress"` finds
//! `IN_PROGRESS`.
//!
//! ```rust
//! use cornerstone_common::impl_enumerated;
//! use cornerstone_common::reflect::enums::{from_name, from_ordinal, names};
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! enum Phase {
//!     Draft,
//!     InProgress,
//!     Done,
//! }
//!
//! impl_enumerated!(Phase {
//!     Draft => "DRAFT",
//!     InProgress => "IN_PROGRESS" ["active", "wip"],
//!     Done => "DONE",
//! });
//!
//! assert_eq!(from_name::<Phase>("in-progress").unwrap(), Phase::InProgress);
//! assert_eq!(from_name::<Phase>("WIP").unwrap(), Phase::InProgress);
//! assert_eq!(from_ordinal::<Phase>(2).unwrap(), Phase::Done);
//! assert_eq!(names::<Phase>(), vec!["DRAFT", "IN_PROGRESS", "DONE"]);
//! ```

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::Arc;

use dashmap::DashMap;
use once_cell::sync::Lazy;
use tracing::debug;

use crate::error::{CommonError, CommonResult};
use crate::reflect::types::simple_name;

/// Enums with a fixed, named set of variants
pub trait Enumerated: Copy + Send + Sync + 'static {
    /// All variants in declaration order
    fn variants() -> &'static [Self];

    /// Canonical name of this variant
    fn name(&self) -> &'static str;

    /// Extra names this variant answers to
    fn aliases(&self) -> &'static [&'static str] {
        &[]
    }

    /// Position in [`variants`](Enumerated::variants)
    fn ordinal(&self) -> usize {
        let name = self.name();
        Self::variants().iter().position(|variant| variant.name() == name).unwrap_or_default()
    }
}

/// Name -> variant index table for one enum type
#[derive(Debug)]
struct EnumTable {
    by_name: HashMap<String, usize>,
}

impl EnumTable {
    fn build<E: Enumerated>() -> Self {
        let variants = E::variants();
        let mut by_name = HashMap::new();

        // Declared names first so an alias can never shadow a real name
        for (index, variant) in variants.iter().enumerate() {
            by_name.entry(variant.name().to_string()).or_insert(index);
        }
        for (index, variant) in variants.iter().enumerate() {
            let spellings = std::iter::once(variant.name()).chain(variant.aliases().iter().copied());
            for spelling in spellings {
                let normalized = spelling.replace('-', "_");
                for key in [
                    normalized.clone(),
                    normalized.to_uppercase(),
                    normalized.to_lowercase(),
                ] {
                    by_name.entry(key).or_insert(index);
                }
            }
        }

        Self { by_name }
    }

    fn resolve(&self, name: &str) -> Option<usize> {
        let trimmed = name.trim();
        if let Some(index) = self.by_name.get(trimmed) {
            return Some(*index);
        }
        let normalized = trimmed.replace('-', "_");
        [normalized.to_uppercase(), normalized.to_lowercase(), normalized]
            .iter()
            .find_map(|key| self.by_name.get(key).copied())
    }
}

static TABLES: Lazy<DashMap<TypeId, Arc<EnumTable>>> = Lazy::new(DashMap::new);

fn table<E: Enumerated>() -> Arc<EnumTable> {
    let key = TypeId::of::<E>();
    if let Some(existing) = TABLES.get(&key) {
        return Arc::clone(existing.value());
    }

    // Concurrent first lookups may both build; the tables are identical
    // and whichever insert lands first is kept.
    let built = Arc::new(EnumTable::build::<E>());
    debug!(
        enum_type = %simple_name::<E>(),
        variants = E::variants().len(),
        keys = built.by_name.len(),
        "Built enum lookup table"
    );
    Arc::clone(TABLES.entry(key).or_insert(built).value())
}

/// Resolves `name` to a variant of `E`
///
/// # Errors
///
/// [`CommonError::NotFound`] naming the enum type and the requested name.
pub fn from_name<E: Enumerated>(name: &str) -> CommonResult<E> {
    table::<E>()
        .resolve(name)
        .and_then(|index| E::variants().get(index).copied())
        .ok_or_else(|| CommonError::not_found_with_id(simple_name::<E>(), name))
}

/// Resolves `name`, falling back to `default` on a miss
pub fn from_name_or<E: Enumerated>(name: &str, default: E) -> E {
    from_name(name).unwrap_or(default)
}

/// Whether `name` resolves to a variant of `E`
pub fn is_valid_name<E: Enumerated>(name: &str) -> bool {
    table::<E>().resolve(name).is_some()
}

/// Variant at position `ordinal`
///
/// # Errors
///
/// [`CommonError::NotFound`] when `ordinal` is out of range.
pub fn from_ordinal<E: Enumerated>(ordinal: usize) -> CommonResult<E> {
    E::variants()
        .get(ordinal)
        .copied()
        .ok_or_else(|| CommonError::not_found_with_id(simple_name::<E>(), ordinal.to_string()))
}

/// Variant at position `ordinal`, or `default` when out of range
pub fn from_ordinal_or<E: Enumerated>(ordinal: usize, default: E) -> E {
    E::variants().get(ordinal).copied().unwrap_or(default)
}

/// Canonical names of all variants in declaration order
pub fn names<E: Enumerated>() -> Vec<&'static str> {
    E::variants().iter().map(Enumerated::name).collect()
}

/// Number of enum types with a cached lookup table
pub fn cached_tables() -> usize {
    TABLES.len()
}

#[cfg(test)]
mod tests {
    //! Unit tests for reflect::enums.
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Level {
        Low,
        Medium,
        High,
    }

    impl Enumerated for Level {
        fn variants() -> &'static [Self] {
            &[Self::Low, Self::Medium, Self::High]
        }

        fn name(&self) -> &'static str {
            match self {
                Self::Low => "LOW",
                Self::Medium => "MEDIUM",
                Self::High => "HIGH",
            }
        }

        fn aliases(&self) -> &'static [&'static str] {
            match self {
                Self::Medium => &["mid", "Normal-Level"],
                _ => &[],
            }
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Empty {}

    impl Enumerated for Empty {
        fn variants() -> &'static [Self] {
            &[]
        }

        fn name(&self) -> &'static str {
            match *self {}
        }
    }

    #[test]
    fn test_exact_and_case_variants() {
        assert_eq!(from_name::<Level>("LOW").unwrap(), Level::Low);
        assert_eq!(from_name::<Level>("high").unwrap(), Level::High);
        assert_eq!(from_name::<Level>("Medium").unwrap(), Level::Medium);
        assert_eq!(from_name::<Level>("  low ").unwrap(), Level::Low);
    }

    #[test]
    fn test_aliases() {
        assert_eq!(from_name::<Level>("mid").unwrap(), Level::Medium);
        assert_eq!(from_name::<Level>("MID").unwrap(), Level::Medium);
        assert_eq!(from_name::<Level>("normal_level").unwrap(), Level::Medium);
        assert_eq!(from_name::<Level>("normal-level").unwrap(), Level::Medium);
    }

    #[test]
    fn test_miss_is_not_found() {
        let err = from_name::<Level>("extreme").unwrap_err();
        assert_eq!(
            err,
            CommonError::NotFound {
                resource_type: "Level".to_string(),
                identifier: Some("extreme".to_string()),
            }
        );
        assert_eq!(from_name_or("extreme", Level::Low), Level::Low);
        assert!(!is_valid_name::<Level>("extreme"));
        assert!(is_valid_name::<Level>("mid"));
    }

    #[test]
    fn test_ordinals() {
        assert_eq!(Level::High.ordinal(), 2);
        assert_eq!(from_ordinal::<Level>(0).unwrap(), Level::Low);
        assert!(matches!(from_ordinal::<Level>(3), Err(CommonError::NotFound { .. })));
        assert_eq!(from_ordinal_or(9, Level::Medium), Level::Medium);
    }

    #[test]
    fn test_names() {
        assert_eq!(names::<Level>(), vec!["LOW", "MEDIUM", "HIGH"]);
        assert!(names::<Empty>().is_empty());
    }

    #[test]
    fn test_empty_enum_never_resolves() {
        assert!(from_name::<Empty>("anything").is_err());
        assert!(from_ordinal::<Empty>(0).is_err());
    }

    #[test]
    fn test_table_is_built_once() {
        let first = table::<Level>();
        let second = table::<Level>();
        assert!(Arc::ptr_eq(&first, &second));
        assert!(cached_tables() >= 1);
    }

    #[test]
    fn test_concurrent_first_lookup() {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        enum Racy {
            A,
            B,
        }

        impl Enumerated for Racy {
            fn variants() -> &'static [Self] {
                &[Self::A, Self::B]
            }

            fn name(&self) -> &'static str {
                match self {
                    Self::A => "A",
                    Self::B => "B",
                }
            }
        }

        let handles: Vec<_> = (0..8)
            .map(|i| {
                std::thread::spawn(move || {
                    let name = if i % 2 == 0 { "a" } else { "b" };
                    from_name::<Racy>(name).unwrap()
                })
            })
            .collect();
        for (i, handle) in handles.into_iter().enumerate() {
            let expected = if i % 2 == 0 { Racy::A } else { Racy::B };
            assert_eq!(handle.join().unwrap(), expected);
        }
    }
}
