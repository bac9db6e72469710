//! Type-name helpers
//!
//! Thin wrappers around [`std::any::type_name`] that produce the short,
//! display-friendly names used in error messages and hash inputs.

use std::any::TypeId;

/// Fully qualified name of `T`
pub fn type_name<T: ?Sized>() -> &'static str {
    std::any::type_name::<T>()
}

/// Strips the module path from every segment of a type name
///
/// `alloc::vec::Vec<core::option::Option<my::Id>>` becomes
/// `Vec<Option<Id>>`.
fn strip_paths(full: &str) -> String {
    let mut result = String::with_capacity(full.len());
    let mut segment = String::new();

    for c in full.chars() {
        if c.is_alphanumeric() || c == '_' || c == ':' {
            segment.push(c);
        } else {
            result.push_str(segment.rsplit("::").next().unwrap_or(&segment));
            segment.clear();
            result.push(c);
        }
    }
    result.push_str(segment.rsplit("::").next().unwrap_or(&segment));
    result
}

/// Short name of `T` with module paths removed, generics kept
///
/// ```
/// use cornerstone_common::reflect::types::simple_name;
///
/// assert_eq!(simple_name::<String>(), "String");
/// assert_eq!(simple_name::<Vec<Option<u8>>>(), "Vec<Option<u8>>");
/// ```
pub fn simple_name<T: ?Sized>() -> String {
    strip_paths(type_name::<T>())
}

/// Short name of the value's type
pub fn simple_name_of<T: ?Sized>(_value: &T) -> String {
    simple_name::<T>()
}

/// Name of `T` without module path and without generic arguments
pub fn base_name<T: ?Sized>() -> String {
    let full = type_name::<T>();
    let without_generics = full.split('<').next().unwrap_or(full);
    strip_paths(without_generics)
}

/// Module path of `T` (`""` for primitives)
pub fn package_name<T: ?Sized>() -> &'static str {
    let full = type_name::<T>();
    let without_generics = full.split('<').next().unwrap_or(full);
    without_generics.rsplit_once("::").map_or("", |(path, _)| path)
}

/// Whether `A` and `B` are the same type
pub fn is_same_type<A: ?Sized + 'static, B: ?Sized + 'static>() -> bool {
    TypeId::of::<A>() == TypeId::of::<B>()
}

#[cfg(test)]
mod tests {
    //! Unit tests for reflect::types.
    use std::collections::HashMap;

    use super::*;

    struct Local;

    #[test]
    fn test_type_name_is_fully_qualified() {
        assert_eq!(type_name::<String>(), "alloc::string::String");
        assert!(type_name::<Local>().ends_with("tests::Local"));
    }

    #[test]
    fn test_simple_name() {
        assert_eq!(simple_name::<Local>(), "Local");
        assert_eq!(simple_name::<u32>(), "u32");
        assert_eq!(simple_name::<HashMap<String, Local>>(), "HashMap<String, Local>");
        assert_eq!(simple_name::<[u8]>(), "[u8]");
        assert_eq!(simple_name::<&str>(), "&str");
    }

    #[test]
    fn test_simple_name_of_value() {
        let value = vec![Local];
        assert_eq!(simple_name_of(&value), "Vec<Local>");
    }

    #[test]
    fn test_base_name() {
        assert_eq!(base_name::<Vec<Local>>(), "Vec");
        assert_eq!(base_name::<Local>(), "Local");
    }

    #[test]
    fn test_package_name() {
        assert_eq!(package_name::<Local>(), module_path!());
        assert_eq!(package_name::<String>(), "alloc::string");
        assert_eq!(package_name::<u8>(), "");
    }

    #[test]
    fn test_is_same_type() {
        assert!(is_same_type::<String, String>());
        assert!(!is_same_type::<String, &'static str>());
    }
}
