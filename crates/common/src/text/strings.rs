//! String helpers
//!
//! Casing, identifier conversion, trimming and joining. All functions work
//! on `char`s, never on byte offsets, so multi-byte text is safe.

/// Whether `value` is empty or whitespace only
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// `value` unless it is blank, in which case `default`
pub fn default_if_blank<'a>(value: &'a str, default: &'a str) -> &'a str {
    if is_blank(value) {
        default
    } else {
        value
    }
}

/// Upper-cases the first character
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lower-cases the first character
pub fn uncapitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Upper-cases the first character of every whitespace-separated word,
/// keeping the original spacing
pub fn capitalize_words(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut at_word_start = true;
    for c in value.chars() {
        if c.is_whitespace() {
            at_word_start = true;
            result.push(c);
        } else if at_word_start {
            at_word_start = false;
            result.extend(c.to_uppercase());
        } else {
            result.push(c);
        }
    }
    result
}

/// Splits identifiers and free text into words.
///
/// Any non-alphanumeric character separates words, and so does a case
/// change: `"parseHTTPResponse2Body"` gives `parse`, `HTTP`, `Response2`,
/// `Body`.
fn words(value: &str) -> Vec<String> {
    let chars: Vec<char> = value.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (index, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        if c.is_uppercase() && !current.is_empty() {
            let previous = chars[index - 1];
            let next_is_lower = chars.get(index + 1).is_some_and(|n| n.is_lowercase());
            if previous.is_lowercase()
                || previous.is_numeric()
                || (previous.is_uppercase() && next_is_lower)
            {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// Turns an identifier into display text
///
/// ```
/// use cornerstone_common::text::strings::beautify;
///
/// assert_eq!(beautify("userName"), "User Name");
/// assert_eq!(beautify("user_name"), "User Name");
/// assert_eq!(beautify("max-retry-count"), "Max Retry Count");
/// ```
pub fn beautify(value: &str) -> String {
    words(value).iter().map(|word| capitalize(word)).collect::<Vec<_>>().join(" ")
}

/// Turns display text into a lower-case, underscore separated identifier
///
/// ```
/// use cornerstone_common::text::strings::to_identifier;
///
/// assert_eq!(to_identifier("User Name!"), "user_name");
/// assert_eq!(to_identifier("createdAt"), "created_at");
/// ```
pub fn to_identifier(value: &str) -> String {
    words(value).iter().map(|word| word.to_lowercase()).collect::<Vec<_>>().join("_")
}

/// Lower-case, dash separated form (`"Created At"` -> `"created-at"`)
pub fn to_dash_case(value: &str) -> String {
    words(value).iter().map(|word| word.to_lowercase()).collect::<Vec<_>>().join("-")
}

/// Shortens `value` to at most `max` characters, ending with `...` when cut
pub fn abbreviate(value: &str, max: usize) -> String {
    const ELLIPSIS: &str = "...";

    if value.chars().count() <= max {
        return value.to_string();
    }
    if max <= ELLIPSIS.len() {
        return value.chars().take(max).collect();
    }
    let mut result: String = value.chars().take(max - ELLIPSIS.len()).collect();
    result.push_str(ELLIPSIS);
    result
}

/// `value` without `prefix`, or `value` unchanged when it does not start with it
pub fn remove_start<'a>(value: &'a str, prefix: &str) -> &'a str {
    value.strip_prefix(prefix).unwrap_or(value)
}

/// `value` without `suffix`, or `value` unchanged when it does not end with it
pub fn remove_end<'a>(value: &'a str, suffix: &str) -> &'a str {
    value.strip_suffix(suffix).unwrap_or(value)
}

/// Appends `value` to `buffer`, inserting `separator` only between entries
///
/// Empty values are skipped, so no doubled separators appear.
pub fn append(buffer: &mut String, value: &str, separator: &str) {
    if value.is_empty() {
        return;
    }
    if !buffer.is_empty() {
        buffer.push_str(separator);
    }
    buffer.push_str(value);
}

/// Joins the non-empty values with `glue`
pub fn join_non_empty<I, S>(values: I, glue: &str) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    values.into_iter().fold(String::new(), |mut buffer, value| {
        append(&mut buffer, value.as_ref(), glue);
        buffer
    })
}

/// Splits on any of the `separators` characters, trimming parts and
/// dropping empty ones
pub fn split(value: &str, separators: &str) -> Vec<String> {
    value
        .split(|c: char| separators.contains(c))
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

/// Number of occurrences of `needle`
pub fn count(value: &str, needle: char) -> usize {
    value.chars().filter(|c| *c == needle).count()
}

/// Case-insensitive equality
pub fn equals_ignore_case(left: &str, right: &str) -> bool {
    left.to_lowercase() == right.to_lowercase()
}

/// Case-insensitive substring search
pub fn contains_ignore_case(value: &str, needle: &str) -> bool {
    value.to_lowercase().contains(&needle.to_lowercase())
}

/// Pads on the left with `pad` up to `width` characters
pub fn left_pad(value: &str, width: usize, pad: char) -> String {
    let missing = width.saturating_sub(value.chars().count());
    std::iter::repeat(pad).take(missing).chain(value.chars()).collect()
}

/// Pads on the right with `pad` up to `width` characters
pub fn right_pad(value: &str, width: usize, pad: char) -> String {
    let missing = width.saturating_sub(value.chars().count());
    value.chars().chain(std::iter::repeat(pad).take(missing)).collect()
}

#[cfg(test)]
mod tests {
    //! Unit tests for text::strings.
    use super::*;

    #[test]
    fn test_blank() {
        assert!(is_blank(""));
        assert!(is_blank(" \n\t"));
        assert!(!is_blank(" a "));
        assert_eq!(default_if_blank("  ", "none"), "none");
        assert_eq!(default_if_blank("set", "none"), "set");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("hello"), "Hello");
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("élan"), "Élan");
        assert_eq!(uncapitalize("Hello"), "hello");
        assert_eq!(capitalize_words("hello  big world"), "Hello  Big World");
    }

    #[test]
    fn test_word_splitting() {
        assert_eq!(words("parseHTTPResponse2Body"), vec!["parse", "HTTP", "Response2", "Body"]);
        assert_eq!(words("__a__b__"), vec!["a", "b"]);
        assert!(words("  --  ").is_empty());
    }

    #[test]
    fn test_beautify() {
        assert_eq!(beautify("userName"), "User Name");
        assert_eq!(beautify("HTTPServer"), "HTTP Server");
        assert_eq!(beautify("order_id"), "Order Id");
        assert_eq!(beautify(""), "");
    }

    #[test]
    fn test_identifier_and_dash_case() {
        assert_eq!(to_identifier("Hello, World"), "hello_world");
        assert_eq!(to_identifier("modifiedBy"), "modified_by");
        assert_eq!(to_dash_case("Created At"), "created-at");
        assert_eq!(to_dash_case("IN_PROGRESS"), "in-progress");
    }

    #[test]
    fn test_abbreviate() {
        assert_eq!(abbreviate("short", 10), "short");
        assert_eq!(abbreviate("a longer sentence", 10), "a longe...");
        assert_eq!(abbreviate("abcdef", 3), "abc");
        assert_eq!(abbreviate("ääääää", 5), "ää...");
    }

    #[test]
    fn test_remove_start_end() {
        assert_eq!(remove_start("get_name", "get_"), "name");
        assert_eq!(remove_start("name", "get_"), "name");
        assert_eq!(remove_end("report.csv", ".csv"), "report");
    }

    #[test]
    fn test_append_and_join() {
        let mut buffer = String::new();
        append(&mut buffer, "a", ", ");
        append(&mut buffer, "", ", ");
        append(&mut buffer, "b", ", ");
        assert_eq!(buffer, "a, b");

        assert_eq!(join_non_empty(["John", "", "Smith"], " "), "John Smith");
        assert_eq!(join_non_empty(Vec::<String>::new(), " "), "");
    }

    #[test]
    fn test_split() {
        assert_eq!(split(" a, b;;c ,", ",;"), vec!["a", "b", "c"]);
        assert!(split("", ",").is_empty());
    }

    #[test]
    fn test_case_insensitive() {
        assert!(equals_ignore_case("SNAPSHOT", "snapshot"));
        assert!(contains_ignore_case("Hello World", "WORLD"));
        assert!(!contains_ignore_case("Hello", "bye"));
    }

    #[test]
    fn test_count_and_pad() {
        assert_eq!(count("a.b.c", '.'), 2);
        assert_eq!(left_pad("7", 3, '0'), "007");
        assert_eq!(left_pad("1234", 3, '0'), "1234");
        assert_eq!(right_pad("ab", 4, '.'), "ab..");
    }
}
