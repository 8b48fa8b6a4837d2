//! HTML escaping for attribute values.
//!
//! Tag attributes are always double-quoted, so only `&`, `<`, `>` and `"`
//! need escaping. Single quotes pass through untouched, which keeps values
//! like `default-src 'self'` readable in the rendered markup.

use std::borrow::Cow;

/// Characters that require escaping inside a double-quoted attribute.
const ATTR_ESCAPE_CHARS: [char; 4] = ['<', '>', '&', '"'];

/// Get the HTML entity for a special character.
#[inline]
fn escape_char(c: char) -> Option<&'static str> {
    match c {
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        '&' => Some("&amp;"),
        '"' => Some("&quot;"),
        _ => None,
    }
}

/// Escape an attribute value.
///
/// Uses `Cow` to avoid allocation when no escaping is needed.
///
/// # Example
/// ```ignore
/// assert_eq!(escape_attr("a\"b"), "a&quot;b");
/// assert_eq!(escape_attr("main.css"), "main.css"); // No allocation
/// ```
#[inline]
pub fn escape_attr(s: &str) -> Cow<'_, str> {
    if !s.contains(ATTR_ESCAPE_CHARS) {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match escape_char(c) {
            Some(entity) => result.push_str(entity),
            None => result.push(c),
        }
    }
    Cow::Owned(result)
}
