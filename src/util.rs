//! Utility functions for common operations.

use std::borrow::Cow;

/// Escape a string for safe interpolation into HTML text or attribute values.
///
/// Record fields come straight from the datastore, so anything rendered on
/// the listing page goes through here first. Returns `Cow::Borrowed` when no
/// escaping is needed (no allocation on the common path).
pub fn escape_html(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }

    let mut escaped = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    Cow::Owned(escaped)
}
