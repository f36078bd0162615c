//! HTML escaping for inserted values.

use std::borrow::Cow;

/// Escape `&`, `<`, `>`, `'` and `"` for use in HTML text or attributes.
///
/// Single pass over the input: entities written by this function are never
/// revisited, so every ampersand is escaped exactly once.
pub fn escape_html(text: &str) -> Cow<'_, str> {
    let Some(first) = text.find(['&', '<', '>', '\'', '"']) else {
        return Cow::Borrowed(text);
    };

    let mut out = String::with_capacity(text.len() + 16);
    out.push_str(&text[..first]);

    for ch in text[first..].chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\'' => out.push_str("&apos;"),
            '"' => out.push_str("&quot;"),
            c => out.push(c),
        }
    }

    Cow::Owned(out)
}
