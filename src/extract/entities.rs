//! Character reference decoding.

use std::borrow::Cow;

/// Resolve named and numeric character references to literal text.
///
/// Literal text is returned borrowed. Unknown references are left as-is.
pub fn decode_entities(text: &str) -> Cow<'_, str> {
    html_escape::decode_html_entities(text)
}
