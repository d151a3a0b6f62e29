//! HTML helper functions

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::borrow::Cow;

/// Characters left as-is in a query value: RFC 3986 unreserved
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Escape HTML special characters
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Escape only when asked to; interpolated post fields are trusted by default
pub fn escape_if(s: &str, enabled: bool) -> Cow<'_, str> {
    if enabled {
        Cow::Owned(escape_html(s))
    } else {
        Cow::Borrowed(s)
    }
}

/// Link to a post's detail page
///
/// # Examples
/// ```ignore
/// post_href("post.html", "hello world") // -> "post.html?slug=hello%20world"
/// ```
pub fn post_href(post_page: &str, slug: &str) -> String {
    format!(
        "{}?slug={}",
        post_page,
        utf8_percent_encode(slug, QUERY_VALUE)
    )
}

/// Render tag labels as `<span class="post-tag">` elements
pub fn tag_spans(tags: &[String], escape: bool) -> String {
    tags.iter()
        .map(|tag| format!(r#"<span class="post-tag">{}</span>"#, escape_if(tag, escape)))
        .collect()
}
