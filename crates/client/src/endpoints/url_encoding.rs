//! URL encoding utilities for constructing safe API paths and query strings.
//!
//! Server names and user names are user-provided; they are percent-encoded
//! before being interpolated into a path so that a name like `a/b` can never
//! address a different resource.
//!
//! # Example
//!
//! ```
//! use hub_client::endpoints::url_encoding::encode_path_segment;
//!
//! let encoded = encode_path_segment("lab/1");
//! assert_eq!(encoded, "lab%2F1");
//! ```

use percent_encoding::{AsciiSet, CONTROLS, NON_ALPHANUMERIC, percent_encode};

/// Characters that must be percent-encoded in URL path segments.
///
/// Based on RFC 3986 section 3.3, plus characters that would change how the
/// hub routes the request (slash, question mark, hash, percent).
pub const PATH_SEGMENT_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'|')
    .add(b'\\')
    .add(b'^')
    .add(b'%')
    .add(b'/')
    .add(b'?')
    .add(b'#')
    .add(b'+')
    .add(b',')
    .add(b';')
    .add(b'[')
    .add(b']');

/// Characters left alone in a query component, matching `encodeURIComponent`.
const QUERY_COMPONENT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a string for safe use as a URL path segment.
///
/// ```
/// use hub_client::endpoints::url_encoding::encode_path_segment;
///
/// assert_eq!(encode_path_segment("simple"), "simple");
/// assert_eq!(encode_path_segment("my lab"), "my%20lab");
/// assert_eq!(encode_path_segment("100%"), "100%25");
/// ```
pub fn encode_path_segment(segment: &str) -> String {
    percent_encode(segment.as_bytes(), PATH_SEGMENT_ENCODE_SET).to_string()
}

/// Percent-encode a query-string key or value.
pub fn encode_query_component(value: &str) -> String {
    percent_encode(value.as_bytes(), QUERY_COMPONENT_ENCODE_SET).to_string()
}

/// Join a base URL and path segments with exactly one slash between parts.
///
/// Segments are joined as given; callers encode user-provided segments first.
pub fn url_path_join(base: &str, segments: &[&str]) -> String {
    let mut url = base.trim_end_matches('/').to_string();
    for segment in segments {
        let segment = segment.trim_matches('/');
        if segment.is_empty() {
            continue;
        }
        url.push('/');
        url.push_str(segment);
    }
    url
}
