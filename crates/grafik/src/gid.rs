//! Global identifier (gid) helpers for the `id` argument.
//!
//! Nodes carry a slash-separated gid base path (e.g. `Org/Project`). Plain ids
//! passed as an `id` argument are prefixed with that path and the
//! [`GID_PREFIX`] marker, so callers can write `id: 42` and get
//! `id: "gid://Org/Project/42"`.

use crate::Value;

/// The marker every normalized global identifier starts with.
pub const GID_PREFIX: &str = "gid://";

/// Normalizes `raw` into a global identifier under `base_path`.
///
/// Ids that already start with [`GID_PREFIX`] pass through unchanged.
/// Otherwise the non-empty segments of `base_path` are accumulated in order,
/// stopping at the first segment `raw` already starts with, so the id is
/// never prefixed twice:
///
/// ```rust
/// use grafik::gid::normalize_gid;
///
/// assert_eq!(normalize_gid("a/b/c", "42"), "gid://a/b/c/42");
/// assert_eq!(normalize_gid("a/b/c", "b/42"), "gid://a/b/42");
/// assert_eq!(normalize_gid("", "12"), "gid://12");
/// assert_eq!(normalize_gid("a/b/c", "gid://x/1"), "gid://x/1");
/// ```
pub fn normalize_gid(base_path: &str, raw: &str) -> String {
    if raw.starts_with(GID_PREFIX) {
        return raw.to_string();
    }

    let mut prefix = String::new();
    for segment in base_path.split('/').filter(|segment| !segment.is_empty()) {
        if raw.starts_with(segment) {
            break;
        }
        if !prefix.is_empty() {
            prefix.push('/');
        }
        prefix.push_str(segment);
    }

    if prefix.is_empty() {
        format!("{GID_PREFIX}{raw}")
    } else {
        format!("{GID_PREFIX}{prefix}/{raw}")
    }
}

/// Returns the trailing numeric id of `candidate` if its path is compatible
/// with `base_path`.
///
/// The candidate's path segments are compared with the base path's segments
/// from the end backwards, for as many segments as the candidate supplies.
/// A non-numeric trailing segment never matches.
///
/// ```rust
/// use grafik::gid::matching_gid;
///
/// assert_eq!(matching_gid("a/b/c", "gid://b/c/42"), Some("42"));
/// assert_eq!(matching_gid("a/b/c", "42"), Some("42"));
/// assert_eq!(matching_gid("a/b/c", "gid://x/c/42"), None);
/// assert_eq!(matching_gid("a/b/c", "gid://a/b/c/abc"), None);
/// ```
pub fn matching_gid<'a>(base_path: &str, candidate: &'a str) -> Option<&'a str> {
    let path = candidate.strip_prefix(GID_PREFIX).unwrap_or(candidate);
    let (prefix, id) = path.rsplit_once('/').unwrap_or(("", path));
    if id.is_empty() || !id.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let mut base_segments = base_path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .rev();
    for segment in prefix.split('/').filter(|segment| !segment.is_empty()).rev() {
        if base_segments.next() != Some(segment) {
            return None;
        }
    }
    Some(id)
}

/// Applies [`normalize_gid`] to an `id` argument value.
///
/// Strings and integers become gid strings; other kinds are left alone.
pub(crate) fn normalize_id_value(base_path: &str, value: Value) -> Value {
    match value {
        Value::String(raw) => Value::String(normalize_gid(base_path, &raw)),
        Value::Int(raw) => Value::String(normalize_gid(base_path, &raw.to_string())),
        other => other,
    }
}
