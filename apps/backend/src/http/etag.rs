//! ETag helper for the polling read path.
//!
//! Clients refetch session state rather than receiving pushes; the ETag lets
//! an unchanged session answer with `304 Not Modified` instead of a body.

/// Generate an ETag for a session resource.
///
/// Format: `"session-{id}-v{version}"` (with quotes, as required by HTTP spec)
pub fn session_etag(id: &str, version: i32) -> String {
    format!(r#""session-{id}-v{version}""#)
}

/// True if an `If-None-Match` header value matches the given ETag.
///
/// Handles the `*` wildcard and comma-separated candidate lists (RFC 9110).
pub fn if_none_match_matches(header: &str, etag: &str) -> bool {
    header.trim() == "*" || header.split(',').map(str::trim).any(|c| c == etag)
}
