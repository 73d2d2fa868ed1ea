use axum::http::{header::IF_MATCH, HeaderMap};
use uuid::Uuid;

use crate::error::ApiError;
use crate::page::PageError;

/// Page ids in paths that are not UUIDs cannot name a page.
pub fn parse_page_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| PageError::NotFound(raw.to_string()).into())
}

/// Revision the client last saw, from `If-Match: "3"` (quotes and `W/` optional).
pub fn expected_revision(headers: &HeaderMap) -> Result<Option<i64>, ApiError> {
    let Some(value) = headers.get(IF_MATCH) else {
        return Ok(None);
    };
    let raw = value
        .to_str()
        .map_err(|_| ApiError::bad_request("If-Match header is not valid ASCII"))?
        .trim();
    if raw == "*" {
        return Ok(None);
    }

    let tag = raw.strip_prefix("W/").unwrap_or(raw).trim_matches('"');
    tag.parse::<i64>()
        .map(Some)
        .map_err(|_| ApiError::bad_request(format!("If-Match must carry a page revision, got '{}'", raw)))
}
