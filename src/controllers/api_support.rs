use axum::http::{header, HeaderMap};
use serde::de::DeserializeOwned;

use crate::{errors::ApiError, services::api_client::MERGE_PATCH_JSON};

/// Decode a PATCH body; only `application/merge-patch+json` is accepted.
pub fn parse_merge_patch<T: DeserializeOwned>(
    headers: &HeaderMap,
    body: &[u8],
    entity: &'static str,
) -> Result<T, ApiError> {
    let is_merge_patch = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim().to_ascii_lowercase().starts_with(MERGE_PATCH_JSON))
        .unwrap_or(false);

    if !is_merge_patch {
        return Err(ApiError::UnsupportedMediaType);
    }

    serde_json::from_slice(body)
        .map_err(|e| ApiError::bad_request(format!("Malformed body: {e}"), entity, "invalidbody"))
}
