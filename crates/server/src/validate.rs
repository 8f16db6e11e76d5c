//! Extension-validation middleware.
//!
//! Runs ahead of every file operation: finds the filename the request is
//! about and rejects it with a 400 unless it ends in `.xlsx`. The filename is
//! taken from the `fileName` query parameter first, then from the JSON body
//! fields `fileName`, `oldName`, `newName`, in that order.

use crate::error::ApiError;
use crate::paths;
use axum::body::{to_bytes, Body};
use axum::extract::{Query, Request};
use axum::http::Uri;
use axum::middleware::Next;
use axum::response::Response;
use serde::Deserialize;
use serde_json::Value;

/// Largest request body the validator will buffer. Row payloads are small;
/// anything beyond this is not a legitimate request for this API.
const BODY_LIMIT: usize = 16 * 1024 * 1024;

#[derive(Deserialize)]
struct FileNameQuery {
    #[serde(rename = "fileName")]
    file_name: Option<String>,
}

pub async fn require_xlsx(req: Request, next: Next) -> Result<Response, ApiError> {
    let (parts, body) = req.into_parts();
    let bytes = to_bytes(body, BODY_LIMIT)
        .await
        .map_err(|_| ApiError::Internal)?;

    let file_name = file_name_from_query(&parts.uri).or_else(|| file_name_from_body(&bytes));

    match file_name {
        Some(name) if paths::is_xlsx(&name) => {}
        _ => return Err(ApiError::InvalidExtension),
    }

    // The body was consumed to inspect it; hand the handler an equivalent
    // request.
    let req = Request::from_parts(parts, Body::from(bytes));
    Ok(next.run(req).await)
}

fn file_name_from_query(uri: &Uri) -> Option<String> {
    Query::<FileNameQuery>::try_from_uri(uri)
        .ok()
        .and_then(|query| query.0.file_name)
}

fn file_name_from_body(bytes: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(bytes).ok()?;
    for field in ["fileName", "oldName", "newName"] {
        if let Some(name) = value.get(field).and_then(Value::as_str) {
            return Some(name.to_string());
        }
    }
    None
}
