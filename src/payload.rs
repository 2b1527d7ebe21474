//! Decoding of request payloads into declared models.

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;

/// Decode a JSON request body.
///
/// # Errors
///
/// Returns [`Error::InvalidBody`] if the body is not UTF-8 or not valid JSON for `T`.
pub fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    let text = std::str::from_utf8(body)
        .map_err(|e| Error::InvalidBody(format!("Invalid JSON body: {}", e)))?;
    serde_json::from_str(text).map_err(|e| Error::InvalidBody(format!("Invalid JSON body: {}", e)))
}
