//! Uniform decoding of OTX responses.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{OtxError, Result};

/// Longest body excerpt carried inside a decode error.
const BODY_SNIPPET_LEN: usize = 512;

/// Error body shape returned by the OTX API.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<String>,
}

/// Decode a raw response.
///
/// `200 OK` bodies are decoded as `T`. Every other status becomes an
/// [`OtxError::Api`] carrying the status and the body's `detail` message.
/// The message is empty when the error body is not the expected JSON.
///
/// # Errors
///
/// [`OtxError::Decode`] when a `200` body does not match `T`, and
/// [`OtxError::Api`] for any other status.
pub fn decode<T: DeserializeOwned>(status: StatusCode, body: &[u8]) -> Result<T> {
    if status == StatusCode::OK {
        return serde_json::from_slice(body).map_err(|source| OtxError::Decode {
            status_code: status.as_u16(),
            body: snippet(body),
            source,
        });
    }

    let message = match serde_json::from_slice::<ErrorBody>(body) {
        Ok(ErrorBody {
            detail: Some(detail),
        }) => detail,
        Ok(_) => String::new(),
        Err(e) => {
            tracing::debug!(status = %status, error = %e, "error body is not JSON");
            String::new()
        }
    };

    Err(OtxError::Api {
        message,
        status_code: status.as_u16(),
    })
}

fn snippet(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    match text.char_indices().nth(BODY_SNIPPET_LEN) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.into_owned(),
    }
}
