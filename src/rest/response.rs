//! Interpretation of the trade API response envelope.
//!
//! ```text
//! { "success": 1, "return": <payload> }
//! { "success": 0, "error": "<message>" }
//! ```

use serde::Deserialize;
use serde::de::{DeserializeOwned, Deserializer};
use serde_json::Value;

use crate::error::{ApiError, ZaifError};

/// Envelope wrapping every trade API response.
#[derive(Debug, Deserialize)]
struct Envelope {
    success: i64,
    /// `None` when the key is absent; an explicit `null` is `Some(Value::Null)`.
    #[serde(rename = "return", default, deserialize_with = "present")]
    payload: Option<Value>,
    error: Option<String>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Turn a trade API response body into its payload or a typed error.
///
/// # Example
///
/// ```rust
/// use zaif_api_client::rest::interpret_envelope;
///
/// let payload: serde_json::Value = interpret_envelope(r#"{"success":1,"return":{"x":1}}"#).unwrap();
/// assert_eq!(payload, serde_json::json!({"x": 1}));
///
/// let err = interpret_envelope::<serde_json::Value>(r#"{"success":0,"error":"nonce out of range"}"#)
///     .unwrap_err();
/// assert!(err.is_nonce());
/// ```
pub fn interpret_envelope<T>(body: &str) -> Result<T, ZaifError>
where
    T: DeserializeOwned,
{
    let envelope: Envelope = serde_json::from_str(body).map_err(|e| {
        ZaifError::InvalidResponse(format!("Failed to parse response: {}. Body: {}", e, body))
    })?;

    match envelope.success {
        1 => {
            let payload = envelope.payload.ok_or_else(|| {
                ZaifError::InvalidResponse("Response missing 'return' field".to_string())
            })?;
            Ok(serde_json::from_value(payload)?)
        }
        0 => Err(classify_error(envelope.error.unwrap_or_default())),
        other => Err(ZaifError::InvalidResponse(format!(
            "Unexpected success flag {other}"
        ))),
    }
}

/// Map an exchange error message to [`ZaifError::Nonce`] or [`ZaifError::Api`].
pub fn classify_error(message: impl Into<String>) -> ZaifError {
    let error = ApiError::new(message);
    if error.is_nonce() {
        tracing::warn!(message = %error, "Zaif rejected the request nonce");
        ZaifError::Nonce(error)
    } else {
        ZaifError::Api(error)
    }
}
