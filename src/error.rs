//! Error types for the Zaif client library.

use std::collections::BTreeMap;

use thiserror::Error;

/// The main error type for all Zaif client operations.
#[derive(Error, Debug)]
pub enum ZaifError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP request with middleware failed
    #[error("HTTP request failed: {0}")]
    HttpMiddleware(#[from] reqwest_middleware::Error),

    /// WebSocket protocol error
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    /// WebSocket communication error (with message)
    #[error("WebSocket error: {0}")]
    WebSocketMsg(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    /// Form encoding of a query string or request body failed
    #[error("Form encoding error: {0}")]
    Encode(#[from] serde_urlencoded::ser::Error),

    /// Request parameters failed schema validation; no request was sent
    #[error("Invalid parameters: {0}")]
    Validation(ValidationErrors),

    /// The server answered with a status other than 200
    #[error("Unexpected HTTP status {status}")]
    HttpStatus {
        /// Observed status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// Zaif reported `success: 0` with a non-nonce message
    #[error("Zaif API error: {0}")]
    Api(ApiError),

    /// Zaif rejected the request nonce; retry with a fresh nonce
    #[error("Zaif nonce error: {0}")]
    Nonce(ApiError),

    /// Authentication error
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Invalid response from the API
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Missing required credentials
    #[error("Missing credentials: API key and secret or a token required for trade endpoints")]
    MissingCredentials,
}

impl ZaifError {
    /// Whether the library considers the failed call safe to retry as-is.
    ///
    /// Only nonce rejections qualify: the next attempt draws a larger nonce.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ZaifError::Nonce(_))
    }

    /// Whether this is a nonce rejection.
    pub fn is_nonce(&self) -> bool {
        matches!(self, ZaifError::Nonce(_))
    }

    /// The validation violations, if this is a validation error.
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            ZaifError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

/// An error message reported by Zaif in a `success: 0` envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// The exchange's literal message (e.g., "insufficient funds")
    pub message: String,
}

impl ApiError {
    /// Create a new API error from a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Check if this is a nonce error.
    ///
    /// Zaif prefixes every nonce complaint with the literal `nonce`
    /// (e.g. "nonce should be bigger than ...").
    pub fn is_nonce(&self) -> bool {
        self.message.starts_with("nonce")
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Every schema violation found in one parameter set, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    fields: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    /// Create an empty error set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one violation for `field`.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.fields
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    /// Whether no violation was recorded.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of fields with at least one violation.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether `field` has at least one violation.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// The violations recorded for `field`.
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.fields.get(field).map(Vec::as_slice)
    }

    /// Iterate over `(field, messages)` pairs in field-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match serde_json::to_string(&self.fields) {
            Ok(json) => f.write_str(&json),
            Err(_) => write!(f, "{:?}", self.fields),
        }
    }
}

/// Known Zaif error messages for pattern matching.
pub mod error_messages {
    /// Sent when the nonce is not larger than the previous one.
    pub const NONCE_NOT_INCREMENTED: &str = "nonce not incremented";
    /// Sent when the nonce is out of the accepted range.
    pub const NONCE_OUT_OF_RANGE: &str = "nonce out of range";
    /// Sent when the balance cannot cover the order.
    pub const INSUFFICIENT_FUNDS: &str = "insufficient funds";
}
