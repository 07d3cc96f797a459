//! Request signing for the Zaif trade API.
//!
//! Two strategies exist, one per credential kind:
//!
//! ```text
//! API key:  headers { key: <api key>, sign: hex(HMAC-SHA512(body, secret)) }
//! OAuth:    headers { token: <access token> }
//! ```
//!
//! Signers always receive the final, form-encoded body. The bytes handed to
//! [`Signer::sign`] must be the bytes sent on the wire.

use std::sync::Arc;

use hmac::{Hmac, Mac};
use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha512;

use crate::auth::CredentialsProvider;
use crate::error::ZaifError;

type HmacSha512 = Hmac<Sha512>;

const KEY_HEADER: &str = "key";
const SIGN_HEADER: &str = "sign";
const TOKEN_HEADER: &str = "token";

/// Turns an encoded request body into authentication headers.
pub trait Signer: Send + Sync {
    /// Produce the headers authenticating `body`.
    fn sign(&self, body: &str) -> Result<HeaderMap, ZaifError>;
}

/// Compute the hex-encoded HMAC-SHA512 of `body` keyed by `secret`.
///
/// # Example
///
/// ```rust
/// use zaif_api_client::auth::sign_body;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let signature = sign_body("api_secret", "method=get_info&nonce=1700000000.000001")?;
/// assert_eq!(signature.len(), 128);
/// # Ok(())
/// # }
/// ```
pub fn sign_body(secret: &str, body: &str) -> Result<String, ZaifError> {
    let mut hmac = HmacSha512::new_from_slice(secret.as_bytes())
        .map_err(|e| ZaifError::Auth(format!("Invalid HMAC key: {e}")))?;
    hmac.update(body.as_bytes());
    Ok(hex::encode(hmac.finalize().into_bytes()))
}

fn header_value(value: &str, what: &str) -> Result<HeaderValue, ZaifError> {
    HeaderValue::from_str(value)
        .map_err(|_| ZaifError::Auth(format!("{what} contains characters not allowed in a header")))
}

/// Signs requests with an API key and secret.
#[derive(Clone)]
pub struct HmacSigner {
    credentials: Arc<dyn CredentialsProvider>,
}

impl HmacSigner {
    /// Create a signer over a credentials provider.
    pub fn new(credentials: Arc<dyn CredentialsProvider>) -> Self {
        Self { credentials }
    }
}

impl Signer for HmacSigner {
    fn sign(&self, body: &str) -> Result<HeaderMap, ZaifError> {
        let creds = self.credentials.get_credentials();
        let signature = sign_body(creds.expose_secret(), body)?;

        let mut headers = HeaderMap::new();
        headers.insert(KEY_HEADER, header_value(creds.key(), "API key")?);
        headers.insert(SIGN_HEADER, header_value(&signature, "Signature")?);
        Ok(headers)
    }
}

impl std::fmt::Debug for HmacSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HmacSigner")
            .field("key", &self.credentials.get_credentials().key())
            .finish()
    }
}

/// Authenticates requests with an OAuth access token. The body is not signed.
#[derive(Clone)]
pub struct TokenSigner {
    token: SecretString,
}

impl TokenSigner {
    /// Create a signer from an access token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: SecretString::from(token.into()),
        }
    }
}

impl Signer for TokenSigner {
    fn sign(&self, _body: &str) -> Result<HeaderMap, ZaifError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            TOKEN_HEADER,
            header_value(self.token.expose_secret(), "Token")?,
        );
        Ok(headers)
    }
}

impl std::fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSigner")
            .field("token", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::StaticCredentials;

    fn hmac_signer(key: &str, secret: &str) -> HmacSigner {
        HmacSigner::new(Arc::new(StaticCredentials::new(key, secret)))
    }

    #[test]
    fn test_sign_body_matches_rfc4231_vector() {
        // RFC 4231, test case 2.
        let signature = sign_body("Jefe", "what do ya want for nothing?").unwrap();
        assert_eq!(
            signature,
            "164b7a7bfcf819e2e395fbe73b56e0a387bd64222e831fd610270cd7ea250554\
             9758bf75c05a994a6d034f65f8f0e6fdcaeab1a34d4a6b4b636e070a38bce737"
        );
    }

    #[test]
    fn test_signature_matches_independent_hmac() {
        let body = "currency_pair=btc_jpy&method=active_orders&nonce=1700000000.000001";

        let mut mac = HmacSha512::new_from_slice(b"my_secret").unwrap();
        mac.update(body.as_bytes());
        let expected = hex::encode(mac.finalize().into_bytes());

        let headers = hmac_signer("my_key", "my_secret").sign(body).unwrap();
        assert_eq!(headers.get("sign").unwrap(), expected.as_str());
        assert_eq!(headers.get("key").unwrap(), "my_key");
    }

    #[test]
    fn test_signature_consistency() {
        let signer = hmac_signer("key", "secret");
        let body = "method=get_info&nonce=1700000000.000001";

        let sig1 = signer.sign(body).unwrap();
        let sig2 = signer.sign(body).unwrap();
        assert_eq!(sig1.get("sign"), sig2.get("sign"));
    }

    #[test]
    fn test_signature_changes_with_one_byte() {
        let sig1 = sign_body("secret", "method=get_info&nonce=1700000000.000001").unwrap();
        let sig2 = sign_body("secret", "method=get_info&nonce=1700000000.000002").unwrap();
        assert_ne!(sig1, sig2);
    }

    #[test]
    fn test_token_signer_emits_only_token() {
        let headers = TokenSigner::new("access-token").sign("method=get_info").unwrap();
        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get("token").unwrap(), "access-token");
    }

    #[test]
    fn test_token_signer_debug_redacted() {
        let debug_str = format!("{:?}", TokenSigner::new("access-token"));
        assert!(!debug_str.contains("access-token"));
    }
}
