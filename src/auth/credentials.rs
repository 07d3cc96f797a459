//! Credentials for the Zaif trade and OAuth APIs.
//!
//! A trade API key pair is used as-is: the key travels in the `key` header
//! and the secret keys the HMAC written to `sign`. Nothing is decoded, so the
//! secret is kept exactly as issued by Zaif.

use secrecy::{ExposeSecret, SecretString};

/// A trade API key pair.
#[derive(Clone)]
pub struct Credentials {
    key: String,
    secret: SecretString,
}

impl Credentials {
    /// Pair an API key with its secret.
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            secret: SecretString::from(secret.into()),
        }
    }

    /// The API key, sent verbatim in the `key` header.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The secret keying the body HMAC. Never sent on the wire.
    pub fn expose_secret(&self) -> &str {
        self.secret.expose_secret()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("key", &self.key)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// Source of the key pair used by [`HmacSigner`](crate::auth::HmacSigner).
///
/// Looked up on every signed request, so an implementation backed by a
/// secrets store can rotate keys without rebuilding the client.
pub trait CredentialsProvider: Send + Sync {
    /// The key pair to sign the next request with.
    fn get_credentials(&self) -> &Credentials;
}

impl CredentialsProvider for Credentials {
    fn get_credentials(&self) -> &Credentials {
        self
    }
}

/// A fixed key pair.
#[derive(Debug, Clone)]
pub struct StaticCredentials {
    credentials: Credentials,
}

impl StaticCredentials {
    /// Hold `key` and `secret` for the lifetime of the client.
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            credentials: Credentials::new(key, secret),
        }
    }
}

impl CredentialsProvider for StaticCredentials {
    fn get_credentials(&self) -> &Credentials {
        &self.credentials
    }
}

/// A key pair read once from the environment.
#[derive(Debug)]
pub struct EnvCredentials {
    credentials: Credentials,
}

impl EnvCredentials {
    /// Variable holding the API key.
    pub const KEY_VAR: &'static str = "ZAIF_API_KEY";
    /// Variable holding the API secret.
    pub const SECRET_VAR: &'static str = "ZAIF_API_SECRET";

    /// Read [`KEY_VAR`](Self::KEY_VAR) and [`SECRET_VAR`](Self::SECRET_VAR).
    /// `None` unless both are set.
    pub fn try_from_env() -> Option<Self> {
        Self::try_from_env_vars(Self::KEY_VAR, Self::SECRET_VAR)
    }

    /// Read the key pair from other variable names.
    pub fn try_from_env_vars(key_var: &str, secret_var: &str) -> Option<Self> {
        let key = std::env::var(key_var).ok()?;
        let secret = std::env::var(secret_var).ok()?;
        Some(Self {
            credentials: Credentials::new(key, secret),
        })
    }
}

impl CredentialsProvider for EnvCredentials {
    fn get_credentials(&self) -> &Credentials {
        &self.credentials
    }
}

/// OAuth client credentials used by the token endpoints.
///
/// Only [`TokenApi`](crate::rest::TokenApi) consumes these; they never sign
/// trade requests.
#[derive(Clone)]
pub struct ClientCredentials {
    /// OAuth client id
    pub client_id: String,
    client_secret: SecretString,
}

impl ClientCredentials {
    /// Create new OAuth client credentials.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: SecretString::from(client_secret.into()),
        }
    }

    /// Get the client secret for the token request body.
    pub fn expose_secret(&self) -> &str {
        self.client_secret.expose_secret()
    }
}

impl std::fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .finish()
    }
}
