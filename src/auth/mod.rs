//! Authentication module for the Zaif trade API.
//!
//! This module provides:
//! - Credential management with secure secret storage
//! - Nonce generation for replay attack prevention
//! - Request signers (HMAC-SHA512 over the body, or an OAuth bearer token)

mod credentials;
mod nonce;
mod signer;

pub use credentials::{
    ClientCredentials, Credentials, CredentialsProvider, EnvCredentials, StaticCredentials,
};
pub use nonce::{IncreasingNonce, Nonce, NonceProvider, TimestampNonce};
pub use signer::{HmacSigner, Signer, TokenSigner, sign_body};
