//! # Zaif Client
//!
//! An async Rust client library for the Zaif exchange REST, trade and streaming APIs.
//!
//! ## Features
//!
//! - Public spot and futures market data
//! - Trade and leverage trade APIs, signed with HMAC-SHA512 or an OAuth token
//! - Parameter validation before any request is sent
//! - Strictly increasing nonces for private calls
//! - Pair streams over WebSocket with cooperative stop
//! - Financial precision with `rust_decimal`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use zaif_api_client::rest::PublicApi;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api = PublicApi::new();
//!     let price = api.last_price("btc_jpy").await?;
//!     println!("Last price: {}", price.last_price);
//!     Ok(())
//! }
//! ```
//!
//! Private calls surface nonce rejections as [`ZaifError::Nonce`] so the
//! caller can decide whether to retry:
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use zaif_api_client::auth::EnvCredentials;
//! use zaif_api_client::rest::TradeApi;
//! use zaif_api_client::ZaifError;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let credentials = Arc::new(EnvCredentials::try_from_env().ok_or("missing credentials")?);
//! let api = TradeApi::builder().credentials(credentials).build()?;
//!
//! let info = match api.get_info2().await {
//!     Err(ZaifError::Nonce(_)) => api.get_info2().await?,
//!     other => other?,
//! };
//! println!("{info}");
//! # Ok(())
//! # }
//! ```

pub mod api_url;
pub mod auth;
pub mod error;
pub mod rest;
pub mod schema;
pub mod stream;

// Re-export commonly used types at crate root
pub use error::ZaifError;
pub use schema::{ParamValue, Params};

/// Result type alias using ZaifError
pub type Result<T> = std::result::Result<T, ZaifError>;
