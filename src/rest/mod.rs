//! Zaif REST API clients.
//!
//! - [`PublicApi`] / [`FuturesPublicApi`] - unsigned, path-style GETs
//! - [`TradeApi`] / [`LeverageTradeApi`] - signed POSTs with a nonce
//! - [`TokenApi`] - OAuth token exchange
//!
//! All endpoint methods validate their parameters before any network call
//! and surface failures as [`ZaifError`](crate::error::ZaifError).

mod client;
pub mod endpoints;
mod leverage;
mod oauth;
mod public;
mod response;
mod trade;
pub mod types;

pub use endpoints::Endpoint;
pub use leverage::{LeverageTradeApi, LeverageTradeApiBuilder};
pub use oauth::TokenApi;
pub use public::{FuturesPublicApi, FuturesPublicApiBuilder, PublicApi, PublicApiBuilder};
pub use response::{classify_error, interpret_envelope};
pub use trade::{TradeApi, TradeApiBuilder};
pub use types::{Depth, LastPrice, Ticker, TokenResponse, Trade, TradeType};
