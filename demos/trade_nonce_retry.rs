//! Example: Private trade calls with caller-side nonce retry.
//!
//! Requires ZAIF_API_KEY and ZAIF_API_SECRET.
//!
//! Run with: cargo run --example trade_nonce_retry

use std::sync::Arc;

use zaif_api_client::auth::EnvCredentials;
use zaif_api_client::rest::TradeApi;
use zaif_api_client::{Params, ZaifError};

const MAX_ATTEMPTS: usize = 3;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let Some(credentials) = EnvCredentials::try_from_env() else {
        println!("Set ZAIF_API_KEY and ZAIF_API_SECRET to run this example.");
        return Ok(());
    };
    let api = TradeApi::builder()
        .credentials(Arc::new(credentials))
        .build()?;

    let params = Params::new().with("currency_pair", "btc_jpy");
    let mut attempt = 1;
    let orders = loop {
        match api.active_orders(params.clone()).await {
            Err(ZaifError::Nonce(e)) if attempt < MAX_ATTEMPTS => {
                println!("Nonce rejected ({e}), retrying");
                attempt += 1;
            }
            other => break other?,
        }
    };
    println!("Active orders: {orders}");

    // Invalid parameters fail locally with every violation listed
    let invalid = Params::new().with("action", "buy").with("price", "cheap");
    if let Err(e) = api.trade(invalid).await {
        println!("Rejected before sending: {e}");
    }

    Ok(())
}
