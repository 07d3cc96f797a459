//! Example: Fetching public market data from Zaif.
//!
//! Run with: cargo run --example public_data

use zaif_api_client::rest::{FuturesPublicApi, PublicApi};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    // Public endpoints need no credentials
    let api = PublicApi::new();

    println!("=== Last Price ===");
    let price = api.last_price("btc_jpy").await?;
    println!("btc_jpy: {}", price.last_price);

    println!("\n=== Ticker ===");
    let ticker = api.ticker("btc_jpy").await?;
    println!(
        "last={} bid={} ask={} volume={}",
        ticker.last, ticker.bid, ticker.ask, ticker.volume
    );

    println!("\n=== Order Book ===");
    let depth = api.depth("btc_jpy").await?;
    for (price, amount) in depth.asks.iter().take(3) {
        println!("ask {price} x {amount}");
    }
    for (price, amount) in depth.bids.iter().take(3) {
        println!("bid {price} x {amount}");
    }

    println!("\n=== Recent Trades ===");
    for trade in api.trades("btc_jpy").await?.iter().take(5) {
        println!(
            "#{} {:?} {} @ {}",
            trade.tid, trade.trade_type, trade.amount, trade.price
        );
    }

    println!("\n=== Futures Groups ===");
    let groups = FuturesPublicApi::new().groups("all").await?;
    println!("{groups}");

    Ok(())
}
