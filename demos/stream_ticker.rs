//! Example: Streaming board updates for one pair.
//!
//! Run with: cargo run --example stream_ticker

use futures_util::StreamExt;
use zaif_api_client::stream::{StreamApi, stop_channel};

const MAX_MESSAGES: usize = 10;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let api = StreamApi::new();
    let (handle, signal) = stop_channel();

    println!("Connecting...");
    let mut stream = api.execute("btc_jpy", signal).await?;
    println!("Connected to {}", stream.url());

    // Stop on Ctrl+C; the stream finishes its current receive first
    let ctrl_c = handle.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c.stop();
        }
    });

    let mut count = 0;
    while let Some(message) = stream.next().await {
        let message = message?;
        println!(
            "[{}] last={} asks={} bids={}",
            message["timestamp"],
            message["last_price"]["price"],
            message["asks"].as_array().map_or(0, Vec::len),
            message["bids"].as_array().map_or(0, Vec::len),
        );

        count += 1;
        if count >= MAX_MESSAGES {
            handle.stop();
        }
    }

    println!("Stream closed after {count} messages");
    Ok(())
}
