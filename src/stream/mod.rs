//! Zaif public streaming API.
//!
//! One WebSocket connection per currency pair, yielding decoded JSON frames
//! until the caller signals stop.
//!
//! # Example
//!
//! ```rust,no_run
//! use futures_util::StreamExt;
//! use zaif_api_client::stream::{StreamApi, stop_channel};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api = StreamApi::new();
//!     let (handle, signal) = stop_channel();
//!     let mut stream = api.execute("btc_jpy", signal).await?;
//!
//!     while let Some(message) = stream.next().await {
//!         println!("{}", message?["last_price"]);
//!         handle.stop();
//!     }
//!     Ok(())
//! }
//! ```

mod client;
mod stream;

pub use client::{StreamApi, StreamApiBuilder};
pub use stream::{PairStream, StopHandle, StopSignal, stop_channel};
