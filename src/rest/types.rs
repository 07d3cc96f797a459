//! Typed results of the spot public endpoints.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Result of `last_price`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LastPrice {
    /// Last traded price.
    pub last_price: Decimal,
}

/// Result of `ticker`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticker {
    /// Last traded price.
    pub last: Decimal,
    /// 24h high.
    pub high: Decimal,
    /// 24h low.
    pub low: Decimal,
    /// 24h volume-weighted average price.
    pub vwap: Decimal,
    /// 24h volume.
    pub volume: Decimal,
    /// Best bid.
    pub bid: Decimal,
    /// Best ask.
    pub ask: Decimal,
}

/// Taker side of a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeType {
    /// Buy.
    Bid,
    /// Sell.
    Ask,
}

/// One entry of `trades`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    /// Unix timestamp in seconds.
    pub date: i64,
    /// Execution price.
    pub price: Decimal,
    /// Executed amount.
    pub amount: Decimal,
    /// Trade id.
    pub tid: u64,
    /// Pair, e.g. `btc_jpy`.
    pub currency_pair: String,
    /// Taker side.
    pub trade_type: TradeType,
}

/// Result of `depth`: `[price, amount]` levels, best first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Depth {
    /// Sell side.
    pub asks: Vec<(Decimal, Decimal)>,
    /// Buy side.
    pub bids: Vec<(Decimal, Decimal)>,
}

/// Result of the OAuth token endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Bearer token for the trade API.
    pub access_token: String,
    /// Token type, normally `bearer`.
    #[serde(default)]
    pub token_type: Option<String>,
    /// Lifetime in seconds.
    #[serde(default)]
    pub expires_in: Option<u64>,
    /// Token to request a fresh access token with.
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Granted scopes.
    #[serde(default)]
    pub scope: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_levels_from_numbers() {
        let depth: Depth = serde_json::from_str(
            r#"{"asks":[[4500010.0,0.01],[4500020.5,1.2]],"bids":[[4499990,0.3]]}"#,
        )
        .unwrap();

        assert_eq!(depth.asks.len(), 2);
        assert_eq!(depth.asks[1].0, Decimal::new(45_000_205, 1));
        assert_eq!(depth.bids[0], (Decimal::new(4_499_990, 0), Decimal::new(3, 1)));
    }

    #[test]
    fn test_trade_type_lowercase() {
        let trade: Trade = serde_json::from_str(
            r#"{"date":1700000000,"price":4500000,"amount":0.01,"tid":1,
                "currency_pair":"btc_jpy","trade_type":"ask"}"#,
        )
        .unwrap();
        assert_eq!(trade.trade_type, TradeType::Ask);
        assert_eq!(trade.amount, Decimal::new(1, 2));
    }
}
