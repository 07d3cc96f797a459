//! Zaif REST API endpoint descriptors.
//!
//! An [`Endpoint`] names a method and the schema keys it accepts. Public
//! endpoints use the name as the first path segment; trade endpoints send it
//! as the `method` field of the signed body.

/// A method name plus the parameters it accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    /// Path segment (public) or `method` body field (trade).
    pub name: &'static str,
    /// Schema keys the endpoint accepts.
    pub schema_keys: &'static [&'static str],
}

impl Endpoint {
    /// Describe an endpoint.
    pub const fn new(name: &'static str, schema_keys: &'static [&'static str]) -> Self {
        Self { name, schema_keys }
    }
}

/// Spot public endpoints under `/api/1`.
pub mod public {
    use super::Endpoint;

    /// API family path component.
    pub const API_NAME: &str = "api";
    /// API version path component.
    pub const VERSION: u32 = 1;

    /// Last traded price.
    pub const LAST_PRICE: Endpoint = Endpoint::new("last_price", &["currency_pair"]);
    /// Ticker.
    pub const TICKER: Endpoint = Endpoint::new("ticker", &["currency_pair"]);
    /// Recent trades.
    pub const TRADES: Endpoint = Endpoint::new("trades", &["currency_pair"]);
    /// Order book.
    pub const DEPTH: Endpoint = Endpoint::new("depth", &["currency_pair"]);
    /// Currency pair details (`all` for every pair).
    pub const CURRENCY_PAIRS: Endpoint = Endpoint::new("currency_pairs", &["currency_pair"]);
    /// Currency details (`all` for every currency).
    pub const CURRENCIES: Endpoint = Endpoint::new("currencies", &["currency"]);
}

/// Futures public endpoints under `/fapi/1`, keyed by group id.
pub mod futures {
    use super::Endpoint;

    /// API family path component.
    pub const API_NAME: &str = "fapi";
    /// API version path component.
    pub const VERSION: u32 = 1;

    /// Last traded price.
    pub const LAST_PRICE: Endpoint = Endpoint::new("last_price", &["currency_pair", "group_id"]);
    /// Ticker.
    pub const TICKER: Endpoint = Endpoint::new("ticker", &["currency_pair", "group_id"]);
    /// Recent trades.
    pub const TRADES: Endpoint = Endpoint::new("trades", &["currency_pair", "group_id"]);
    /// Order book.
    pub const DEPTH: Endpoint = Endpoint::new("depth", &["currency_pair", "group_id"]);
    /// Group details (`all` for every group).
    pub const GROUPS: Endpoint = Endpoint::new("groups", &["group_id"]);
}

/// Trade endpoints, all POSTed to `/tapi`.
pub mod trade {
    use super::Endpoint;

    /// Fixed trade API path.
    pub const API_NAME: &str = "tapi";

    const HISTORY_KEYS: &[&str] = &[
        "currency", "from_num", "count", "from_id", "end_id", "order", "since", "end", "is_token",
    ];

    /// Balances, rights and open order count.
    pub const GET_INFO: Endpoint = Endpoint::new("get_info", &[]);
    /// Lightweight variant of `get_info`.
    pub const GET_INFO2: Endpoint = Endpoint::new("get_info2", &[]);
    /// Chat nickname and icon.
    pub const GET_PERSONAL_INFO: Endpoint = Endpoint::new("get_personal_info", &[]);
    /// User id and e-mail.
    pub const GET_ID_INFO: Endpoint = Endpoint::new("get_id_info", &[]);
    /// Executed trade history.
    pub const TRADE_HISTORY: Endpoint = Endpoint::new(
        "trade_history",
        &[
            "from_num", "count", "from_id", "end_id", "order", "since", "end", "currency_pair",
            "is_token",
        ],
    );
    /// Open orders.
    pub const ACTIVE_ORDERS: Endpoint =
        Endpoint::new("active_orders", &["currency_pair", "is_token", "is_token_both"]);
    /// Withdrawal history for one currency.
    pub const WITHDRAW_HISTORY: Endpoint = Endpoint::new("withdraw_history", HISTORY_KEYS);
    /// Deposit history for one currency.
    pub const DEPOSIT_HISTORY: Endpoint = Endpoint::new("deposit_history", HISTORY_KEYS);
    /// Withdraw funds.
    pub const WITHDRAW: Endpoint = Endpoint::new(
        "withdraw",
        &["currency", "address", "message", "amount", "opt_fee"],
    );
    /// Cancel an order, optionally qualified by currency pair.
    pub const CANCEL_ORDER: Endpoint =
        Endpoint::new("cancel_order", &["order_id", "is_token", "currency_pair"]);
    /// Cancel an order identified by id only.
    pub const CANCEL_ORDER_BY_ID: Endpoint = Endpoint::new("cancel_order", &["order_id", "is_token"]);
    /// Place an order.
    pub const TRADE: Endpoint = Endpoint::new(
        "trade",
        &["currency_pair", "action", "price", "amount", "limit", "comment"],
    );
}

/// Leverage (margin and futures) trade endpoints, all POSTed to `/tlapi`.
pub mod leverage {
    use super::Endpoint;

    /// Fixed leverage trade API path.
    pub const API_NAME: &str = "tlapi";

    /// Position list.
    pub const GET_POSITIONS: Endpoint = Endpoint::new(
        "get_positions",
        &[
            "type", "group_id", "from_num", "count", "from_id", "end_id", "order", "since", "end",
            "currency_pair",
        ],
    );
    /// History of one position.
    pub const POSITION_HISTORY: Endpoint =
        Endpoint::new("position_history", &["type", "group_id", "leverage_id"]);
    /// Open positions.
    pub const ACTIVE_POSITIONS: Endpoint =
        Endpoint::new("active_positions", &["type", "group_id", "currency_pair"]);
    /// Open a position.
    pub const CREATE_POSITION: Endpoint = Endpoint::new(
        "create_position",
        &[
            "type", "currency_pair", "action", "amount", "price", "leverage", "limit", "stop",
            "group_id",
        ],
    );
    /// Change price, limit or stop of a position.
    pub const CHANGE_POSITION: Endpoint = Endpoint::new(
        "change_position",
        &["type", "group_id", "leverage_id", "price", "limit", "stop"],
    );
    /// Cancel a position.
    pub const CANCEL_POSITION: Endpoint =
        Endpoint::new("cancel_position", &["type", "group_id", "leverage_id"]);
}

/// The public stream.
pub mod stream {
    use super::Endpoint;

    /// Stream path.
    pub const API_NAME: &str = "stream";
    /// Streaming port.
    pub const PORT: u16 = 8888;
    /// Streaming host.
    pub const HOST: &str = "ws.zaif.jp";

    /// Pair subscription.
    pub const STREAM: Endpoint = Endpoint::new("stream", &["currency_pair"]);
}

/// OAuth token endpoint path components (`/v1/token`).
pub mod oauth {
    /// Host of the OAuth endpoints.
    pub const HOST: &str = "oauth.zaif.jp";
    /// Version path component.
    pub const API_NAME: &str = "v1";
    /// Token path segment.
    pub const TOKEN: &str = "token";
}
