//! Trade REST API client (authentication required).
//!
//! Every call is a signed POST to `/tapi` carrying the method name and a
//! fresh nonce in the body. Payloads are returned as JSON values.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::auth::{CredentialsProvider, NonceProvider};
use crate::error::ZaifError;
use crate::rest::client::{Authentication, PrivateConfig, PrivateExecutor};
use crate::rest::endpoints::{Endpoint, trade};
use crate::schema::Params;

/// The Zaif trade API.
///
/// # Example
///
/// ```rust,no_run
/// use zaif_api_client::auth::StaticCredentials;
/// use zaif_api_client::rest::TradeApi;
/// use zaif_api_client::schema::Params;
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let credentials = Arc::new(StaticCredentials::new("api_key", "api_secret"));
///     let api = TradeApi::builder().credentials(credentials).build()?;
///
///     let orders = api
///         .active_orders(Params::new().with("currency_pair", "btc_jpy"))
///         .await?;
///     println!("{orders}");
///     Ok(())
/// }
/// ```
///
/// With an OAuth access token instead of a key pair:
///
/// ```rust,no_run
/// use zaif_api_client::rest::TradeApi;
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let api = TradeApi::builder().token("access_token").build()?;
/// let info = api.get_info2().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct TradeApi {
    executor: Arc<PrivateExecutor>,
    cancel_order: Endpoint,
}

impl TradeApi {
    /// Create a new client builder.
    pub fn builder() -> TradeApiBuilder {
        TradeApiBuilder::new()
    }

    /// Balances, API key rights, open order count and server time.
    pub async fn get_info(&self) -> Result<Value, ZaifError> {
        self.request(&trade::GET_INFO, Params::new()).await
    }

    /// Like [`get_info`](Self::get_info) without the trade count; cheaper.
    pub async fn get_info2(&self) -> Result<Value, ZaifError> {
        self.request(&trade::GET_INFO2, Params::new()).await
    }

    /// Chat nickname and icon.
    pub async fn get_personal_info(&self) -> Result<Value, ZaifError> {
        self.request(&trade::GET_PERSONAL_INFO, Params::new()).await
    }

    /// User id and e-mail address.
    pub async fn get_id_info(&self) -> Result<Value, ZaifError> {
        self.request(&trade::GET_ID_INFO, Params::new()).await
    }

    /// Executed trades. Accepts `from_num` (sent as `from`), `count`,
    /// `from_id`, `end_id`, `order`, `since`, `end`, `currency_pair`, `is_token`.
    pub async fn trade_history(&self, params: Params) -> Result<Value, ZaifError> {
        self.request(&trade::TRADE_HISTORY, params).await
    }

    /// Open orders. Accepts `currency_pair`, `is_token`, `is_token_both`.
    pub async fn active_orders(&self, params: Params) -> Result<Value, ZaifError> {
        self.request(&trade::ACTIVE_ORDERS, params).await
    }

    /// Withdrawal history. Requires `currency`.
    pub async fn withdraw_history(&self, params: Params) -> Result<Value, ZaifError> {
        self.request(&trade::WITHDRAW_HISTORY, params).await
    }

    /// Deposit history. Requires `currency`.
    pub async fn deposit_history(&self, params: Params) -> Result<Value, ZaifError> {
        self.request(&trade::DEPOSIT_HISTORY, params).await
    }

    /// Withdraw funds. Requires `currency`, `address`, `amount`.
    pub async fn withdraw(&self, params: Params) -> Result<Value, ZaifError> {
        self.request(&trade::WITHDRAW, params).await
    }

    /// Cancel an order. Requires `order_id`; `currency_pair` is accepted
    /// unless disabled with
    /// [`TradeApiBuilder::cancel_order_with_currency_pair`].
    pub async fn cancel_order(&self, params: Params) -> Result<Value, ZaifError> {
        self.request(&self.cancel_order, params).await
    }

    /// Place an order. Requires `action` (`bid` / `ask`), `price`, `amount`.
    pub async fn trade(&self, params: Params) -> Result<Value, ZaifError> {
        self.request(&trade::TRADE, params).await
    }

    /// Call any trade endpoint and decode its payload as `T`.
    pub async fn request<T>(&self, endpoint: &Endpoint, params: Params) -> Result<T, ZaifError>
    where
        T: DeserializeOwned,
    {
        self.executor.execute(endpoint, params).await
    }
}

impl std::fmt::Debug for TradeApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TradeApi")
            .field("url", &self.executor.url())
            .field("cancel_order_keys", &self.cancel_order.schema_keys)
            .finish()
    }
}

/// Builder for [`TradeApi`].
///
/// Exactly one authentication method is used: the last of
/// [`credentials`](Self::credentials) or [`token`](Self::token) set wins.
pub struct TradeApiBuilder {
    config: PrivateConfig,
    cancel_order_with_currency_pair: bool,
}

impl TradeApiBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: PrivateConfig::default(),
            cancel_order_with_currency_pair: true,
        }
    }

    /// Set the base URL (useful for testing with a mock server).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = Some(url.into());
        self
    }

    /// Sign requests with an API key and secret.
    pub fn credentials(mut self, credentials: Arc<dyn CredentialsProvider>) -> Self {
        self.config.auth = Some(Authentication::Key(credentials));
        self
    }

    /// Authenticate requests with an OAuth access token.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.config.auth = Some(Authentication::Token(token.into()));
        self
    }

    /// Set a custom nonce provider.
    pub fn nonce_provider(mut self, provider: Arc<dyn NonceProvider>) -> Self {
        self.config.nonce_provider = Some(provider);
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = Some(user_agent.into());
        self
    }

    /// Whether `cancel_order` accepts a `currency_pair` qualifier (default `true`).
    pub fn cancel_order_with_currency_pair(mut self, enabled: bool) -> Self {
        self.cancel_order_with_currency_pair = enabled;
        self
    }

    /// Build the client.
    ///
    /// Fails with [`ZaifError::MissingCredentials`] if no authentication was set.
    pub fn build(self) -> Result<TradeApi, ZaifError> {
        let cancel_order = if self.cancel_order_with_currency_pair {
            trade::CANCEL_ORDER
        } else {
            trade::CANCEL_ORDER_BY_ID
        };
        Ok(TradeApi {
            executor: Arc::new(self.config.into_executor(trade::API_NAME)?),
            cancel_order,
        })
    }
}

impl Default for TradeApiBuilder {
    fn default() -> Self {
        Self::new()
    }
}
