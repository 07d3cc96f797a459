//! Leverage trade REST API client (margin and futures positions).

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::auth::{CredentialsProvider, NonceProvider};
use crate::error::ZaifError;
use crate::rest::client::{Authentication, PrivateConfig, PrivateExecutor};
use crate::rest::endpoints::{Endpoint, leverage};
use crate::schema::Params;

/// The Zaif leverage trade API, signed POSTs to `/tlapi`.
///
/// Parameters follow the same schema as [`TradeApi`](crate::rest::TradeApi);
/// `type` selects `margin` or `futures`, the latter scoped by `group_id`.
#[derive(Clone)]
pub struct LeverageTradeApi {
    executor: Arc<PrivateExecutor>,
}

impl LeverageTradeApi {
    /// Create a new client builder.
    pub fn builder() -> LeverageTradeApiBuilder {
        LeverageTradeApiBuilder::default()
    }

    /// Positions, filtered like trade history.
    pub async fn get_positions(&self, params: Params) -> Result<Value, ZaifError> {
        self.request(&leverage::GET_POSITIONS, params).await
    }

    /// History of the position `leverage_id`.
    pub async fn position_history(&self, params: Params) -> Result<Value, ZaifError> {
        self.request(&leverage::POSITION_HISTORY, params).await
    }

    /// Open positions.
    pub async fn active_positions(&self, params: Params) -> Result<Value, ZaifError> {
        self.request(&leverage::ACTIVE_POSITIONS, params).await
    }

    /// Open a position. Requires `action`, `price`, `amount`.
    pub async fn create_position(&self, params: Params) -> Result<Value, ZaifError> {
        self.request(&leverage::CREATE_POSITION, params).await
    }

    /// Change price, limit or stop of the position `leverage_id`.
    pub async fn change_position(&self, params: Params) -> Result<Value, ZaifError> {
        self.request(&leverage::CHANGE_POSITION, params).await
    }

    /// Cancel the position `leverage_id`.
    pub async fn cancel_position(&self, params: Params) -> Result<Value, ZaifError> {
        self.request(&leverage::CANCEL_POSITION, params).await
    }

    /// Call any leverage endpoint and decode its payload as `T`.
    pub async fn request<T>(&self, endpoint: &Endpoint, params: Params) -> Result<T, ZaifError>
    where
        T: DeserializeOwned,
    {
        self.executor.execute(endpoint, params).await
    }
}

impl std::fmt::Debug for LeverageTradeApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LeverageTradeApi")
            .field("url", &self.executor.url())
            .finish()
    }
}

/// Builder for [`LeverageTradeApi`].
#[derive(Default)]
pub struct LeverageTradeApiBuilder {
    config: PrivateConfig,
}

impl LeverageTradeApiBuilder {
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

    /// Build the client.
    pub fn build(self) -> Result<LeverageTradeApi, ZaifError> {
        Ok(LeverageTradeApi {
            executor: Arc::new(self.config.into_executor(leverage::API_NAME)?),
        })
    }
}
