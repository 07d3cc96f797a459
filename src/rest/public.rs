//! Public REST API clients (no authentication required).

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::api_url::ApiUrl;
use crate::error::ZaifError;
use crate::rest::client::{PublicExecutor, build_http_client, family_url};
use crate::rest::endpoints::{Endpoint, futures, public};
use crate::rest::types::{Depth, LastPrice, Ticker, Trade};
use crate::schema::{ParamValue, Params, Schema, Validator};

/// Settings shared by the public client builders.
#[derive(Debug, Clone, Default)]
struct PublicConfig {
    base_url: Option<String>,
    user_agent: Option<String>,
}

impl PublicConfig {
    fn into_executor(
        self,
        api_name: &str,
        version: u32,
        schema: Schema,
    ) -> Result<PublicExecutor, ZaifError> {
        let url = family_url(self.base_url.as_deref(), api_name)?.version(version);
        Ok(PublicExecutor::new(
            build_http_client(self.user_agent),
            url,
            Validator::new(schema),
        ))
    }
}

/// The Zaif spot public API (`/api/1`).
///
/// # Example
///
/// ```rust,no_run
/// use zaif_api_client::rest::PublicApi;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let api = PublicApi::new();
///     let ticker = api.ticker("btc_jpy").await?;
///     println!("last {} bid {} ask {}", ticker.last, ticker.bid, ticker.ask);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct PublicApi {
    executor: PublicExecutor,
}

impl PublicApi {
    /// Create a client against the production host.
    pub fn new() -> Self {
        let executor = PublicExecutor::new(
            build_http_client(None),
            ApiUrl::new(public::API_NAME).version(public::VERSION),
            Validator::default(),
        );
        Self { executor }
    }

    /// Create a new client builder.
    pub fn builder() -> PublicApiBuilder {
        PublicApiBuilder::default()
    }

    /// Last traded price of `currency_pair`.
    pub async fn last_price(&self, currency_pair: &str) -> Result<LastPrice, ZaifError> {
        self.pair_request(&public::LAST_PRICE, currency_pair).await
    }

    /// Ticker of `currency_pair`.
    pub async fn ticker(&self, currency_pair: &str) -> Result<Ticker, ZaifError> {
        self.pair_request(&public::TICKER, currency_pair).await
    }

    /// Recent trades of `currency_pair`, newest first.
    pub async fn trades(&self, currency_pair: &str) -> Result<Vec<Trade>, ZaifError> {
        self.pair_request(&public::TRADES, currency_pair).await
    }

    /// Order book of `currency_pair`.
    pub async fn depth(&self, currency_pair: &str) -> Result<Depth, ZaifError> {
        self.pair_request(&public::DEPTH, currency_pair).await
    }

    /// Details of `currency_pair`, or of every pair for `all`.
    pub async fn currency_pairs(&self, currency_pair: &str) -> Result<Value, ZaifError> {
        self.pair_request(&public::CURRENCY_PAIRS, currency_pair).await
    }

    /// Details of `currency`, or of every currency for `all`.
    pub async fn currencies(&self, currency: &str) -> Result<Value, ZaifError> {
        self.request(
            &public::CURRENCIES,
            &[("currency", ParamValue::from(currency))],
            &Params::new(),
        )
        .await
    }

    /// Call any public endpoint.
    ///
    /// `args` become path segments in order (null values are skipped) and
    /// `query` becomes the query string; both are validated first.
    pub async fn request<T>(
        &self,
        endpoint: &Endpoint,
        args: &[(&str, ParamValue)],
        query: &Params,
    ) -> Result<T, ZaifError>
    where
        T: DeserializeOwned,
    {
        self.executor.execute(endpoint, args, query).await
    }

    async fn pair_request<T>(&self, endpoint: &Endpoint, currency_pair: &str) -> Result<T, ZaifError>
    where
        T: DeserializeOwned,
    {
        self.request(
            endpoint,
            &[("currency_pair", ParamValue::from(currency_pair))],
            &Params::new(),
        )
        .await
    }
}

impl Default for PublicApi {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for [`PublicApi`].
#[derive(Debug, Clone, Default)]
pub struct PublicApiBuilder {
    config: PublicConfig,
}

impl PublicApiBuilder {
    /// Set the base URL (useful for testing with a mock server).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = Some(url.into());
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = Some(user_agent.into());
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<PublicApi, ZaifError> {
        let executor = self
            .config
            .into_executor(public::API_NAME, public::VERSION, Schema::default())?;
        Ok(PublicApi { executor })
    }
}

/// The Zaif futures public API (`/fapi/1`).
///
/// Every call is scoped by a group id (`all` or a number). The currency pair
/// may be omitted where Zaif allows it.
#[derive(Debug, Clone)]
pub struct FuturesPublicApi {
    executor: PublicExecutor,
}

impl FuturesPublicApi {
    /// Create a client against the production host.
    pub fn new() -> Self {
        let executor = PublicExecutor::new(
            build_http_client(None),
            ApiUrl::new(futures::API_NAME).version(futures::VERSION),
            Validator::new(Schema::futures_public()),
        );
        Self { executor }
    }

    /// Create a new client builder.
    pub fn builder() -> FuturesPublicApiBuilder {
        FuturesPublicApiBuilder::default()
    }

    /// Last price for `group_id`, optionally narrowed to one pair.
    pub async fn last_price(
        &self,
        group_id: impl Into<ParamValue>,
        currency_pair: Option<&str>,
    ) -> Result<Value, ZaifError> {
        self.group_request(&futures::LAST_PRICE, group_id.into(), currency_pair.into())
            .await
    }

    /// Ticker for `currency_pair` in `group_id`.
    pub async fn ticker(
        &self,
        group_id: impl Into<ParamValue>,
        currency_pair: &str,
    ) -> Result<Value, ZaifError> {
        self.group_request(&futures::TICKER, group_id.into(), currency_pair.into())
            .await
    }

    /// Recent trades for `currency_pair` in `group_id`.
    pub async fn trades(
        &self,
        group_id: impl Into<ParamValue>,
        currency_pair: &str,
    ) -> Result<Value, ZaifError> {
        self.group_request(&futures::TRADES, group_id.into(), currency_pair.into())
            .await
    }

    /// Order book for `currency_pair` in `group_id`.
    pub async fn depth(
        &self,
        group_id: impl Into<ParamValue>,
        currency_pair: &str,
    ) -> Result<Value, ZaifError> {
        self.group_request(&futures::DEPTH, group_id.into(), currency_pair.into())
            .await
    }

    /// Details of `group_id`, or of every group for `all`.
    pub async fn groups(&self, group_id: impl Into<ParamValue>) -> Result<Value, ZaifError> {
        self.request(&futures::GROUPS, &[("group_id", group_id.into())], &Params::new())
            .await
    }

    /// Call any futures public endpoint. See [`PublicApi::request`].
    pub async fn request<T>(
        &self,
        endpoint: &Endpoint,
        args: &[(&str, ParamValue)],
        query: &Params,
    ) -> Result<T, ZaifError>
    where
        T: DeserializeOwned,
    {
        self.executor.execute(endpoint, args, query).await
    }

    async fn group_request(
        &self,
        endpoint: &Endpoint,
        group_id: ParamValue,
        currency_pair: ParamValue,
    ) -> Result<Value, ZaifError> {
        self.request(
            endpoint,
            &[("group_id", group_id), ("currency_pair", currency_pair)],
            &Params::new(),
        )
        .await
    }
}

impl Default for FuturesPublicApi {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for [`FuturesPublicApi`].
#[derive(Debug, Clone, Default)]
pub struct FuturesPublicApiBuilder {
    config: PublicConfig,
}

impl FuturesPublicApiBuilder {
    /// Set the base URL (useful for testing with a mock server).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = Some(url.into());
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = Some(user_agent.into());
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<FuturesPublicApi, ZaifError> {
        let executor = self.config.into_executor(
            futures::API_NAME,
            futures::VERSION,
            Schema::futures_public(),
        )?;
        Ok(FuturesPublicApi { executor })
    }
}
