//! Request executors shared by every Zaif REST client.
//!
//! [`PublicExecutor`] issues unsigned GETs with the method name and positional
//! arguments in the path. [`PrivateExecutor`] validates, nonces, encodes and
//! signs a form body and POSTs it to a fixed endpoint. Both are parameterized
//! by a [`Validator`]; the private one additionally by a [`Signer`] and a
//! [`NonceProvider`].

use std::sync::Arc;

use reqwest::StatusCode;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;

use crate::api_url::ApiUrl;
use crate::auth::{
    CredentialsProvider, HmacSigner, IncreasingNonce, Nonce, NonceProvider, Signer, TokenSigner,
};
use crate::error::ZaifError;
use crate::rest::endpoints::Endpoint;
use crate::rest::response::interpret_envelope;
use crate::schema::{ParamValue, Params, Validator};

/// Build the HTTP client used by every REST executor.
pub(crate) fn build_http_client(user_agent: Option<String>) -> ClientWithMiddleware {
    let mut headers = HeaderMap::new();
    let user_agent =
        user_agent.unwrap_or_else(|| format!("zaif-api-client/{}", env!("CARGO_PKG_VERSION")));
    let header_value = HeaderValue::from_str(&user_agent)
        .unwrap_or_else(|_| HeaderValue::from_static("zaif-api-client"));
    headers.insert(USER_AGENT, header_value);

    let reqwest_client = reqwest::Client::builder()
        .default_headers(headers)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new());

    ClientBuilder::new(reqwest_client)
        .with(TracingMiddleware::default())
        .build()
}

/// Resolve the base of an API family, honouring a base URL override.
pub(crate) fn family_url(base_url: Option<&str>, api_name: &str) -> Result<ApiUrl, ZaifError> {
    match base_url {
        Some(base) => ApiUrl::from_base(base, api_name),
        None => Ok(ApiUrl::new(api_name)),
    }
}

/// Read a response body, treating any status other than 200 as a failure.
pub(crate) async fn read_ok_body(response: reqwest::Response) -> Result<String, ZaifError> {
    let status = response.status();
    let body = response.text().await?;

    if status != StatusCode::OK {
        return Err(ZaifError::HttpStatus {
            status: status.as_u16(),
            body,
        });
    }
    Ok(body)
}

/// Form-encode a trade request body: parameters, then `method`, then `nonce`.
pub(crate) fn encode_body(
    method: &str,
    nonce: Nonce,
    params: &Params,
) -> Result<String, ZaifError> {
    let mut pairs = params.to_pairs();
    pairs.push(("method".to_string(), method.to_string()));
    pairs.push(("nonce".to_string(), nonce.to_string()));
    Ok(serde_urlencoded::to_string(&pairs)?)
}

/// Executes unsigned, path-style GET requests.
#[derive(Debug, Clone)]
pub(crate) struct PublicExecutor {
    http_client: ClientWithMiddleware,
    url: ApiUrl,
    validator: Validator,
}

impl PublicExecutor {
    pub(crate) fn new(http_client: ClientWithMiddleware, url: ApiUrl, validator: Validator) -> Self {
        Self {
            http_client,
            url,
            validator,
        }
    }

    /// Validate, append `endpoint.name` and each non-null positional argument
    /// to the path, GET, and decode the body.
    pub(crate) async fn execute<T>(
        &self,
        endpoint: &Endpoint,
        args: &[(&str, ParamValue)],
        query: &Params,
    ) -> Result<T, ZaifError>
    where
        T: DeserializeOwned,
    {
        let mut all = query.clone();
        for (name, value) in args {
            all.insert(*name, value.clone());
        }
        self.validator.validate(endpoint.schema_keys, all)?;

        let mut url = self.url.clone();
        url.add_path(endpoint.name);
        for (_, value) in args.iter().filter(|(_, v)| !v.is_null()) {
            url.add_path(value);
        }
        for (key, value) in query.to_pairs() {
            url.add_param(key, value);
        }

        let url = url.full_url()?;
        tracing::debug!(method = endpoint.name, %url, "Public request");
        let response = self.http_client.get(&url).send().await?;
        let body = read_ok_body(response).await?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// How trade requests are authenticated.
#[derive(Clone)]
pub(crate) enum Authentication {
    Key(Arc<dyn CredentialsProvider>),
    Token(String),
}

impl Authentication {
    fn into_signer(self) -> Arc<dyn Signer> {
        match self {
            Authentication::Key(credentials) => Arc::new(HmacSigner::new(credentials)),
            Authentication::Token(token) => Arc::new(TokenSigner::new(token)),
        }
    }
}

/// Settings shared by the trade API builders.
#[derive(Clone, Default)]
pub(crate) struct PrivateConfig {
    pub(crate) base_url: Option<String>,
    pub(crate) user_agent: Option<String>,
    pub(crate) auth: Option<Authentication>,
    pub(crate) nonce_provider: Option<Arc<dyn NonceProvider>>,
}

impl PrivateConfig {
    pub(crate) fn into_executor(self, api_name: &str) -> Result<PrivateExecutor, ZaifError> {
        let signer = self
            .auth
            .ok_or(ZaifError::MissingCredentials)?
            .into_signer();
        let url = family_url(self.base_url.as_deref(), api_name)?;
        let nonce_provider = self
            .nonce_provider
            .unwrap_or_else(|| Arc::new(IncreasingNonce::new()));

        Ok(PrivateExecutor {
            http_client: build_http_client(self.user_agent),
            url,
            validator: Validator::default(),
            signer,
            nonce_provider,
            in_flight: Mutex::new(()),
        })
    }
}

/// Executes signed POST requests against a single trade endpoint.
pub(crate) struct PrivateExecutor {
    http_client: ClientWithMiddleware,
    url: ApiUrl,
    validator: Validator,
    signer: Arc<dyn Signer>,
    nonce_provider: Arc<dyn NonceProvider>,
    /// Held from nonce generation until the response arrives, so requests
    /// from one client reach Zaif in nonce order.
    in_flight: Mutex<()>,
}

impl PrivateExecutor {
    /// Validate and edit `params`, add `method` and a fresh `nonce`, sign the
    /// encoded body, POST it, and interpret the envelope.
    pub(crate) async fn execute<T>(&self, endpoint: &Endpoint, params: Params) -> Result<T, ZaifError>
    where
        T: DeserializeOwned,
    {
        let params = self.validator.validate(endpoint.schema_keys, params)?;
        let url = self.url.full_url()?;

        let body = {
            let _guard = self.in_flight.lock().await;

            let nonce = self.nonce_provider.next_nonce();
            let body = encode_body(endpoint.name, nonce, &params)?;
            let headers = self.signer.sign(&body)?;

            tracing::debug!(method = endpoint.name, %nonce, "Trade request");
            let response = self
                .http_client
                .post(&url)
                .headers(headers)
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(body)
                .send()
                .await?;
            read_ok_body(response).await?
        };

        interpret_envelope(&body)
    }

    /// The endpoint URL requests are POSTed to.
    pub(crate) fn url(&self) -> &ApiUrl {
        &self.url
    }
}

impl std::fmt::Debug for PrivateExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrivateExecutor")
            .field("url", &self.url)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_body_appends_method_and_nonce() {
        let params = Params::new()
            .with("currency_pair", "btc_jpy")
            .with("is_token", false);
        let nonce = Nonce::from_micros(1_700_000_000_000_001);

        let body = encode_body("active_orders", nonce, &params).unwrap();
        assert_eq!(
            body,
            "currency_pair=btc_jpy&is_token=false&method=active_orders&nonce=1700000000.000001"
        );
    }

    #[test]
    fn test_encode_body_escapes_values() {
        let params = Params::new().with("comment", "take profit & run");
        let body = encode_body("trade", Nonce::from_micros(1), &params).unwrap();
        assert!(body.starts_with("comment=take+profit+%26+run&method=trade&nonce="));
    }

    #[test]
    fn test_missing_auth_rejected() {
        let err = PrivateConfig::default().into_executor("tapi").unwrap_err();
        assert!(matches!(err, ZaifError::MissingCredentials));
    }
}
