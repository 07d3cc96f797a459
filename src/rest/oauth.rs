//! OAuth token endpoints.
//!
//! Plain form POSTs to `https://oauth.zaif.jp/v1/token`. The response is the
//! token document itself, not the trade API envelope.

use reqwest::header::CONTENT_TYPE;
use reqwest_middleware::ClientWithMiddleware;

use crate::api_url::ApiUrl;
use crate::auth::ClientCredentials;
use crate::error::ZaifError;
use crate::rest::client::{build_http_client, read_ok_body};
use crate::rest::endpoints::oauth;
use crate::rest::types::TokenResponse;

/// Client for exchanging authorization codes and refresh tokens.
///
/// # Example
///
/// ```rust,no_run
/// use zaif_api_client::auth::ClientCredentials;
/// use zaif_api_client::rest::{TokenApi, TradeApi};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let api = TokenApi::new(ClientCredentials::new("client_id", "client_secret"));
///     let token = api.get_token("authorization_code", None).await?;
///
///     let trade = TradeApi::builder().token(token.access_token).build()?;
///     println!("{}", trade.get_info2().await?);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct TokenApi {
    http_client: ClientWithMiddleware,
    url: ApiUrl,
    credentials: ClientCredentials,
}

impl TokenApi {
    /// Create a client against the production OAuth host.
    pub fn new(credentials: ClientCredentials) -> Self {
        Self {
            http_client: build_http_client(None),
            url: ApiUrl::new(oauth::API_NAME)
                .host(oauth::HOST)
                .with_path(oauth::TOKEN),
            credentials,
        }
    }

    /// Create a client against another base URL (useful for testing).
    pub fn with_base_url(credentials: ClientCredentials, base_url: &str) -> Result<Self, ZaifError> {
        Ok(Self {
            http_client: build_http_client(None),
            url: ApiUrl::from_base(base_url, oauth::API_NAME)?.with_path(oauth::TOKEN),
            credentials,
        })
    }

    /// Exchange an authorization `code` for an access token.
    pub async fn get_token(
        &self,
        code: &str,
        redirect_uri: Option<&str>,
    ) -> Result<TokenResponse, ZaifError> {
        let mut form = vec![
            ("code", code),
            ("client_id", self.credentials.client_id.as_str()),
            ("client_secret", self.credentials.expose_secret()),
            ("grant_type", "authorization_code"),
        ];
        if let Some(redirect_uri) = redirect_uri {
            form.push(("redirect_uri", redirect_uri));
        }
        self.post(&form).await
    }

    /// Exchange a refresh token for a new access token.
    pub async fn refresh_token(&self, refresh_token: &str) -> Result<TokenResponse, ZaifError> {
        let form = [
            ("refresh_token", refresh_token),
            ("client_id", self.credentials.client_id.as_str()),
            ("client_secret", self.credentials.expose_secret()),
            ("grant_type", "refresh_token"),
        ];
        self.post(&form).await
    }

    async fn post(&self, form: &[(&str, &str)]) -> Result<TokenResponse, ZaifError> {
        let body = serde_urlencoded::to_string(form)?;
        let url = self.url.full_url()?;
        tracing::debug!(%url, "Token request");

        let response = self
            .http_client
            .post(&url)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await?;
        let body = read_ok_body(response).await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_token_url() {
        let api = TokenApi::new(ClientCredentials::new("id", "secret"));
        assert_eq!(api.url.full_url().unwrap(), "https://oauth.zaif.jp/v1/token");
    }
}
