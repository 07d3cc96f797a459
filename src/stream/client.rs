//! Streaming API client.

use tokio_tungstenite::connect_async;

use crate::api_url::ApiUrl;
use crate::error::ZaifError;
use crate::rest::endpoints::stream;
use crate::schema::{ParamValue, Validator};
use crate::stream::stream::{PairStream, StopSignal};

/// Opens pair subscriptions on `wss://ws.zaif.jp:8888/stream`.
///
/// Each [`execute`](Self::execute) call opens its own connection, so one
/// client can drive several pairs at once from separate tasks.
#[derive(Debug, Clone)]
pub struct StreamApi {
    url: ApiUrl,
    validator: Validator,
}

impl StreamApi {
    /// Create a client against the production stream host.
    pub fn new() -> Self {
        Self {
            url: ApiUrl::new(stream::API_NAME)
                .scheme("wss")
                .host(stream::HOST)
                .port(stream::PORT),
            validator: Validator::default(),
        }
    }

    /// Create a new client builder.
    pub fn builder() -> StreamApiBuilder {
        StreamApiBuilder::default()
    }

    /// Connect and subscribe to `currency_pair`.
    ///
    /// The parameter is validated before connecting. The returned stream
    /// runs until `stop` is signalled, the server closes, or an error occurs.
    pub async fn execute(
        &self,
        currency_pair: &str,
        stop: StopSignal,
    ) -> Result<PairStream, ZaifError> {
        let params = self.validator.validate_positional(
            stream::STREAM.schema_keys,
            &[("currency_pair", ParamValue::from(currency_pair))],
        )?;

        let mut url = self.url.clone();
        for (key, value) in params.iter() {
            url.add_param(key, value);
        }
        let url = url.full_url()?;

        tracing::debug!(%url, "Opening stream");
        let (ws, _) = connect_async(url.as_str())
            .await
            .map_err(|e| ZaifError::WebSocketMsg(format!("Failed to connect to {url}: {e}")))?;

        Ok(PairStream::new(ws, stop, url))
    }
}

impl Default for StreamApi {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for [`StreamApi`].
#[derive(Debug, Clone, Default)]
pub struct StreamApiBuilder {
    base_url: Option<String>,
}

impl StreamApiBuilder {
    /// Set the base URL, e.g. `ws://127.0.0.1:9000` for a local server.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<StreamApi, ZaifError> {
        let url = match self.base_url {
            Some(base) => ApiUrl::from_base(&base, stream::API_NAME)?,
            None => return Ok(StreamApi::new()),
        };
        Ok(StreamApi {
            url,
            validator: Validator::default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_stream_url() {
        let api = StreamApi::new();
        let url = api.url.clone().with_param("currency_pair", "btc_jpy");
        assert_eq!(
            url.full_url().unwrap(),
            "wss://ws.zaif.jp:8888/stream?currency_pair=btc_jpy"
        );
    }
}
