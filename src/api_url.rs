//! Request URL composition.
//!
//! Every Zaif endpoint URL has the shape
//!
//! ```text
//! scheme://host[:port][/api_name][/version][/segment...][?query]
//! ```
//!
//! Public endpoints put the method name and positional arguments in the path,
//! the trade API uses one fixed path per family (`/tapi`, `/tlapi`), and the
//! stream API passes the currency pair as its only query parameter.

use url::Url;

use crate::error::ZaifError;

/// Default REST host.
pub const DEFAULT_HOST: &str = "api.zaif.jp";

/// A composable endpoint URL.
///
/// # Example
///
/// ```rust
/// use zaif_api_client::api_url::ApiUrl;
///
/// let url = ApiUrl::new("api").version(1).with_path("ticker").with_path("btc_jpy");
/// assert_eq!(url.full_url().unwrap(), "https://api.zaif.jp/api/1/ticker/btc_jpy");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiUrl {
    scheme: String,
    host: String,
    port: Option<u16>,
    api_name: Option<String>,
    version: Option<String>,
    path: Vec<String>,
    query: Vec<(String, String)>,
}

impl ApiUrl {
    /// An `https` URL on the default host under `/api_name`.
    pub fn new(api_name: impl Into<String>) -> Self {
        let api_name = api_name.into();
        Self {
            scheme: "https".to_string(),
            host: DEFAULT_HOST.to_string(),
            port: None,
            api_name: (!api_name.is_empty()).then_some(api_name),
            version: None,
            path: Vec::new(),
            query: Vec::new(),
        }
    }

    /// Take scheme, host and port from `base` (e.g. a mock server URI).
    ///
    /// Any path on `base` is ignored.
    pub fn from_base(base: &str, api_name: impl Into<String>) -> Result<Self, ZaifError> {
        let parsed = Url::parse(base)?;
        let host = parsed
            .host_str()
            .ok_or(ZaifError::Url(url::ParseError::EmptyHost))?;

        let mut url = Self::new(api_name).scheme(parsed.scheme()).host(host);
        url.port = parsed.port();
        Ok(url)
    }

    /// Set the scheme (`https`, `wss`, ...).
    pub fn scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    /// Set the host.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Set an explicit port.
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Set the API version path component.
    pub fn version(mut self, version: impl std::fmt::Display) -> Self {
        self.version = Some(version.to_string());
        self
    }

    /// Append a path segment, builder style.
    pub fn with_path(mut self, segment: impl std::fmt::Display) -> Self {
        self.add_path(segment);
        self
    }

    /// Append a path segment.
    pub fn add_path(&mut self, segment: impl std::fmt::Display) {
        self.path.push(segment.to_string());
    }

    /// Append a query parameter, builder style.
    pub fn with_param(mut self, key: impl Into<String>, value: impl std::fmt::Display) -> Self {
        self.add_param(key, value);
        self
    }

    /// Append a query parameter.
    pub fn add_param(&mut self, key: impl Into<String>, value: impl std::fmt::Display) {
        self.query.push((key.into(), value.to_string()));
    }

    /// Render the URL. Path segments are percent-encoded, so a value such as
    /// `a/b` stays one segment; the query is form-encoded.
    pub fn full_url(&self) -> Result<String, ZaifError> {
        let mut authority = format!("{}://{}", self.scheme, self.host);
        if let Some(port) = self.port {
            authority.push_str(&format!(":{port}"));
        }
        let mut parsed = Url::parse(&authority)?;

        {
            let mut segments = parsed
                .path_segments_mut()
                .map_err(|_| ZaifError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase))?;
            segments.pop_if_empty();
            segments.extend(self.api_name.iter().chain(&self.version).chain(&self.path));
        }
        if !self.query.is_empty() {
            parsed.query_pairs_mut().extend_pairs(&self.query);
        }
        Ok(parsed.into())
    }
}
