//! HTTP transport for the REST client.
//!
//! A [`Transport`] performs exactly one HTTP exchange and hands back the status
//! and the raw body. Interpreting the status is left to the caller.

use std::future::Future;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;

use crate::error::GdaxError;
use crate::rest::endpoints::HttpMethod;

/// A fully built HTTP request.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// HTTP method
    pub method: HttpMethod,
    /// Absolute URL
    pub url: String,
    /// Request headers
    pub headers: HeaderMap,
    /// Raw request body, sent only for POST and PUT
    pub body: String,
}

/// Status and raw body of an HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Unparsed response body
    pub body: String,
}

/// Something that can perform a single HTTP request.
///
/// Implementations must not retry and must report network-level failures as
/// [`GdaxError::Transport`]. Non-success statuses are returned as data.
pub trait Transport: Send + Sync {
    /// Perform the request.
    fn call(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, GdaxError>> + Send;
}

/// The default [`Transport`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http_client: ClientWithMiddleware,
}

impl HttpTransport {
    /// Create a transport with default settings.
    pub fn new() -> Result<Self, GdaxError> {
        HttpTransportConfig::default().build()
    }

    /// Wrap an existing middleware client.
    pub fn from_client(http_client: ClientWithMiddleware) -> Self {
        Self { http_client }
    }
}

impl Transport for HttpTransport {
    async fn call(&self, request: HttpRequest) -> Result<HttpResponse, GdaxError> {
        let has_body = request.method.has_body();
        let mut builder = self
            .http_client
            .request(request.method.into(), &request.url)
            .headers(request.headers);
        if has_body {
            builder = builder.body(request.body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(HttpResponse { status, body })
    }
}

/// Settings used to build an [`HttpTransport`].
#[derive(Debug, Clone)]
pub struct HttpTransportConfig {
    /// Value of the `User-Agent` header
    pub user_agent: String,
    /// Total request timeout, `None` for the reqwest default
    pub timeout: Option<Duration>,
    /// Skip TLS certificate verification
    pub accept_invalid_certs: bool,
}

impl Default for HttpTransportConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("gdax-api-client/{}", env!("CARGO_PKG_VERSION")),
            timeout: None,
            accept_invalid_certs: false,
        }
    }
}

impl HttpTransportConfig {
    /// Build the transport.
    pub fn build(self) -> Result<HttpTransport, GdaxError> {
        let mut headers = HeaderMap::new();
        let header_value = HeaderValue::from_str(&self.user_agent)
            .map_err(|_| GdaxError::InvalidHeader(USER_AGENT.to_string()))?;
        headers.insert(USER_AGENT, header_value);

        let mut builder = reqwest::Client::builder()
            .default_headers(headers)
            .danger_accept_invalid_certs(self.accept_invalid_certs);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if self.accept_invalid_certs {
            tracing::warn!("TLS certificate verification is disabled");
        }

        let client = ClientBuilder::new(builder.build()?)
            .with(TracingMiddleware::default())
            .build();

        Ok(HttpTransport::from_client(client))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HttpTransportConfig::default();
        assert!(config.user_agent.starts_with("gdax-api-client/"));
        assert!(!config.accept_invalid_certs);
        assert!(config.timeout.is_none());
    }

    #[test]
    fn test_invalid_user_agent() {
        let config = HttpTransportConfig {
            user_agent: "bad\nagent".to_string(),
            ..Default::default()
        };
        let err = config.build().unwrap_err();
        assert!(matches!(err, GdaxError::InvalidHeader(_)));
    }
}
