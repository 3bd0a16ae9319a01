//! GDAX REST API client implementation.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use serde_json::{Map, Value};

use crate::auth::{Credentials, SystemTimestamp, TimestampProvider, sign_request};
use crate::error::{GdaxError, RemoteError};
use crate::rest::endpoints::{Environment, HttpMethod, ID_PARAM, resolve_endpoint};
use crate::rest::transport::{HttpRequest, HttpTransport, HttpTransportConfig, Transport};

/// `CB-ACCESS-KEY` header.
pub const CB_ACCESS_KEY: HeaderName = HeaderName::from_static("cb-access-key");
/// `CB-ACCESS-SIGN` header.
pub const CB_ACCESS_SIGN: HeaderName = HeaderName::from_static("cb-access-sign");
/// `CB-ACCESS-TIMESTAMP` header.
pub const CB_ACCESS_TIMESTAMP: HeaderName = HeaderName::from_static("cb-access-timestamp");
/// `CB-ACCESS-PASSPHRASE` header.
pub const CB_ACCESS_PASSPHRASE: HeaderName = HeaderName::from_static("cb-access-passphrase");

/// The GDAX REST API client.
///
/// Each call resolves a named endpoint, signs it with a fresh timestamp and
/// performs a single HTTP exchange. Nothing is retried.
///
/// # Example
///
/// ```rust,no_run
/// use gdax_api_client::rest::{Environment, ExchangeClient};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = ExchangeClient::new(Environment::Sandbox)?
///         .authenticate("api_key", "c2VjcmV0", "passphrase");
///
///     let accounts = client.accounts().await?;
///     println!("Accounts: {accounts}");
///
///     Ok(())
/// }
/// ```
pub struct ExchangeClient<T = HttpTransport> {
    transport: Arc<T>,
    base_url: String,
    credentials: Option<Arc<Credentials>>,
    timestamp_provider: Arc<dyn TimestampProvider>,
}

/// A request ready to hand to a [`Transport`].
///
/// Built fresh for every call and never reused.
#[derive(Debug, Clone)]
pub struct SignedRequest {
    /// Unix seconds used both in the signature and the timestamp header
    pub timestamp: u64,
    /// HTTP method
    pub method: HttpMethod,
    /// Absolute URL
    pub url: String,
    /// Request path that was signed
    pub uri: String,
    /// JSON body, empty when there are no parameters
    pub body: String,
    /// Base64 signature, `None` for an unauthenticated client
    pub signature: Option<String>,
    /// All request headers
    pub headers: HeaderMap,
}

impl ExchangeClient<HttpTransport> {
    /// Create a client for the given environment with default settings.
    ///
    /// Call [`ExchangeClient::authenticate`] before using private endpoints.
    pub fn new(environment: Environment) -> Result<Self, GdaxError> {
        Self::builder().environment(environment).build()
    }

    /// Create a new client builder.
    pub fn builder() -> ExchangeClientBuilder {
        ExchangeClientBuilder::new()
    }
}

impl<T: Transport> ExchangeClient<T> {
    /// Return a copy of this client that signs requests with the given credentials.
    pub fn authenticate(
        self,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
        passphrase: impl Into<String>,
    ) -> Self {
        self.with_credentials(Credentials::new(api_key, api_secret, passphrase))
    }

    /// Return a copy of this client using existing credentials.
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(Arc::new(credentials));
        self
    }

    /// Whether credentials have been installed.
    pub fn is_authenticated(&self) -> bool {
        self.credentials.is_some()
    }

    /// The base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve and sign a request without sending it.
    ///
    /// The body is the JSON encoding of `params` after the `id` key has been
    /// consumed, or an empty string when nothing is left. Without credentials
    /// the `CB-ACCESS-*` headers are left out.
    pub fn prepare(
        &self,
        endpoint: &str,
        params: Map<String, Value>,
    ) -> Result<SignedRequest, GdaxError> {
        let resolved = resolve_endpoint(endpoint, params)?;

        let body = if resolved.params.is_empty() {
            String::new()
        } else {
            serde_json::to_string(&resolved.params)?
        };

        let timestamp = self.timestamp_provider.timestamp();
        let url = format!("{}{}", self.base_url, resolved.uri);

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let signature = match &self.credentials {
            Some(creds) => {
                let signature = sign_request(
                    creds,
                    timestamp,
                    resolved.method.as_str(),
                    &resolved.uri,
                    &body,
                )?;
                insert_header(&mut headers, CB_ACCESS_KEY, &creds.api_key)?;
                insert_header(&mut headers, CB_ACCESS_SIGN, &signature)?;
                insert_header(&mut headers, CB_ACCESS_TIMESTAMP, &timestamp.to_string())?;
                insert_header(&mut headers, CB_ACCESS_PASSPHRASE, creds.expose_passphrase())?;
                Some(signature)
            }
            None => None,
        };

        Ok(SignedRequest {
            timestamp,
            method: resolved.method,
            url,
            uri: resolved.uri,
            body,
            signature,
            headers,
        })
    }

    /// Call a named endpoint and return the parsed JSON response.
    ///
    /// Only a 200 status counts as success. Any other status is returned as
    /// [`GdaxError::Remote`] with the body untouched.
    pub async fn request(
        &self,
        endpoint: &str,
        params: Map<String, Value>,
    ) -> Result<Value, GdaxError> {
        let signed = self.prepare(endpoint, params)?;
        let method = signed.method;
        tracing::debug!(endpoint, %method, url = %signed.url, "sending request");

        let response = self
            .transport
            .call(HttpRequest {
                method,
                url: signed.url,
                headers: signed.headers,
                body: signed.body,
            })
            .await?;
        tracing::debug!(endpoint, status = response.status, "received response");

        if response.status != 200 {
            tracing::warn!(endpoint, status = response.status, "request rejected");
            return Err(GdaxError::Remote(RemoteError::new(response.status, response.body)));
        }

        serde_json::from_str(&response.body).map_err(|source| GdaxError::Decode {
            source,
            body: response.body,
        })
    }
}

/// Parameters holding only the path `id`.
pub(crate) fn id_params(id: &str) -> Map<String, Value> {
    let mut params = Map::new();
    params.insert(ID_PARAM.to_string(), Value::String(id.to_string()));
    params
}

/// Serialize a request payload into body parameters.
pub(crate) fn to_params<P>(payload: &P) -> Result<Map<String, Value>, GdaxError>
where
    P: serde::Serialize,
{
    match serde_json::to_value(payload)? {
        Value::Object(map) => Ok(map),
        other => Err(GdaxError::InvalidRequest(format!(
            "request payload must serialize to a JSON object, got {other}"
        ))),
    }
}

fn insert_header(headers: &mut HeaderMap, name: HeaderName, value: &str) -> Result<(), GdaxError> {
    let value = HeaderValue::from_str(value)
        .map_err(|_| GdaxError::InvalidHeader(name.as_str().to_string()))?;
    headers.insert(name, value);
    Ok(())
}

impl<T> Clone for ExchangeClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            base_url: self.base_url.clone(),
            credentials: self.credentials.clone(),
            timestamp_provider: Arc::clone(&self.timestamp_provider),
        }
    }
}

impl<T> std::fmt::Debug for ExchangeClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExchangeClient")
            .field("base_url", &self.base_url)
            .field("has_credentials", &self.credentials.is_some())
            .finish()
    }
}

/// Builder for [`ExchangeClient`].
pub struct ExchangeClientBuilder {
    base_url: Option<String>,
    environment: Environment,
    credentials: Option<Credentials>,
    timestamp_provider: Option<Arc<dyn TimestampProvider>>,
    transport_config: HttpTransportConfig,
}

impl ExchangeClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            base_url: None,
            environment: Environment::default(),
            credentials: None,
            timestamp_provider: None,
            transport_config: HttpTransportConfig::default(),
        }
    }

    /// Select production or sandbox.
    pub fn environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Set the base URL (useful for testing with a mock server).
    ///
    /// Takes precedence over [`ExchangeClientBuilder::environment`].
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the credentials for authenticated requests.
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set a custom timestamp provider.
    pub fn timestamp_provider(mut self, provider: Arc<dyn TimestampProvider>) -> Self {
        self.timestamp_provider = Some(provider);
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.transport_config.user_agent = user_agent.into();
        self
    }

    /// Set a total timeout for each request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.transport_config.timeout = Some(timeout);
        self
    }

    /// Disable TLS certificate verification.
    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.transport_config.accept_invalid_certs = accept;
        self
    }

    /// Build the client with the default HTTP transport.
    pub fn build(self) -> Result<ExchangeClient<HttpTransport>, GdaxError> {
        let transport = self.transport_config.clone().build()?;
        self.build_with_transport(transport)
    }

    /// Build the client on top of a custom transport.
    ///
    /// User agent, timeout and TLS settings are ignored; the transport owns them.
    pub fn build_with_transport<T: Transport>(
        self,
        transport: T,
    ) -> Result<ExchangeClient<T>, GdaxError> {
        let base_url = self
            .base_url
            .unwrap_or_else(|| self.environment.base_url().to_string());
        url::Url::parse(&base_url)?;

        let timestamp_provider = self
            .timestamp_provider
            .unwrap_or_else(|| Arc::new(SystemTimestamp));

        Ok(ExchangeClient {
            transport: Arc::new(transport),
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials: self.credentials.map(Arc::new),
            timestamp_provider,
        })
    }
}

impl Default for ExchangeClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::FixedTimestamp;
    use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
    use serde_json::json;
    use std::sync::Mutex;

    /// Records requests and answers with a canned response.
    struct RecordingTransport {
        response: Result<crate::rest::transport::HttpResponse, ()>,
        seen: Mutex<Vec<HttpRequest>>,
    }

    impl RecordingTransport {
        fn answering(status: u16, body: &str) -> Self {
            Self {
                response: Ok(crate::rest::transport::HttpResponse {
                    status,
                    body: body.to_string(),
                }),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl Transport for RecordingTransport {
        async fn call(
            &self,
            request: HttpRequest,
        ) -> Result<crate::rest::transport::HttpResponse, GdaxError> {
            self.seen.lock().unwrap().push(request);
            self.response
                .clone()
                .map_err(|_| GdaxError::Auth("unused".to_string()))
        }
    }

    fn signed_client() -> ExchangeClient<HttpTransport> {
        ExchangeClient::builder()
            .base_url("https://example.test/")
            .timestamp_provider(Arc::new(FixedTimestamp(1700000000)))
            .build()
            .unwrap()
            .authenticate("test_key", BASE64.encode("test_secret"), "test_passphrase")
    }

    fn params(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn test_prepare_empty_params() {
        let signed = signed_client().prepare("accounts", Map::new()).unwrap();
        assert_eq!(signed.method, HttpMethod::Get);
        assert_eq!(signed.url, "https://example.test/accounts");
        assert_eq!(signed.body, "");
        assert_eq!(
            signed.signature.as_deref(),
            Some("0nP+YCyLn5TPftPJcqDEaMFKa2Boqqys4BE7mFntJzs=")
        );
    }

    #[test]
    fn test_prepare_timestamp_matches_header() {
        let signed = signed_client().prepare("accounts", Map::new()).unwrap();
        let header = signed.headers.get(CB_ACCESS_TIMESTAMP).unwrap().to_str().unwrap();
        assert_eq!(header, "1700000000");
        assert_eq!(header, signed.timestamp.to_string());

        let creds = Credentials::new("test_key", BASE64.encode("test_secret"), "test_passphrase");
        let expected = sign_request(&creds, signed.timestamp, "GET", "/accounts", "").unwrap();
        assert_eq!(signed.headers.get(CB_ACCESS_SIGN).unwrap(), expected.as_str());
    }

    #[test]
    fn test_prepare_headers() {
        let signed = signed_client().prepare("order", params(json!({"id": "ABC"}))).unwrap();
        assert_eq!(signed.uri, "/orders/ABC");
        assert_eq!(signed.headers.get(CB_ACCESS_KEY).unwrap(), "test_key");
        assert_eq!(signed.headers.get(CB_ACCESS_PASSPHRASE).unwrap(), "test_passphrase");
        assert_eq!(signed.headers.get(CONTENT_TYPE).unwrap(), "application/json");
    }

    #[test]
    fn test_prepare_body_excludes_id() {
        let signed = signed_client()
            .prepare(
                "payment",
                params(json!({"amount": "1", "currency": "USD", "payment_method_id": "pm"})),
            )
            .unwrap();
        assert_eq!(signed.body, r#"{"amount":"1","currency":"USD","payment_method_id":"pm"}"#);
    }

    #[test]
    fn test_prepare_unauthenticated_omits_auth_headers() {
        let client = ExchangeClient::builder()
            .base_url("https://example.test")
            .build()
            .unwrap();
        assert!(!client.is_authenticated());
        let signed = client.prepare("time", Map::new()).unwrap();
        assert!(signed.signature.is_none());
        assert!(signed.headers.get(CB_ACCESS_SIGN).is_none());
        assert!(signed.headers.get(CB_ACCESS_KEY).is_none());
    }

    #[test]
    fn test_prepare_unknown_endpoint() {
        let err = signed_client().prepare("nope", Map::new()).unwrap_err();
        assert!(matches!(err, GdaxError::UnknownEndpoint(_)));
    }

    #[test]
    fn test_builder_rejects_bad_base_url() {
        let err = ExchangeClient::builder().base_url("not a url").build().unwrap_err();
        assert!(matches!(err, GdaxError::Url(_)));
    }

    #[test]
    fn test_new_uses_environment() {
        let client = ExchangeClient::new(Environment::Sandbox).unwrap();
        assert_eq!(client.base_url(), crate::rest::endpoints::GDAX_SANDBOX_URL);
    }

    #[test]
    fn test_debug_hides_credentials() {
        let debug = format!("{:?}", signed_client());
        assert!(debug.contains("has_credentials: true"));
        assert!(!debug.contains("test_passphrase"));
    }

    #[tokio::test]
    async fn test_request_with_custom_transport() {
        let transport = RecordingTransport::answering(200, r#"{"iso":"2024-01-01T00:00:00Z"}"#);
        let client = ExchangeClient::builder()
            .base_url("https://example.test")
            .build_with_transport(transport)
            .unwrap();

        let value = client.request("time", Map::new()).await.unwrap();
        assert_eq!(value["iso"], "2024-01-01T00:00:00Z");

        let seen = client.transport.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].url, "https://example.test/time");
        assert_eq!(seen[0].body, "");
    }

    #[tokio::test]
    async fn test_request_non_200_is_remote_error() {
        let transport = RecordingTransport::answering(400, r#"{"message":"rejected"}"#);
        let client = ExchangeClient::builder()
            .base_url("https://example.test")
            .build_with_transport(transport)
            .unwrap();

        let err = client.request("orders", Map::new()).await.unwrap_err();
        let remote = err.as_remote().unwrap();
        assert_eq!(remote.status, 400);
        assert_eq!(remote.body, r#"{"message":"rejected"}"#);
    }
}
