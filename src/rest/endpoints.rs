//! GDAX REST API endpoint table.

use serde_json::{Map, Value};
use url::Url;

use crate::error::GdaxError;

/// Base URL for the production REST API.
pub const GDAX_BASE_URL: &str = "https://api.exchange.coinbase.com";

/// Base URL for the sandbox REST API.
pub const GDAX_SANDBOX_URL: &str = "https://api-public.sandbox.exchange.coinbase.com";

/// Product used by the market data methods when callers have no preference.
pub const DEFAULT_PRODUCT: &str = "BTC-USD";

/// Parameter key that fills a URI template's placeholder.
pub const ID_PARAM: &str = "id";

const PLACEHOLDER: &str = "{id}";

/// Which exchange environment to talk to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Environment {
    /// Live trading
    #[default]
    Production,
    /// Test environment with the same API shape
    Sandbox,
}

impl Environment {
    /// Base URL of this environment.
    pub fn base_url(&self) -> &'static str {
        match self {
            Environment::Production => GDAX_BASE_URL,
            Environment::Sandbox => GDAX_SANDBOX_URL,
        }
    }
}

/// HTTP method of an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    /// Upper-case method name as used in the signed message.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Whether the request body is sent on the wire.
    pub fn has_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put)
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// A request path with at most one `{id}` placeholder.
///
/// Templates are checked during const evaluation: a second placeholder or a
/// stray brace is a compile error for a `const`/`static` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UriTemplate {
    template: &'static str,
    placeholder_at: Option<usize>,
}

impl UriTemplate {
    /// Parse a template at compile time.
    pub const fn new(template: &'static str) -> Self {
        let bytes = template.as_bytes();
        let marker = PLACEHOLDER.as_bytes();
        let mut placeholder_at = None;
        let mut i = 0;

        while i < bytes.len() {
            match bytes[i] {
                b'{' => {
                    if i + marker.len() > bytes.len() {
                        panic!("unterminated placeholder in URI template");
                    }
                    let mut j = 0;
                    while j < marker.len() {
                        if bytes[i + j] != marker[j] {
                            panic!("URI template placeholder must be the id marker");
                        }
                        j += 1;
                    }
                    if placeholder_at.is_some() {
                        panic!("URI template may contain at most one placeholder");
                    }
                    placeholder_at = Some(i);
                    i += marker.len();
                }
                b'}' => panic!("unbalanced brace in URI template"),
                _ => i += 1,
            }
        }

        Self {
            template,
            placeholder_at,
        }
    }

    /// The raw template text.
    pub fn as_str(&self) -> &'static str {
        self.template
    }

    /// Whether the template takes a path parameter.
    pub fn has_placeholder(&self) -> bool {
        self.placeholder_at.is_some()
    }

    /// Fill the placeholder with `id`, inserted as given.
    ///
    /// Returns `None` when the template needs an id and none was given. An id
    /// passed to a template without a placeholder is ignored.
    pub fn render(&self, id: Option<&str>) -> Option<String> {
        match (self.placeholder_at, id) {
            (None, _) => Some(self.template.to_string()),
            (Some(at), Some(id)) => {
                let mut uri = String::with_capacity(self.template.len() + id.len());
                uri.push_str(&self.template[..at]);
                uri.push_str(id);
                uri.push_str(&self.template[at + PLACEHOLDER.len()..]);
                Some(uri)
            }
            (Some(_), None) => None,
        }
    }
}

/// A named remote operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    /// Logical name, e.g. `accounts`
    pub name: &'static str,
    /// HTTP method
    pub method: HttpMethod,
    /// Request path template
    pub uri: UriTemplate,
}

const fn endpoint(name: &'static str, method: HttpMethod, uri: &'static str) -> Endpoint {
    Endpoint {
        name,
        method,
        uri: UriTemplate::new(uri),
    }
}

/// Every endpoint the client knows about.
pub static ENDPOINTS: &[Endpoint] = &[
    // Accounts
    endpoint("accounts", HttpMethod::Get, "/accounts"),
    endpoint("account", HttpMethod::Get, "/accounts/{id}"),
    endpoint("ledger", HttpMethod::Get, "/accounts/{id}/ledger"),
    endpoint("holds", HttpMethod::Get, "/accounts/{id}/holds"),
    endpoint("funding", HttpMethod::Get, "/funding"),
    endpoint("coinbase_accounts", HttpMethod::Get, "/coinbase-accounts"),
    endpoint("coinbase_deposit", HttpMethod::Post, "/deposits/coinbase-account"),
    // Orders
    endpoint("place", HttpMethod::Post, "/orders"),
    endpoint("cancel", HttpMethod::Delete, "/orders/{id}"),
    endpoint("cancel_all", HttpMethod::Delete, "/orders"),
    endpoint("orders", HttpMethod::Get, "/orders"),
    endpoint("order", HttpMethod::Get, "/orders/{id}"),
    endpoint("fills", HttpMethod::Get, "/fills"),
    // Market data
    endpoint("products", HttpMethod::Get, "/products"),
    endpoint("book", HttpMethod::Get, "/products/{id}/book"),
    endpoint("ticker", HttpMethod::Get, "/products/{id}/ticker"),
    endpoint("trades", HttpMethod::Get, "/products/{id}/trades"),
    endpoint("stats", HttpMethod::Get, "/products/{id}/stats"),
    endpoint("rates", HttpMethod::Get, "/products/{id}/candles"),
    endpoint("currencies", HttpMethod::Get, "/currencies"),
    endpoint("time", HttpMethod::Get, "/time"),
    // Payments
    endpoint("payments", HttpMethod::Get, "/payment-methods"),
    endpoint("payment", HttpMethod::Post, "/withdrawals/payment-method"),
    endpoint("deposit", HttpMethod::Post, "/deposits/payment-method"),
];

/// Find an endpoint by name.
pub fn lookup(name: &str) -> Result<&'static Endpoint, GdaxError> {
    ENDPOINTS
        .iter()
        .find(|e| e.name == name)
        .ok_or_else(|| GdaxError::UnknownEndpoint(name.to_string()))
}

/// An endpoint with its path filled in and the remaining body parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedEndpoint {
    /// HTTP method
    pub method: HttpMethod,
    /// Concrete request path
    pub uri: String,
    /// Parameters left for the JSON body
    pub params: Map<String, Value>,
}

/// Resolve `name` and `params` into a concrete method, path and body.
///
/// The `id` parameter is always removed from `params`. String ids are used
/// as-is and other values by their JSON text. `null` and `""` count as no id.
/// The id is percent-encoded as a single path segment, so `/`, `?` or `#`
/// inside it never change which endpoint is reached.
pub fn resolve_endpoint(
    name: &str,
    mut params: Map<String, Value>,
) -> Result<ResolvedEndpoint, GdaxError> {
    let endpoint = lookup(name)?;

    let id = match params.shift_remove(ID_PARAM) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.is_empty() => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    };
    let id = match id {
        Some(id) if endpoint.uri.has_placeholder() => {
            Some(encode_path_segment(endpoint.name, &id)?)
        }
        other => other,
    };

    let uri = endpoint
        .uri
        .render(id.as_deref())
        .ok_or(GdaxError::MissingPathParameter(endpoint.name))?;

    Ok(ResolvedEndpoint {
        method: endpoint.method,
        uri,
        params,
    })
}

fn encode_path_segment(endpoint: &'static str, id: &str) -> Result<String, GdaxError> {
    let invalid = || GdaxError::InvalidPathParameter {
        endpoint,
        id: id.to_string(),
    };
    // Dot segments would be dropped or collapsed by URL normalization.
    if id == "." || id == ".." {
        return Err(invalid());
    }

    let mut scratch = Url::parse("http://localhost/")?;
    scratch
        .path_segments_mut()
        .map_err(|_| invalid())?
        .clear()
        .push(id);
    Ok(scratch.path().trim_start_matches('/').to_string())
}
