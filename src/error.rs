//! Error types for the GDAX client library.

use thiserror::Error;

/// The main error type for all GDAX client operations.
#[derive(Error, Debug)]
pub enum GdaxError {
    /// The requested endpoint name is not part of the endpoint table
    #[error("Unknown endpoint: {0}")]
    UnknownEndpoint(String),

    /// The endpoint's URI template needs an `id` but none was supplied
    #[error("Endpoint {0} requires an id path parameter")]
    MissingPathParameter(&'static str),

    /// The `id` path parameter cannot be used as a path segment
    #[error("Endpoint {endpoint} cannot take {id:?} as its id")]
    InvalidPathParameter {
        /// Endpoint name
        endpoint: &'static str,
        /// The rejected id
        id: String,
    },

    /// Network-level failure (DNS, connection, TLS, timeout)
    #[error("HTTP transport failed: {0}")]
    Transport(#[from] reqwest_middleware::Error),

    /// The exchange answered with a non-200 status
    #[error("GDAX API error: {0}")]
    Remote(RemoteError),

    /// A 200 response whose body is not valid JSON
    #[error("Failed to decode response: {source}. Body: {body}")]
    Decode {
        /// The underlying parse error
        source: serde_json::Error,
        /// The raw response body
        body: String,
    },

    /// A request payload could not be turned into body parameters
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// JSON serialization error for request bodies
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    /// Authentication error
    #[error("Authentication error: {0}")]
    Auth(String),

    /// A header value could not be encoded
    #[error("Invalid header value for {0}")]
    InvalidHeader(String),
}

impl From<reqwest::Error> for GdaxError {
    fn from(err: reqwest::Error) -> Self {
        GdaxError::Transport(reqwest_middleware::Error::Reqwest(err))
    }
}

impl GdaxError {
    /// Returns the remote error if this is a non-200 response.
    pub fn as_remote(&self) -> Option<&RemoteError> {
        match self {
            GdaxError::Remote(remote) => Some(remote),
            _ => None,
        }
    }
}

/// A non-200 response from the exchange.
///
/// The body is kept exactly as received so callers can inspect whatever the
/// server sent back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteError {
    /// HTTP status code
    pub status: u16,
    /// Raw response body
    pub body: String,
}

impl std::fmt::Display for RemoteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.message() {
            Some(message) => write!(f, "HTTP {}: {}", self.status, message),
            None => write!(f, "HTTP {}: {}", self.status, self.body),
        }
    }
}

impl RemoteError {
    /// Create a new remote error from a status and body.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// The `message` field of a JSON error body, e.g. `{"message":"Invalid API Key"}`.
    pub fn message(&self) -> Option<String> {
        #[derive(serde::Deserialize)]
        struct ErrorBody {
            message: String,
        }

        serde_json::from_str::<ErrorBody>(&self.body)
            .ok()
            .map(|b| b.message)
    }

    /// Check if the request was rejected as unauthenticated.
    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }

    /// Check if this is a rate limit error.
    pub fn is_rate_limit(&self) -> bool {
        self.status == 429
    }

    /// Check if the requested resource does not exist.
    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }

    /// Check if the server rejected the request signature.
    pub fn is_invalid_signature(&self) -> bool {
        self.message()
            .is_some_and(|m| m.to_ascii_lowercase().contains("invalid signature"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_error_message() {
        let error = RemoteError::new(400, r#"{"message":"rejected"}"#);
        assert_eq!(error.message().as_deref(), Some("rejected"));
        assert_eq!(error.to_string(), "HTTP 400: rejected");
    }

    #[test]
    fn test_remote_error_non_json_body() {
        let error = RemoteError::new(502, "Bad Gateway");
        assert!(error.message().is_none());
        assert_eq!(error.to_string(), "HTTP 502: Bad Gateway");
    }

    #[test]
    fn test_remote_error_helpers() {
        assert!(RemoteError::new(401, "").is_unauthorized());
        assert!(RemoteError::new(429, "").is_rate_limit());
        assert!(RemoteError::new(404, "").is_not_found());
        assert!(RemoteError::new(401, r#"{"message":"invalid signature"}"#).is_invalid_signature());
        assert!(!RemoteError::new(400, r#"{"message":"rejected"}"#).is_invalid_signature());
    }

    #[test]
    fn test_as_remote() {
        let error = GdaxError::Remote(RemoteError::new(400, "{}"));
        assert_eq!(error.as_remote().map(|r| r.status), Some(400));
        assert!(GdaxError::UnknownEndpoint("nope".into()).as_remote().is_none());
    }
}
