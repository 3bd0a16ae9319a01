//! HMAC-SHA256 signature generation for GDAX API authentication.
//!
//! Every authenticated request carries a signature computed as:
//! ```text
//! HMAC-SHA256(timestamp + METHOD + request_path + body, base64_decode(api_secret))
//! ```
//!
//! The signature is then base64-encoded and sent in the `CB-ACCESS-SIGN` header.

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::auth::Credentials;
use crate::error::GdaxError;

type HmacSha256 = Hmac<Sha256>;

/// Sign a request for the GDAX API.
///
/// # Arguments
///
/// * `credentials` - API credentials containing the secret
/// * `timestamp` - Unix seconds, the same value sent in `CB-ACCESS-TIMESTAMP`
/// * `method` - Upper-case HTTP method (e.g., "GET")
/// * `request_path` - The path part of the URL (e.g., "/accounts")
/// * `body` - The JSON body, or an empty string when there is none
///
/// # Returns
///
/// Base64-encoded HMAC-SHA256 signature.
///
/// # Example
///
/// ```rust
/// use gdax_api_client::auth::{Credentials, sign_request};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let credentials = Credentials::new("api_key", "YXBpX3NlY3JldA==", "passphrase");
/// let signature = sign_request(&credentials, 1700000000, "GET", "/accounts", "")?;
/// assert_eq!(signature.len(), 44);
/// # Ok(())
/// # }
/// ```
pub fn sign_request(
    credentials: &Credentials,
    timestamp: u64,
    method: &str,
    request_path: &str,
    body: &str,
) -> Result<String, GdaxError> {
    let secret_decoded = BASE64
        .decode(credentials.expose_secret())
        .map_err(|_| GdaxError::Auth("API secret must be valid base64.".to_string()))?;

    let mut hmac = HmacSha256::new_from_slice(&secret_decoded)
        .map_err(|e| GdaxError::Auth(format!("Invalid HMAC key: {e}")))?;
    hmac.update(timestamp.to_string().as_bytes());
    hmac.update(method.as_bytes());
    hmac.update(request_path.as_bytes());
    hmac.update(body.as_bytes());

    Ok(BASE64.encode(hmac.finalize().into_bytes()))
}
