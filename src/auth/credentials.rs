//! Credential management for GDAX API authentication.

use secrecy::{ExposeSecret, SecretString};

const DEFAULT_KEY_VAR: &str = "GDAX_API_KEY";
const DEFAULT_SECRET_VAR: &str = "GDAX_API_SECRET";
const DEFAULT_PASSPHRASE_VAR: &str = "GDAX_API_PASSPHRASE";

/// API credentials containing the key, secret and passphrase.
#[derive(Clone)]
pub struct Credentials {
    /// The API key (public identifier)
    pub api_key: String,
    /// The base64-encoded API secret (private, used for signing)
    api_secret: SecretString,
    /// The passphrase chosen when the key was created
    passphrase: SecretString,
}

impl Credentials {
    /// Create new credentials from an API key, secret and passphrase.
    pub fn new(
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
        passphrase: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: SecretString::from(api_secret.into()),
            passphrase: SecretString::from(passphrase.into()),
        }
    }

    /// Get the API secret for signing.
    ///
    /// This method exposes the secret - use carefully.
    pub fn expose_secret(&self) -> &str {
        self.api_secret.expose_secret()
    }

    /// Get the passphrase for the `CB-ACCESS-PASSPHRASE` header.
    pub fn expose_passphrase(&self) -> &str {
        self.passphrase.expose_secret()
    }

    /// Try to read credentials from the default environment variables.
    ///
    /// Reads `GDAX_API_KEY`, `GDAX_API_SECRET` and `GDAX_API_PASSPHRASE`.
    /// Returns `None` if any of them is not set.
    pub fn try_from_env() -> Option<Self> {
        Self::from_env_vars(DEFAULT_KEY_VAR, DEFAULT_SECRET_VAR, DEFAULT_PASSPHRASE_VAR)
    }

    /// Try to read credentials from custom environment variable names.
    pub fn from_env_vars(key_var: &str, secret_var: &str, passphrase_var: &str) -> Option<Self> {
        let api_key = std::env::var(key_var).ok()?;
        let api_secret = std::env::var(secret_var).ok()?;
        let passphrase = std::env::var(passphrase_var).ok()?;

        Some(Self::new(api_key, api_secret, passphrase))
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .field("passphrase", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_debug_redacted() {
        let creds = Credentials::new("my_key", "super_secret", "open_sesame");
        let debug_str = format!("{:?}", creds);
        assert!(debug_str.contains("my_key"));
        assert!(!debug_str.contains("super_secret"));
        assert!(!debug_str.contains("open_sesame"));
        assert!(debug_str.contains("[REDACTED]"));
    }

    #[test]
    fn test_credentials_expose() {
        let creds = Credentials::new("key", "secret", "phrase");
        assert_eq!(creds.api_key, "key");
        assert_eq!(creds.expose_secret(), "secret");
        assert_eq!(creds.expose_passphrase(), "phrase");
    }

    #[test]
    fn test_from_env_vars_missing() {
        let creds = Credentials::from_env_vars(
            "GDAX_TEST_UNSET_KEY_9F2A",
            "GDAX_TEST_UNSET_SECRET_9F2A",
            "GDAX_TEST_UNSET_PASSPHRASE_9F2A",
        );
        assert!(creds.is_none());
    }
}
