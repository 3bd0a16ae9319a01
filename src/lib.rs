//! # GDAX Client
//!
//! An async Rust client library for the GDAX / Coinbase Exchange REST API.
//!
//! ## Features
//!
//! - Named endpoint table covering accounts, orders, market data and payments
//! - HMAC-SHA256 request signing with the `CB-ACCESS-*` headers
//! - Production and sandbox environments
//! - Pluggable HTTP transport
//! - Financial precision with `rust_decimal`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gdax_api_client::rest::{DEFAULT_PRODUCT, Environment, ExchangeClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ExchangeClient::new(Environment::Sandbox)?;
//!     let ticker = client.ticker(DEFAULT_PRODUCT).await?;
//!     println!("Ticker: {ticker}");
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod error;
pub mod rest;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{GdaxError, RemoteError};
pub use rest::{Environment, ExchangeClient};
pub use types::common::{OrderType, Side, TimeInForce};

/// Result type alias using GdaxError
pub type Result<T> = std::result::Result<T, GdaxError>;
