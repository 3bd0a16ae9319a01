//! Market data REST API endpoints.
//!
//! The exchange serves these without authentication, but an authenticated
//! client signs them like every other request.

use serde_json::{Map, Value};

use crate::error::GdaxError;
use crate::rest::client::{ExchangeClient, id_params};
use crate::rest::transport::Transport;

impl<T: Transport> ExchangeClient<T> {
    /// List available currency pairs.
    pub async fn products(&self) -> Result<Value, GdaxError> {
        self.request("products", Map::new()).await
    }

    /// Get the order book of a product.
    ///
    /// # Arguments
    ///
    /// * `product` - Product identifier, e.g. [`DEFAULT_PRODUCT`](crate::rest::DEFAULT_PRODUCT).
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use gdax_api_client::rest::{DEFAULT_PRODUCT, Environment, ExchangeClient};
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = ExchangeClient::new(Environment::Production)?;
    ///     let book = client.book(DEFAULT_PRODUCT).await?;
    ///     println!("Best bid: {}", book["bids"][0]);
    ///     Ok(())
    /// }
    /// ```
    pub async fn book(&self, product: &str) -> Result<Value, GdaxError> {
        self.request("book", id_params(product)).await
    }

    /// Get the latest ticker of a product.
    pub async fn ticker(&self, product: &str) -> Result<Value, GdaxError> {
        self.request("ticker", id_params(product)).await
    }

    /// Get the latest trades of a product.
    pub async fn trades(&self, product: &str) -> Result<Value, GdaxError> {
        self.request("trades", id_params(product)).await
    }

    /// Get historic rates (candles) of a product.
    pub async fn rates(&self, product: &str) -> Result<Value, GdaxError> {
        self.request("rates", id_params(product)).await
    }

    /// Get 24 hour statistics of a product.
    pub async fn stats(&self, product: &str) -> Result<Value, GdaxError> {
        self.request("stats", id_params(product)).await
    }

    /// List known currencies.
    pub async fn currencies(&self) -> Result<Value, GdaxError> {
        self.request("currencies", Map::new()).await
    }

    /// Get the exchange server time.
    pub async fn time(&self) -> Result<Value, GdaxError> {
        self.request("time", Map::new()).await
    }
}
