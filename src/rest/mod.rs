//! GDAX REST API client.
//!
//! Every operation is a named entry in the endpoint table. [`ExchangeClient::request`]
//! resolves the name, signs the call and performs one HTTP exchange; the
//! convenience methods (`accounts`, `book`, `place`, ...) only build parameters.
//!
//! ```rust,ignore
//! use gdax_api_client::rest::{ExchangeClient, Environment};
//! use serde_json::Map;
//!
//! async fn server_time() -> Result<(), gdax_api_client::GdaxError> {
//!     let client = ExchangeClient::new(Environment::Sandbox)?;
//!     let time = client.request("time", Map::new()).await?;
//!     println!("Server time: {}", time["iso"]);
//!     Ok(())
//! }
//! ```

mod client;
mod endpoints;
mod private;
mod public;
mod transport;

pub use client::{
    CB_ACCESS_KEY, CB_ACCESS_PASSPHRASE, CB_ACCESS_SIGN, CB_ACCESS_TIMESTAMP, ExchangeClient,
    ExchangeClientBuilder, SignedRequest,
};
pub use endpoints::*;
pub use private::{DEFAULT_COINBASE_CURRENCY, DEFAULT_FIAT_CURRENCY};
pub use transport::{HttpRequest, HttpResponse, HttpTransport, HttpTransportConfig, Transport};
