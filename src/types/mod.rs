//! Shared types for the GDAX API.

pub mod common;
pub mod orders;

pub use common::{CancelAfter, OrderType, Side, TimeInForce};
pub use orders::{CoinbaseAccountDeposit, PaymentMethodTransfer, PlaceOrder};
