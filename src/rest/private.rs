//! Private REST API endpoints (authentication required).
//!
//! These methods only shape their arguments into request parameters. Argument
//! combinations are validated by the exchange, whose error responses come back
//! unchanged as [`GdaxError::Remote`].

use rust_decimal::Decimal;
use serde_json::{Map, Value};

use crate::error::GdaxError;
use crate::rest::client::{ExchangeClient, id_params, to_params};
use crate::rest::transport::Transport;
use crate::types::{CoinbaseAccountDeposit, PaymentMethodTransfer, PlaceOrder};

/// Default currency for payment method withdrawals and deposits.
pub const DEFAULT_FIAT_CURRENCY: &str = "USD";

/// Default currency for deposits from a Coinbase account.
pub const DEFAULT_COINBASE_CURRENCY: &str = "BTC";

impl<T: Transport> ExchangeClient<T> {
    // ========== Accounts ==========

    /// List trading accounts.
    pub async fn accounts(&self) -> Result<Value, GdaxError> {
        self.request("accounts", Map::new()).await
    }

    /// Get a single trading account.
    pub async fn account(&self, account_id: &str) -> Result<Value, GdaxError> {
        self.request("account", id_params(account_id)).await
    }

    /// Get the ledger (account activity) of an account.
    pub async fn ledger(&self, account_id: &str) -> Result<Value, GdaxError> {
        self.request("ledger", id_params(account_id)).await
    }

    /// Get the holds placed on an account.
    pub async fn holds(&self, account_id: &str) -> Result<Value, GdaxError> {
        self.request("holds", id_params(account_id)).await
    }

    /// List margin funding records.
    pub async fn funding(&self) -> Result<Value, GdaxError> {
        self.request("funding", Map::new()).await
    }

    /// List linked Coinbase accounts.
    pub async fn coinbase_accounts(&self) -> Result<Value, GdaxError> {
        self.request("coinbase_accounts", Map::new()).await
    }

    /// Deposit funds from a linked Coinbase account.
    ///
    /// Use [`DEFAULT_COINBASE_CURRENCY`] when moving bitcoin.
    pub async fn coinbase_deposit(
        &self,
        coinbase_account_id: &str,
        amount: Decimal,
        currency: &str,
    ) -> Result<Value, GdaxError> {
        let deposit = CoinbaseAccountDeposit {
            amount,
            currency: currency.to_string(),
            coinbase_account_id: coinbase_account_id.to_string(),
        };
        self.request("coinbase_deposit", to_params(&deposit)?).await
    }

    // ========== Orders ==========

    /// Place a new order.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use gdax_api_client::rest::{Environment, ExchangeClient};
    /// use gdax_api_client::types::{OrderType, PlaceOrder, Side};
    /// use rust_decimal::Decimal;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = ExchangeClient::new(Environment::Sandbox)?
    ///         .authenticate("api_key", "c2VjcmV0", "passphrase");
    ///
    ///     let order = PlaceOrder::new(Side::Buy, OrderType::Limit, "BTC-USD")
    ///         .price(Decimal::new(100, 0))
    ///         .size(Decimal::ONE);
    ///     let placed = client.place(&order).await?;
    ///     println!("Order id: {}", placed["id"]);
    ///     Ok(())
    /// }
    /// ```
    pub async fn place(&self, order: &PlaceOrder) -> Result<Value, GdaxError> {
        self.request("place", to_params(order)?).await
    }

    /// Cancel an open order.
    pub async fn cancel(&self, order_id: &str) -> Result<Value, GdaxError> {
        self.request("cancel", id_params(order_id)).await
    }

    /// Cancel every open order.
    pub async fn cancel_all(&self) -> Result<Value, GdaxError> {
        self.request("cancel_all", Map::new()).await
    }

    /// List open orders.
    pub async fn orders(&self) -> Result<Value, GdaxError> {
        self.request("orders", Map::new()).await
    }

    /// Get a single order.
    pub async fn order(&self, order_id: &str) -> Result<Value, GdaxError> {
        self.request("order", id_params(order_id)).await
    }

    /// List recent fills.
    pub async fn fills(&self) -> Result<Value, GdaxError> {
        self.request("fills", Map::new()).await
    }

    // ========== Payments ==========

    /// List payment methods linked to the profile.
    pub async fn payments(&self) -> Result<Value, GdaxError> {
        self.request("payments", Map::new()).await
    }

    /// Withdraw funds to a payment method.
    ///
    /// Use [`DEFAULT_FIAT_CURRENCY`] for US dollars.
    pub async fn payment(
        &self,
        payment_method_id: &str,
        amount: Decimal,
        currency: &str,
    ) -> Result<Value, GdaxError> {
        let transfer = payment_method_transfer(payment_method_id, amount, currency);
        self.request("payment", to_params(&transfer)?).await
    }

    /// Deposit funds from a payment method.
    pub async fn deposit(
        &self,
        payment_method_id: &str,
        amount: Decimal,
        currency: &str,
    ) -> Result<Value, GdaxError> {
        let transfer = payment_method_transfer(payment_method_id, amount, currency);
        self.request("deposit", to_params(&transfer)?).await
    }
}

fn payment_method_transfer(
    payment_method_id: &str,
    amount: Decimal,
    currency: &str,
) -> PaymentMethodTransfer {
    PaymentMethodTransfer {
        amount,
        currency: currency.to_string(),
        payment_method_id: payment_method_id.to_string(),
    }
}
