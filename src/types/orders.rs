//! Request payloads for order placement and fund transfers.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::types::common::{CancelAfter, OrderType, Side, TimeInForce};

/// Order placement request for `POST /orders`.
///
/// Every field is always sent, unset optionals as `null`. Which combinations
/// are valid (e.g. `size` or `funds` for market orders) is left to the server.
///
/// ```rust
/// use gdax_api_client::types::{OrderType, PlaceOrder, Side};
/// use rust_decimal::Decimal;
///
/// let order = PlaceOrder::new(Side::Buy, OrderType::Limit, "BTC-USD")
///     .price(Decimal::new(100, 0))
///     .size(Decimal::ONE);
/// assert!(order.post_only);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaceOrder {
    /// Buy or sell
    pub side: Side,
    /// Order type
    #[serde(rename = "type")]
    pub order_type: OrderType,
    /// Product identifier, e.g. `BTC-USD`
    pub product_id: String,
    /// Limit price
    pub price: Option<Decimal>,
    /// Amount of base currency
    pub size: Option<Decimal>,
    /// Amount of quote currency to spend (market orders)
    pub funds: Option<Decimal>,
    /// Time in force
    pub time_in_force: TimeInForce,
    /// Expiry window for GTT orders
    pub cancel_after: CancelAfter,
    /// Only add liquidity
    pub post_only: bool,
}

impl PlaceOrder {
    /// Create an order with the default time in force (`GTC`),
    /// `cancel_after` (`min`) and `post_only` (`true`).
    pub fn new(side: Side, order_type: OrderType, product_id: impl Into<String>) -> Self {
        Self {
            side,
            order_type,
            product_id: product_id.into(),
            price: None,
            size: None,
            funds: None,
            time_in_force: TimeInForce::default(),
            cancel_after: CancelAfter::default(),
            post_only: true,
        }
    }

    /// Set the limit price.
    pub fn price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    /// Set the size in base currency.
    pub fn size(mut self, size: Decimal) -> Self {
        self.size = Some(size);
        self
    }

    /// Set the funds in quote currency.
    pub fn funds(mut self, funds: Decimal) -> Self {
        self.funds = Some(funds);
        self
    }

    /// Set the time in force.
    pub fn time_in_force(mut self, time_in_force: TimeInForce) -> Self {
        self.time_in_force = time_in_force;
        self
    }

    /// Set the GTT expiry window.
    pub fn cancel_after(mut self, cancel_after: CancelAfter) -> Self {
        self.cancel_after = cancel_after;
        self
    }

    /// Set the post-only flag.
    pub fn post_only(mut self, post_only: bool) -> Self {
        self.post_only = post_only;
        self
    }
}

/// Payment method withdrawal or deposit request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentMethodTransfer {
    /// Amount to move
    pub amount: Decimal,
    /// Currency code
    pub currency: String,
    /// Payment method identifier
    pub payment_method_id: String,
}

/// Deposit from a linked Coinbase account.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoinbaseAccountDeposit {
    /// Amount to move
    pub amount: Decimal,
    /// Currency code
    pub currency: String,
    /// Coinbase account identifier
    pub coinbase_account_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_place_order_keeps_null_fields() {
        let order = PlaceOrder::new(Side::Buy, OrderType::Limit, "BTC-USD")
            .price(Decimal::new(100, 0))
            .size(Decimal::ONE);
        let value = serde_json::to_value(&order).unwrap();

        assert_eq!(
            value,
            json!({
                "side": "buy",
                "type": "limit",
                "product_id": "BTC-USD",
                "price": "100",
                "size": "1",
                "funds": null,
                "time_in_force": "GTC",
                "cancel_after": "min",
                "post_only": true
            })
        );
    }

    #[test]
    fn test_place_order_field_order() {
        let order = PlaceOrder::new(Side::Sell, OrderType::Market, "ETH-USD")
            .funds(Decimal::new(2550, 2))
            .post_only(false);
        let body = serde_json::to_string(&order).unwrap();

        assert_eq!(
            body,
            r#"{"side":"sell","type":"market","product_id":"ETH-USD","price":null,"size":null,"funds":"25.50","time_in_force":"GTC","cancel_after":"min","post_only":false}"#
        );
    }

    #[test]
    fn test_payment_method_transfer_serialization() {
        let transfer = PaymentMethodTransfer {
            amount: Decimal::new(10, 0),
            currency: "USD".to_string(),
            payment_method_id: "pm-1".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&transfer).unwrap(),
            r#"{"amount":"10","currency":"USD","payment_method_id":"pm-1"}"#
        );
    }
}
