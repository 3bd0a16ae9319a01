//! Common domain types for the GDAX API.

use serde::{Deserialize, Serialize};

/// Buy or sell side of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Buy order
    Buy,
    /// Sell order
    Sell,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Buy => write!(f, "buy"),
            Side::Sell => write!(f, "sell"),
        }
    }
}

/// Order type for trading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    /// Limit order - execute at specified price or better
    Limit,
    /// Market order - execute immediately at best available price
    Market,
    /// Stop order - becomes active once the stop price is reached
    Stop,
}

impl std::fmt::Display for OrderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            OrderType::Limit => "limit",
            OrderType::Market => "market",
            OrderType::Stop => "stop",
        };
        write!(f, "{}", s)
    }
}

/// Time in force for orders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TimeInForce {
    /// Good till canceled (default)
    #[default]
    GTC,
    /// Good till time, see [`CancelAfter`]
    GTT,
    /// Immediate or cancel - fill what's possible immediately, cancel rest
    IOC,
    /// Fill or kill - fill the whole order immediately or cancel it
    FOK,
}

/// Expiry window for `GTT` orders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CancelAfter {
    /// One minute (default)
    #[default]
    Min,
    /// One hour
    Hour,
    /// One day
    Day,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_serialization() {
        assert_eq!(serde_json::to_string(&Side::Buy).unwrap(), "\"buy\"");
        assert_eq!(serde_json::to_string(&Side::Sell).unwrap(), "\"sell\"");
        assert_eq!(Side::Sell.to_string(), "sell");
    }

    #[test]
    fn test_order_type_serialization() {
        assert_eq!(serde_json::to_string(&OrderType::Limit).unwrap(), "\"limit\"");
        let parsed: OrderType = serde_json::from_str("\"stop\"").unwrap();
        assert_eq!(parsed, OrderType::Stop);
    }

    #[test]
    fn test_defaults() {
        assert_eq!(TimeInForce::default(), TimeInForce::GTC);
        assert_eq!(CancelAfter::default(), CancelAfter::Min);
        assert_eq!(serde_json::to_string(&TimeInForce::IOC).unwrap(), "\"IOC\"");
        assert_eq!(serde_json::to_string(&CancelAfter::Min).unwrap(), "\"min\"");
    }
}
