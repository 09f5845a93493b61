//! Order records (`OpenOrders`, `ClosedOrders`, `QueryOrders`, `AddOrder`, `CancelOrder`)

use crate::decode::{deserialize_decimal, deserialize_optional_decimal};
use crate::enums::{OrderSide, OrderStatus, OrderType};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;

/// Order description
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OrderDescription {
    /// Asset pair
    pub pair: String,
    /// Type (buy/sell)
    #[serde(rename = "type")]
    pub side: OrderSide,
    /// Order type
    pub ordertype: OrderType,
    /// Primary price (limit price, or trigger price for conditional types)
    #[serde(deserialize_with = "deserialize_decimal")]
    pub price: Decimal,
    /// Secondary price (limit price for *-limit types)
    #[serde(deserialize_with = "deserialize_decimal")]
    pub price2: Decimal,
    /// Leverage
    pub leverage: String,
    /// Human-readable order description
    pub order: String,
    /// Conditional close order description (empty when not set)
    #[serde(default)]
    pub close: String,
}

/// Order state snapshot
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Order {
    /// Referral order transaction ID that created this order
    #[serde(default)]
    pub refid: Option<String>,
    /// User reference id
    #[serde(default)]
    pub userref: Option<i64>,
    /// Client order id
    #[serde(default)]
    pub cl_ord_id: Option<String>,
    /// Order status
    pub status: OrderStatus,
    /// Unix timestamp of when order was placed
    pub opentm: f64,
    /// Unix timestamp of order start time (0 if not set)
    #[serde(default)]
    pub starttm: f64,
    /// Unix timestamp of order end time (0 if not set)
    #[serde(default)]
    pub expiretm: f64,
    /// Unix timestamp of when order was closed (closed orders only)
    #[serde(default)]
    pub closetm: Option<f64>,
    /// Order description
    pub descr: OrderDescription,
    /// Volume of order (base currency)
    #[serde(deserialize_with = "deserialize_decimal")]
    pub vol: Decimal,
    /// Volume executed (base currency)
    #[serde(deserialize_with = "deserialize_decimal")]
    pub vol_exec: Decimal,
    /// Total cost (quote currency)
    #[serde(deserialize_with = "deserialize_decimal")]
    pub cost: Decimal,
    /// Total fee (quote currency)
    #[serde(deserialize_with = "deserialize_decimal")]
    pub fee: Decimal,
    /// Average price (quote currency)
    #[serde(deserialize_with = "deserialize_decimal")]
    pub price: Decimal,
    /// Stop price (quote currency)
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub stopprice: Option<Decimal>,
    /// Triggered limit price (quote currency)
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub limitprice: Option<Decimal>,
    /// Comma delimited list of miscellaneous info
    #[serde(default)]
    pub misc: String,
    /// Comma delimited list of order flags
    #[serde(default)]
    pub oflags: String,
    /// Reason the order was closed or canceled
    #[serde(default)]
    pub reason: Option<String>,
    /// Trade ids related to the order (when requested with `trades=true`)
    #[serde(default)]
    pub trades: Option<Vec<String>>,
}

impl Order {
    /// Volume still unfilled
    pub fn remaining(&self) -> Decimal {
        self.vol - self.vol_exec
    }

    /// True when some volume has executed
    pub fn is_partially_filled(&self) -> bool {
        !self.vol_exec.is_zero() && self.vol_exec < self.vol
    }
}

/// Result of `OpenOrders`
#[derive(Debug, Clone, Deserialize)]
pub struct OpenOrdersResponse {
    /// Open orders keyed by transaction ID
    pub open: HashMap<String, Order>,
}

/// Result of `ClosedOrders`
#[derive(Debug, Clone, Deserialize)]
pub struct ClosedOrdersResponse {
    /// Closed orders keyed by transaction ID
    pub closed: HashMap<String, Order>,
    /// Count of total results
    pub count: u32,
}

/// Result of `QueryOrders`, keyed by transaction ID
pub type QueryOrdersResponse = HashMap<String, Order>;

/// Result of `AddOrder`
#[derive(Debug, Clone, Deserialize)]
pub struct AddOrderResponse {
    /// Order description
    pub descr: AddOrderDescription,
    /// Transaction IDs (absent when only validating)
    #[serde(default)]
    pub txid: Vec<String>,
}

/// Description echoed back by `AddOrder`
#[derive(Debug, Clone, Deserialize)]
pub struct AddOrderDescription {
    /// Order description
    pub order: String,
    /// Close order description (if applicable)
    #[serde(default)]
    pub close: Option<String>,
}

/// Result of `CancelOrder` / `CancelAll`
#[derive(Debug, Clone, Deserialize)]
pub struct CancelOrderResponse {
    /// Number of orders canceled
    pub count: u32,
    /// Whether cancellation is pending
    #[serde(default)]
    pub pending: bool,
}
