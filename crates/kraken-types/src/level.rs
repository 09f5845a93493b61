//! Order book levels from the `Depth` endpoint

use crate::decode::{deserialize_positional, Fields, Positional};
use crate::error::DecodeResult;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// A single price level in the orderbook
///
/// Wire format: `[price, volume, timestamp]` where price and volume are
/// decimal strings and timestamp is integer epoch seconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookLevel {
    /// Price of this level
    pub price: Decimal,
    /// Volume resting at this price
    pub volume: Decimal,
    /// Last update, epoch seconds
    pub timestamp: i64,
}

impl BookLevel {
    /// Create a new price level
    pub fn new(price: Decimal, volume: Decimal, timestamp: i64) -> Self {
        Self {
            price,
            volume,
            timestamp,
        }
    }

    /// Notional value of the level (price * volume)
    pub fn notional(&self) -> Decimal {
        self.price * self.volume
    }
}

impl Positional for BookLevel {
    const RECORD: &'static str = "book level";

    fn from_values(values: &[Value]) -> DecodeResult<Self> {
        let fields = Fields::exact(Self::RECORD, values, 3)?;
        Ok(Self {
            price: fields.decimal(0, "price")?,
            volume: fields.decimal(1, "volume")?,
            timestamp: fields.integer(2, "timestamp")?,
        })
    }
}

impl<'de> Deserialize<'de> for BookLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserialize_positional(deserializer)
    }
}

impl Serialize for BookLevel {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        (self.price.to_string(), self.volume.to_string(), self.timestamp).serialize(serializer)
    }
}

/// Orderbook snapshot for one pair
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBook {
    /// Ask levels, best (lowest) first
    pub asks: Vec<BookLevel>,
    /// Bid levels, best (highest) first
    pub bids: Vec<BookLevel>,
}

impl OrderBook {
    /// Best ask level
    pub fn best_ask(&self) -> Option<&BookLevel> {
        self.asks.first()
    }

    /// Best bid level
    pub fn best_bid(&self) -> Option<&BookLevel> {
        self.bids.first()
    }

    /// Best ask minus best bid
    pub fn spread(&self) -> Option<Decimal> {
        Some(self.best_ask()?.price - self.best_bid()?.price)
    }

    /// Midpoint between best bid and best ask
    pub fn mid_price(&self) -> Option<Decimal> {
        Some((self.best_ask()?.price + self.best_bid()?.price) / Decimal::TWO)
    }
}
