//! Ticker snapshots from the `Ticker` endpoint

use crate::decode::{parse_decimal_value, Fields};
use crate::error::DecodeResult;
use rust_decimal::Decimal;
use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value;

/// Best ask or bid: `[price, whole lot volume, lot volume]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickerQuote {
    /// Price
    pub price: Decimal,
    /// Whole lot volume
    pub whole_lot_volume: Decimal,
    /// Lot volume
    pub lot_volume: Decimal,
}

/// Last trade closed: `[price, lot volume]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastTrade {
    /// Price
    pub price: Decimal,
    /// Lot volume
    pub lot_volume: Decimal,
}

/// Today vs. rolling 24 hours: `[today, last 24 hours]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window<T> {
    /// Since 00:00 UTC
    pub today: T,
    /// Rolling last 24 hours
    pub last_24h: T,
}

/// Ticker information for a trading pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickerInfo {
    /// Best ask (`a`)
    pub ask: TickerQuote,
    /// Best bid (`b`)
    pub bid: TickerQuote,
    /// Last trade closed (`c`)
    pub last_trade: LastTrade,
    /// Volume (`v`)
    pub volume: Window<Decimal>,
    /// Volume weighted average price (`p`)
    pub vwap: Window<Decimal>,
    /// Number of trades (`t`)
    pub trades: Window<u64>,
    /// Low (`l`)
    pub low: Window<Decimal>,
    /// High (`h`)
    pub high: Window<Decimal>,
    /// Today's opening price (`o`)
    pub opening_price: Decimal,
}

impl TickerInfo {
    /// Get the mid price (average of bid and ask)
    pub fn mid_price(&self) -> Decimal {
        (self.ask.price + self.bid.price) / Decimal::TWO
    }

    /// Ask minus bid
    pub fn spread(&self) -> Decimal {
        self.ask.price - self.bid.price
    }

    /// Get spread in basis points of the mid price
    pub fn spread_bps(&self) -> Option<Decimal> {
        let mid = self.mid_price();
        if mid.is_zero() {
            return None;
        }
        Some(self.spread() / mid * Decimal::from(10000))
    }

    /// Change since today's open, as a fraction of the open
    pub fn change_since_open(&self) -> Option<Decimal> {
        if self.opening_price.is_zero() {
            return None;
        }
        Some((self.last_trade.price - self.opening_price) / self.opening_price)
    }
}

#[derive(Deserialize)]
struct RawTicker {
    a: Vec<Value>,
    b: Vec<Value>,
    c: Vec<Value>,
    v: Vec<Value>,
    p: Vec<Value>,
    t: Vec<Value>,
    l: Vec<Value>,
    h: Vec<Value>,
    o: Value,
}

fn quote(record: &'static str, values: &[Value]) -> DecodeResult<TickerQuote> {
    let fields = Fields::exact(record, values, 3)?;
    Ok(TickerQuote {
        price: fields.decimal(0, "price")?,
        whole_lot_volume: fields.decimal(1, "whole_lot_volume")?,
        lot_volume: fields.decimal(2, "lot_volume")?,
    })
}

fn decimal_window(record: &'static str, values: &[Value]) -> DecodeResult<Window<Decimal>> {
    let fields = Fields::exact(record, values, 2)?;
    Ok(Window {
        today: fields.decimal(0, "today")?,
        last_24h: fields.decimal(1, "last_24h")?,
    })
}

impl TickerInfo {
    fn from_raw(raw: RawTicker) -> DecodeResult<Self> {
        let close = Fields::exact("ticker.c", &raw.c, 2)?;
        let trades = Fields::exact("ticker.t", &raw.t, 2)?;

        Ok(Self {
            ask: quote("ticker.a", &raw.a)?,
            bid: quote("ticker.b", &raw.b)?,
            last_trade: LastTrade {
                price: close.decimal(0, "price")?,
                lot_volume: close.decimal(1, "lot_volume")?,
            },
            volume: decimal_window("ticker.v", &raw.v)?,
            vwap: decimal_window("ticker.p", &raw.p)?,
            trades: Window {
                today: trades.count(0, "today")?,
                last_24h: trades.count(1, "last_24h")?,
            },
            low: decimal_window("ticker.l", &raw.l)?,
            high: decimal_window("ticker.h", &raw.h)?,
            opening_price: parse_decimal_value("ticker.o", &raw.o)?,
        })
    }
}

impl<'de> Deserialize<'de> for TickerInfo {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawTicker::deserialize(deserializer)?;
        Self::from_raw(raw).map_err(de::Error::custom)
    }
}
