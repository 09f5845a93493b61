//! Public trade and spread history (`Trades`, `Spread` endpoints)

use crate::candle::single_pair_entry;
use crate::decode::{deserialize_positional, Fields, Positional};
use crate::enums::{OrderSide, TradeKind};
use crate::error::{DecodeError, DecodeResult};
use rust_decimal::Decimal;
use serde::de::{self, Deserialize, Deserializer};
use serde_json::{Map, Value};

/// A public trade
///
/// Wire format: `[price, volume, time, side, kind, misc]` with an optional
/// trailing trade id on newer API versions.
#[derive(Debug, Clone, PartialEq)]
pub struct RecentTrade {
    /// Execution price
    pub price: Decimal,
    /// Executed volume
    pub volume: Decimal,
    /// Execution time, fractional epoch seconds
    pub time: f64,
    /// Taker side
    pub side: OrderSide,
    /// Market or limit
    pub kind: TradeKind,
    /// Miscellaneous flags
    pub misc: String,
    /// Trade id (absent on older responses)
    pub trade_id: Option<u64>,
}

impl Positional for RecentTrade {
    const RECORD: &'static str = "trade";

    fn from_values(values: &[Value]) -> DecodeResult<Self> {
        let fields = Fields::between(Self::RECORD, values, 6, 7)?;
        let trade_id = if fields.len() == 7 {
            Some(fields.count(6, "trade_id")?)
        } else {
            None
        };

        Ok(Self {
            price: fields.decimal(0, "price")?,
            volume: fields.decimal(1, "volume")?,
            time: fields.float(2, "time")?,
            side: OrderSide::from_code("trade.side", fields.string(3, "side")?)?,
            kind: TradeKind::from_code("trade.kind", fields.string(4, "kind")?)?,
            misc: fields.string(5, "misc")?.to_string(),
            trade_id,
        })
    }
}

impl<'de> Deserialize<'de> for RecentTrade {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserialize_positional(deserializer)
    }
}

/// Result of a `Trades` query
#[derive(Debug, Clone, PartialEq)]
pub struct TradesResponse {
    /// Pair name as reported by Kraken
    pub pair: String,
    /// Trades, oldest first
    pub trades: Vec<RecentTrade>,
    /// Cursor (nanosecond id) to pass as `since` for the next poll
    pub last: String,
}

impl<'de> Deserialize<'de> for TradesResponse {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let map = Map::<String, Value>::deserialize(deserializer)?;
        let (pair, rows) = single_pair_entry(&map, "trades").map_err(de::Error::custom)?;
        let trades = rows
            .iter()
            .map(RecentTrade::from_value)
            .collect::<DecodeResult<Vec<_>>>()
            .map_err(de::Error::custom)?;
        let last = cursor(&map, "trades.last").map_err(de::Error::custom)?;

        Ok(Self {
            pair: pair.to_string(),
            trades,
            last,
        })
    }
}

/// Best bid/ask at a point in time
///
/// Wire format: `[time, bid, ask]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spread {
    /// Epoch seconds
    pub time: i64,
    /// Best bid
    pub bid: Decimal,
    /// Best ask
    pub ask: Decimal,
}

impl Spread {
    /// Ask minus bid
    pub fn width(&self) -> Decimal {
        self.ask - self.bid
    }
}

impl Positional for Spread {
    const RECORD: &'static str = "spread";

    fn from_values(values: &[Value]) -> DecodeResult<Self> {
        let fields = Fields::exact(Self::RECORD, values, 3)?;
        Ok(Self {
            time: fields.integer(0, "time")?,
            bid: fields.decimal(1, "bid")?,
            ask: fields.decimal(2, "ask")?,
        })
    }
}

impl<'de> Deserialize<'de> for Spread {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserialize_positional(deserializer)
    }
}

/// Result of a `Spread` query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpreadResponse {
    /// Pair name as reported by Kraken
    pub pair: String,
    /// Spread samples, oldest first
    pub spreads: Vec<Spread>,
    /// Cursor to pass as `since` for the next poll
    pub last: String,
}

impl<'de> Deserialize<'de> for SpreadResponse {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let map = Map::<String, Value>::deserialize(deserializer)?;
        let (pair, rows) = single_pair_entry(&map, "spread").map_err(de::Error::custom)?;
        let spreads = rows
            .iter()
            .map(Spread::from_value)
            .collect::<DecodeResult<Vec<_>>>()
            .map_err(de::Error::custom)?;
        let last = cursor(&map, "spread.last").map_err(de::Error::custom)?;

        Ok(Self {
            pair: pair.to_string(),
            spreads,
            last,
        })
    }
}

/// `last` arrives as a string on `Trades` and as a number on `Spread`
fn cursor(map: &Map<String, Value>, field: &str) -> DecodeResult<String> {
    match map.get("last") {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(other) => Err(DecodeError::unexpected_type(field, "string or number", other)),
        None => Err(DecodeError::UnexpectedType {
            field: field.to_string(),
            expected: "string or number",
            found: "nothing",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_trade_with_id() {
        let json = r#"["30243.40000","0.34507674",1688669597.8277369,"b","m","",62155914]"#;
        let trade: RecentTrade = serde_json::from_str(json).unwrap();

        assert_eq!(trade.price, dec!(30243.40000));
        assert_eq!(trade.volume, dec!(0.34507674));
        assert_eq!(trade.side, OrderSide::Buy);
        assert_eq!(trade.kind, TradeKind::Market);
        assert_eq!(trade.trade_id, Some(62155914));
        assert!((trade.time - 1688669597.8277369).abs() < 1e-6);
    }

    #[test]
    fn test_trade_without_id() {
        let json = r#"["30243.4","0.5",1688669597.5,"s","l",""]"#;
        let trade: RecentTrade = serde_json::from_str(json).unwrap();
        assert_eq!(trade.side, OrderSide::Sell);
        assert_eq!(trade.kind, TradeKind::Limit);
        assert_eq!(trade.trade_id, None);
    }

    #[test]
    fn test_trade_unknown_side() {
        let value = serde_json::json!(["1.0", "1.0", 1.0, "x", "l", ""]);
        let err = RecentTrade::from_value(&value).unwrap_err();
        assert!(matches!(err, DecodeError::UnknownVariant { .. }));
    }

    #[test]
    fn test_trades_response() {
        let json = r#"{
            "XXBTZUSD": [["30243.4","0.5",1688669597.5,"s","l","",1]],
            "last": "1688671969993150842"
        }"#;
        let response: TradesResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.pair, "XXBTZUSD");
        assert_eq!(response.trades.len(), 1);
        assert_eq!(response.last, "1688671969993150842");
    }

    #[test]
    fn test_spread_response() {
        let json = r#"{
            "XXBTZUSD": [[1688671834,"30292.10000","30297.50000"]],
            "last": 1688672106
        }"#;
        let response: SpreadResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.spreads[0].width(), dec!(5.40000));
        assert_eq!(response.last, "1688672106");
    }
}
