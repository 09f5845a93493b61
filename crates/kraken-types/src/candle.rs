//! OHLC candles from the `OHLC` endpoint

use crate::decode::{deserialize_positional, Fields, Positional};
use crate::error::{DecodeError, DecodeResult};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::de::{self, Deserialize, Deserializer};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// Individual OHLC candle
///
/// Wire format:
/// `[time, open, high, low, close, vwap, volume, count]`
/// where `time` is integer epoch seconds, the six prices/volumes are decimal
/// strings and `count` is an integer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candle {
    /// Start of the interval
    pub time: DateTime<Utc>,
    /// Open price
    pub open: Decimal,
    /// High price
    pub high: Decimal,
    /// Low price
    pub low: Decimal,
    /// Close price
    pub close: Decimal,
    /// Volume weighted average price
    pub vwap: Decimal,
    /// Volume
    pub volume: Decimal,
    /// Number of trades
    pub count: u64,
}

impl Candle {
    /// High minus low
    pub fn range(&self) -> Decimal {
        self.high - self.low
    }

    /// True when the candle closed at or above its open
    pub fn is_bullish(&self) -> bool {
        self.close >= self.open
    }
}

impl Positional for Candle {
    const RECORD: &'static str = "candle";

    fn from_values(values: &[Value]) -> DecodeResult<Self> {
        let fields = Fields::exact(Self::RECORD, values, 8)?;
        Ok(Self {
            time: fields.timestamp(0, "time")?,
            open: fields.decimal(1, "open")?,
            high: fields.decimal(2, "high")?,
            low: fields.decimal(3, "low")?,
            close: fields.decimal(4, "close")?,
            vwap: fields.decimal(5, "vwap")?,
            volume: fields.decimal(6, "volume")?,
            count: fields.count(7, "count")?,
        })
    }
}

impl<'de> Deserialize<'de> for Candle {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserialize_positional(deserializer)
    }
}

impl Serialize for Candle {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        (
            self.time.timestamp(),
            self.open.to_string(),
            self.high.to_string(),
            self.low.to_string(),
            self.close.to_string(),
            self.vwap.to_string(),
            self.volume.to_string(),
            self.count,
        )
            .serialize(serializer)
    }
}

/// Result of an `OHLC` query
///
/// Kraken returns `{"<PAIR>": [[...], ...], "last": <epoch>}`: the pair name
/// is a dynamic key next to the `last` cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OhlcResponse {
    /// Pair name as reported by Kraken (e.g. "XXBTZUSD")
    pub pair: String,
    /// Candles, oldest first
    pub candles: Vec<Candle>,
    /// Cursor to pass as `since` for the next poll (epoch seconds)
    pub last: i64,
}

impl OhlcResponse {
    /// Decode from the `result` object
    pub fn from_map(map: &Map<String, Value>) -> DecodeResult<Self> {
        let (pair, rows) = single_pair_entry(map, "ohlc")?;
        let candles = rows
            .iter()
            .map(Candle::from_value)
            .collect::<DecodeResult<Vec<_>>>()?;

        let last = match map.get("last") {
            Some(Value::Number(n)) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
                .ok_or_else(|| DecodeError::invalid_number("ohlc.last", n.to_string()))?,
            Some(other) => return Err(DecodeError::unexpected_type("ohlc.last", "integer", other)),
            None => {
                return Err(DecodeError::UnexpectedType {
                    field: "ohlc.last".to_string(),
                    expected: "integer",
                    found: "nothing",
                })
            }
        };

        Ok(Self {
            pair: pair.to_string(),
            candles,
            last,
        })
    }

    /// Most recent candle
    pub fn latest(&self) -> Option<&Candle> {
        self.candles.last()
    }
}

impl<'de> Deserialize<'de> for OhlcResponse {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let map = Map::<String, Value>::deserialize(deserializer)?;
        Self::from_map(&map).map_err(de::Error::custom)
    }
}

/// Find the single `<PAIR>: [...]` entry next to a `last` cursor
pub(crate) fn single_pair_entry<'a>(
    map: &'a Map<String, Value>,
    record: &'static str,
) -> DecodeResult<(&'a str, &'a Vec<Value>)> {
    let entries: Vec<_> = map.iter().filter(|(key, _)| key.as_str() != "last").collect();
    let (pair, value) = match entries.as_slice() {
        [single] => *single,
        other => return Err(DecodeError::length(record, "1 pair", other.len())),
    };

    match value {
        Value::Array(rows) => Ok((pair.as_str(), rows)),
        other => Err(DecodeError::unexpected_type(
            format!("{}.{}", record, pair),
            "array",
            other,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const CANDLE: &str = r#"[1609459200,"100.0","110.0","90.0","105.0","102.5","50.0",42]"#;

    #[test]
    fn test_candle_decodes_in_field_order() {
        let candle: Candle = serde_json::from_str(CANDLE).unwrap();

        assert_eq!(candle.time.to_rfc3339(), "2021-01-01T00:00:00+00:00");
        assert_eq!(candle.open, dec!(100.0));
        assert_eq!(candle.high, dec!(110.0));
        assert_eq!(candle.low, dec!(90.0));
        assert_eq!(candle.close, dec!(105.0));
        assert_eq!(candle.vwap, dec!(102.5));
        assert_eq!(candle.volume, dec!(50.0));
        assert_eq!(candle.count, 42);
        assert_eq!(candle.range(), dec!(20.0));
        assert!(candle.is_bullish());
    }

    #[test]
    fn test_candle_wrong_length_names_actual() {
        let value = serde_json::json!([1609459200, "100.0", "110.0", "90.0", "105.0"]);
        let err = Candle::from_value(&value).unwrap_err();
        assert_eq!(err.to_string(), "candle: expected 8 elements, got 5");
    }

    #[test]
    fn test_candle_rejects_non_numeric_string() {
        let value =
            serde_json::json!([1609459200, "100.0", "110.0", "abc", "105.0", "102.5", "50.0", 42]);
        let err = Candle::from_value(&value).unwrap_err();
        assert_eq!(err.field(), Some("candle.low"));
        assert!(matches!(err, DecodeError::InvalidNumber { .. }));
    }

    #[test]
    fn test_candle_roundtrip() {
        let candle: Candle = serde_json::from_str(CANDLE).unwrap();
        assert_eq!(serde_json::to_string(&candle).unwrap(), CANDLE);
    }

    #[test]
    fn test_ohlc_response() {
        let json = format!(r#"{{"XXBTZUSD": [{}, {}], "last": 1609459200}}"#, CANDLE, CANDLE);
        let response: OhlcResponse = serde_json::from_str(&json).unwrap();

        assert_eq!(response.pair, "XXBTZUSD");
        assert_eq!(response.candles.len(), 2);
        assert_eq!(response.last, 1609459200);
        assert_eq!(response.latest().map(|c| c.count), Some(42));
    }

    #[test]
    fn test_ohlc_response_bad_candle_fails_whole_decode() {
        let json = r#"{"XXBTZUSD": [[1609459200, "1.0"]], "last": 1609459200}"#;
        let err = serde_json::from_str::<OhlcResponse>(json).unwrap_err();
        assert!(err.to_string().contains("got 2"));
    }

    #[test]
    fn test_ohlc_response_requires_single_pair() {
        let json = r#"{"last": 1}"#;
        assert!(serde_json::from_str::<OhlcResponse>(json).is_err());
    }
}
