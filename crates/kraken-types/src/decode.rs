//! Positional-array decoding
//!
//! Kraken encodes many records as bare JSON arrays whose meaning depends on
//! position, e.g. `["30000.1", "1.5", 1688671200]` for a book level. This
//! module is the one place that knows how to check the arity of such an
//! array and convert each element by its declared type.
//!
//! Numeric strings are parsed into [`Decimal`] and never fall back to zero:
//! a malformed element fails the whole record with the field name attached.

use crate::error::{DecodeError, DecodeResult};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::de::{self, Deserialize, DeserializeOwned, Deserializer};
use serde_json::Value;

/// A record that is encoded on the wire as a positional JSON array
pub trait Positional: Sized {
    /// Human name used in error messages
    const RECORD: &'static str;

    /// Decode from the array elements
    fn from_values(values: &[Value]) -> DecodeResult<Self>;

    /// Decode from a JSON value, which must be an array
    fn from_value(value: &Value) -> DecodeResult<Self> {
        match value {
            Value::Array(values) => Self::from_values(values),
            other => Err(DecodeError::unexpected_type(Self::RECORD, "array", other)),
        }
    }
}

/// Serde entry point for [`Positional`] records
///
/// Lets positional records sit inside derived structs (`Vec<BookLevel>`,
/// `Vec<Candle>`) while keeping the decoder's error message.
pub fn deserialize_positional<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Positional,
{
    let values = Vec::<Value>::deserialize(deserializer)?;
    T::from_values(&values).map_err(de::Error::custom)
}

/// Arity-checked view over a positional array
#[derive(Debug, Clone, Copy)]
pub struct Fields<'a> {
    record: &'static str,
    values: &'a [Value],
}

impl<'a> Fields<'a> {
    /// Require exactly `len` elements
    pub fn exact(record: &'static str, values: &'a [Value], len: usize) -> DecodeResult<Self> {
        if values.len() != len {
            return Err(DecodeError::length(record, len, values.len()));
        }
        Ok(Self { record, values })
    }

    /// Require between `min` and `max` elements (inclusive)
    pub fn between(
        record: &'static str,
        values: &'a [Value],
        min: usize,
        max: usize,
    ) -> DecodeResult<Self> {
        if values.len() < min || values.len() > max {
            let expected = if max == min + 1 {
                format!("{} or {}", min, max)
            } else {
                format!("{} to {}", min, max)
            };
            return Err(DecodeError::length(record, expected, values.len()));
        }
        Ok(Self { record, values })
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when the array is empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Raw element at `index`
    pub fn get(&self, index: usize) -> Option<&'a Value> {
        self.values.get(index)
    }

    fn at(&self, index: usize, name: &str) -> DecodeResult<&'a Value> {
        self.values
            .get(index)
            .ok_or_else(|| DecodeError::UnexpectedType {
                field: self.field_name(name),
                expected: "element",
                found: "nothing",
            })
    }

    fn field_name(&self, name: &str) -> String {
        format!("{}.{}", self.record, name)
    }

    /// Element as a decimal (numeric string or JSON number)
    pub fn decimal(&self, index: usize, name: &str) -> DecodeResult<Decimal> {
        parse_decimal_value(&self.field_name(name), self.at(index, name)?)
    }

    /// Element as a signed integer
    pub fn integer(&self, index: usize, name: &str) -> DecodeResult<i64> {
        parse_integer_value(&self.field_name(name), self.at(index, name)?)
    }

    /// Element as a non-negative count
    pub fn count(&self, index: usize, name: &str) -> DecodeResult<u64> {
        let field = self.field_name(name);
        let value = self.at(index, name)?;
        let n = parse_integer_value(&field, value)?;
        u64::try_from(n).map_err(|_| DecodeError::invalid_number(field, n.to_string()))
    }

    /// Element as a float (fractional epoch seconds)
    pub fn float(&self, index: usize, name: &str) -> DecodeResult<f64> {
        let field = self.field_name(name);
        match self.at(index, name)? {
            Value::Number(n) => n
                .as_f64()
                .ok_or_else(|| DecodeError::invalid_number(field, n.to_string())),
            Value::String(s) => s
                .parse::<f64>()
                .map_err(|_| DecodeError::invalid_number(field, s.clone())),
            other => Err(DecodeError::unexpected_type(field, "number", other)),
        }
    }

    /// Element as epoch seconds converted to UTC time
    pub fn timestamp(&self, index: usize, name: &str) -> DecodeResult<DateTime<Utc>> {
        let field = self.field_name(name);
        let secs = parse_integer_value(&field, self.at(index, name)?)?;
        DateTime::from_timestamp(secs, 0)
            .ok_or_else(|| DecodeError::invalid_number(field, secs.to_string()))
    }

    /// Element as a string slice
    pub fn string(&self, index: usize, name: &str) -> DecodeResult<&'a str> {
        match self.at(index, name)? {
            Value::String(s) => Ok(s),
            other => Err(DecodeError::unexpected_type(self.field_name(name), "string", other)),
        }
    }
}

/// Parse a JSON value holding a decimal
///
/// Accepts numeric strings (Kraken's usual encoding) and JSON numbers (fee
/// schedules, leverage tables). Empty or malformed strings are errors.
pub fn parse_decimal_value(field: &str, value: &Value) -> DecodeResult<Decimal> {
    match value {
        Value::String(s) => parse_decimal_str(field, s),
        Value::Number(n) => parse_decimal_str(field, &n.to_string()),
        other => Err(DecodeError::unexpected_type(field, "decimal string", other)),
    }
}

/// Parse a decimal string, allowing scientific notation
///
/// Only `[+-]digits[.digits][e[+-]digits]` is accepted: no padding, no
/// digit separators. Values that do not fit a `Decimal` without rounding
/// are rejected.
pub fn parse_decimal_str(field: &str, s: &str) -> DecodeResult<Decimal> {
    if !is_decimal_literal(s) {
        return Err(DecodeError::invalid_number(field, s));
    }

    let unsigned = s.strip_prefix('+').unwrap_or(s);
    let parsed = if unsigned.contains(|c| c == 'e' || c == 'E') {
        Decimal::from_scientific(unsigned)
    } else {
        Decimal::from_str_exact(unsigned)
    };
    parsed.map_err(|_| DecodeError::invalid_number(field, s))
}

fn is_decimal_literal(s: &str) -> bool {
    let bytes = s.as_bytes();
    let mut i = 0;

    let digits = |i: &mut usize| {
        let start = *i;
        while *i < bytes.len() && bytes[*i].is_ascii_digit() {
            *i += 1;
        }
        *i - start
    };

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }
    let mut mantissa = digits(&mut i);
    if bytes.get(i) == Some(&b'.') {
        i += 1;
        mantissa += digits(&mut i);
    }
    if mantissa == 0 {
        return false;
    }
    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        i += 1;
        if matches!(bytes.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        if digits(&mut i) == 0 {
            return false;
        }
    }
    i == bytes.len()
}

fn parse_integer_value(field: &str, value: &Value) -> DecodeResult<i64> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(i);
            }
            // Integral floats such as 42.0 are accepted, fractions are not
            match n.as_f64() {
                Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Ok(f as i64),
                _ => Err(DecodeError::invalid_number(field, n.to_string())),
            }
        }
        other => Err(DecodeError::unexpected_type(field, "integer", other)),
    }
}

/// Decode a `result` payload into `T`
///
/// Failures inside the payload carry the JSON path of the offending field
/// (`open.OQCLML-BW3P3-BUCMWZ.vol`) in [`DecodeError::Field`].
pub fn decode_value<T: DeserializeOwned>(value: Value) -> DecodeResult<T> {
    serde_path_to_error::deserialize(value).map_err(|err| {
        let path = err.path().to_string();
        let inner = err.into_inner();
        if path == "." {
            DecodeError::Json(inner)
        } else {
            DecodeError::Field {
                path,
                message: inner.to_string(),
            }
        }
    })
}

/// Adapter errors omit the field; [`decode_value`] supplies the path
fn adapter_error<E: de::Error>(err: DecodeError) -> E {
    match err {
        DecodeError::InvalidNumber { value, .. } => {
            E::custom(format_args!("invalid number {:?}", value))
        }
        DecodeError::UnexpectedType {
            expected, found, ..
        } => E::custom(format_args!("expected {}, found {}", expected, found)),
        other => E::custom(other),
    }
}

/// Serde adapter for `Decimal` fields sent as strings or numbers
pub fn deserialize_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    parse_decimal_value("", &value).map_err(adapter_error)
}

/// Serde adapter for optional `Decimal` fields
///
/// `null`, a missing field (with `#[serde(default)]`) and an empty string
/// all map to `None`.
pub fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) if s.is_empty() => Ok(None),
        value => parse_decimal_value("", &value)
            .map(Some)
            .map_err(adapter_error),
    }
}

/// Serde adapter for `Vec<Decimal>` sent as strings or numbers
pub fn deserialize_decimal_vec<'de, D>(deserializer: D) -> Result<Vec<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Vec::<Value>::deserialize(deserializer)?;
    values
        .iter()
        .enumerate()
        .map(|(i, v)| parse_decimal_value(&format!("[{}]", i), v))
        .collect::<DecodeResult<Vec<_>>>()
        .map_err(de::Error::custom)
}
