//! Typed records for Kraken REST API responses
//!
//! This crate turns the `result` payload of Kraken's REST responses into
//! typed values. It performs no I/O and can be used independently of the
//! HTTP client.
//!
//! # Key Types
//!
//! - [`Positional`], [`Fields`] - Arity-checked decoding of positional arrays
//! - [`BookLevel`], [`Candle`], [`RecentTrade`], [`Spread`] - Positional records
//! - [`TickerInfo`], [`OrderBook`], [`OhlcResponse`] - Market data
//! - [`Order`], [`OrderStatus`], [`OrderType`] - Order state
//! - [`PairMap`] - Per-pair results with `Option`-returning lookup
//! - [`DecodeError`] - Decoding failures naming the record and field
//! - [`KrakenApiError`], [`KrakenErrorCode`] - Classification of exchange errors
//!
//! All prices, volumes and amounts are [`Decimal`]; malformed numeric
//! strings are rejected rather than read as zero.

pub mod account;
pub mod candle;
pub mod decode;
pub mod enums;
pub mod error;
pub mod error_codes;
pub mod funding;
pub mod level;
pub mod market;
pub mod order;
pub mod pair_map;
pub mod ticker;
pub mod trade;

// Re-export commonly used types
pub use account::*;
pub use candle::*;
pub use decode::{
    decode_value, deserialize_decimal, deserialize_decimal_vec, deserialize_optional_decimal,
    deserialize_positional, parse_decimal_str, parse_decimal_value, Fields, Positional,
};
pub use enums::*;
pub use error::*;
pub use error_codes::*;
pub use funding::*;
pub use level::*;
pub use market::*;
pub use order::*;
pub use pair_map::*;
pub use ticker::*;
pub use trade::*;

// Re-export rust_decimal for users
pub use rust_decimal::Decimal;
