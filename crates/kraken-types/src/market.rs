//! Reference data from the public market endpoints (`Time`, `SystemStatus`,
//! `Assets`, `AssetPairs`)

use crate::decode::{
    deserialize_decimal_vec, deserialize_optional_decimal, deserialize_positional, Fields,
    Positional,
};
use crate::error::DecodeResult;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Result of `Time`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerTime {
    /// Unix timestamp
    pub unixtime: i64,
    /// RFC 1123 time format
    pub rfc1123: String,
}

impl ServerTime {
    /// Server time as a UTC datetime
    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.unixtime, 0)
    }
}

/// Exchange trading mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SystemState {
    /// Operating normally
    Online,
    /// Down for maintenance
    Maintenance,
    /// Only order cancellations are accepted
    CancelOnly,
    /// Only post-only limit orders are accepted
    PostOnly,
}

/// Result of `SystemStatus`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SystemStatus {
    /// Current trading mode
    pub status: SystemState,
    /// Server time (RFC 3339)
    pub timestamp: String,
}

impl SystemStatus {
    /// True when new orders are accepted without restrictions
    pub fn is_online(&self) -> bool {
        self.status == SystemState::Online
    }
}

/// Asset information from `Assets`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AssetInfo {
    /// Asset class
    pub aclass: String,
    /// Alternate name
    pub altname: String,
    /// Scaling decimal places for record keeping
    pub decimals: u32,
    /// Scaling decimal places for output display
    pub display_decimals: u32,
    /// Valuation as margin collateral (if applicable)
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub collateral_value: Option<Decimal>,
    /// Funding/trading status
    #[serde(default)]
    pub status: Option<String>,
}

/// A `[volume, percent fee]` fee schedule tier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeTier {
    /// Volume threshold (in `fee_volume_currency`)
    pub volume: Decimal,
    /// Fee in percent
    pub percent: Decimal,
}

impl Positional for FeeTier {
    const RECORD: &'static str = "fee tier";

    fn from_values(values: &[Value]) -> DecodeResult<Self> {
        let fields = Fields::exact(Self::RECORD, values, 2)?;
        Ok(Self {
            volume: fields.decimal(0, "volume")?,
            percent: fields.decimal(1, "percent")?,
        })
    }
}

impl<'de> Deserialize<'de> for FeeTier {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserialize_positional(deserializer)
    }
}

/// Tradable asset pair from `AssetPairs`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AssetPairInfo {
    /// Alternate pair name
    pub altname: String,
    /// WebSocket pair name (if available)
    #[serde(default)]
    pub wsname: Option<String>,
    /// Asset class of base component
    pub aclass_base: String,
    /// Asset ID of base component
    pub base: String,
    /// Asset class of quote component
    pub aclass_quote: String,
    /// Asset ID of quote component
    pub quote: String,
    /// Scaling decimal places for pair
    pub pair_decimals: u32,
    /// Scaling decimal places for cost
    #[serde(default)]
    pub cost_decimals: Option<u32>,
    /// Scaling decimal places for volume
    pub lot_decimals: u32,
    /// Amount to multiply lot volume by to get currency volume
    pub lot_multiplier: u32,
    /// Leverage amounts available when buying
    #[serde(default, deserialize_with = "deserialize_decimal_vec")]
    pub leverage_buy: Vec<Decimal>,
    /// Leverage amounts available when selling
    #[serde(default, deserialize_with = "deserialize_decimal_vec")]
    pub leverage_sell: Vec<Decimal>,
    /// Taker fee schedule
    #[serde(default)]
    pub fees: Vec<FeeTier>,
    /// Maker fee schedule
    #[serde(default)]
    pub fees_maker: Vec<FeeTier>,
    /// Volume discount currency
    #[serde(default)]
    pub fee_volume_currency: Option<String>,
    /// Margin call level
    #[serde(default)]
    pub margin_call: Option<u32>,
    /// Stop-out/liquidation margin level
    #[serde(default)]
    pub margin_stop: Option<u32>,
    /// Minimum order size (in base currency)
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub ordermin: Option<Decimal>,
    /// Minimum order cost (in quote currency)
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub costmin: Option<Decimal>,
    /// Minimum price increment
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub tick_size: Option<Decimal>,
    /// Pair status
    #[serde(default)]
    pub status: Option<String>,
}

impl AssetPairInfo {
    /// Taker fee in percent for a 30-day volume
    pub fn taker_fee(&self, volume: Decimal) -> Option<Decimal> {
        tier_fee(&self.fees, volume)
    }

    /// Maker fee in percent for a 30-day volume
    pub fn maker_fee(&self, volume: Decimal) -> Option<Decimal> {
        tier_fee(&self.fees_maker, volume)
    }
}

fn tier_fee(tiers: &[FeeTier], volume: Decimal) -> Option<Decimal> {
    tiers
        .iter()
        .take_while(|tier| tier.volume <= volume)
        .last()
        .map(|tier| tier.percent)
}
