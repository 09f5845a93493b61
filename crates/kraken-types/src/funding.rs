//! Funding records (`DepositMethods`, `DepositAddresses`, `WithdrawInfo`,
//! `Withdraw`)

use crate::decode::{deserialize_decimal, deserialize_optional_decimal, parse_decimal_value};
use rust_decimal::Decimal;
use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value;

/// A deposit method for an asset
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DepositMethod {
    /// Name of deposit method
    pub method: String,
    /// Maximum net amount that can be deposited right now (`None` = no limit)
    #[serde(default, deserialize_with = "deserialize_limit")]
    pub limit: Option<Decimal>,
    /// Amount of fees that will be paid
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub fee: Option<Decimal>,
    /// Whether or not method has an address setup fee
    #[serde(rename = "address-setup-fee", default, deserialize_with = "deserialize_optional_decimal")]
    pub address_setup_fee: Option<Decimal>,
    /// Whether new addresses can be generated for this method
    #[serde(rename = "gen-address", default)]
    pub gen_address: bool,
    /// Minimum deposit amount
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub minimum: Option<Decimal>,
}

/// Kraken reports "no limit" as `false`
fn deserialize_limit<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null | Value::Bool(false) => Ok(None),
        value => parse_decimal_value("limit", &value)
            .map(Some)
            .map_err(de::Error::custom),
    }
}

/// A deposit address
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DepositAddress {
    /// Deposit address
    pub address: String,
    /// Expiration time in unix timestamp, or 0 if not expiring
    #[serde(default)]
    pub expiretm: String,
    /// Whether or not address has ever been used
    #[serde(default)]
    pub new: bool,
    /// Tag or memo required by some assets
    #[serde(default)]
    pub tag: Option<String>,
    /// Memo required by some assets
    #[serde(default)]
    pub memo: Option<String>,
}

/// Result of `WithdrawInfo`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WithdrawInfo {
    /// Name of the withdrawal method that will be used
    pub method: String,
    /// Maximum net amount that can be withdrawn right now
    #[serde(deserialize_with = "deserialize_decimal")]
    pub limit: Decimal,
    /// Net amount that will be sent, after fees
    #[serde(deserialize_with = "deserialize_decimal")]
    pub amount: Decimal,
    /// Amount of fees that will be paid
    #[serde(deserialize_with = "deserialize_decimal")]
    pub fee: Decimal,
}

/// Result of `Withdraw`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WithdrawResult {
    /// Reference id
    pub refid: String,
}
