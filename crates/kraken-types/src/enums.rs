//! Order side, order type, order status and trade kind enums

use crate::error::{DecodeError, DecodeResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Order side (buy or sell)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    /// Buy order
    Buy,
    /// Sell order
    Sell,
}

impl OrderSide {
    /// Returns the side as used in API parameters
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        }
    }

    /// Returns the opposite side
    pub fn opposite(&self) -> Self {
        match self {
            Self::Buy => Self::Sell,
            Self::Sell => Self::Buy,
        }
    }

    /// Parse the single-letter code used in trade arrays ("b" / "s")
    pub fn from_code(field: &str, code: &str) -> DecodeResult<Self> {
        match code {
            "b" | "buy" => Ok(Self::Buy),
            "s" | "sell" => Ok(Self::Sell),
            other => Err(DecodeError::UnknownVariant {
                field: field.to_string(),
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a public trade came from a market or a limit order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeKind {
    /// Market order
    Market,
    /// Limit order
    Limit,
}

impl TradeKind {
    /// Parse the single-letter code used in trade arrays ("m" / "l")
    pub fn from_code(field: &str, code: &str) -> DecodeResult<Self> {
        match code {
            "m" | "market" => Ok(Self::Market),
            "l" | "limit" => Ok(Self::Limit),
            other => Err(DecodeError::UnknownVariant {
                field: field.to_string(),
                value: other.to_string(),
            }),
        }
    }
}

/// Order type
///
/// Closed set of order types Kraken documents for `AddOrder` and reports
/// back in order descriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderType {
    /// Market order
    Market,
    /// Limit order (price = limit price)
    Limit,
    /// Stop loss (price = stop price)
    StopLoss,
    /// Take profit (price = take profit price)
    TakeProfit,
    /// Stop loss + take profit (price = stop, price2 = take profit)
    StopLossProfit,
    /// Stop loss + take profit, limit variant
    StopLossProfitLimit,
    /// Stop loss limit (price = trigger, price2 = limit)
    StopLossLimit,
    /// Take profit limit (price = trigger, price2 = limit)
    TakeProfitLimit,
    /// Trailing stop (price = offset)
    TrailingStop,
    /// Trailing stop limit (price = offset, price2 = limit offset)
    TrailingStopLimit,
    /// Stop loss and limit (price = stop, price2 = limit)
    StopLossAndLimit,
    /// Settle position
    SettlePosition,
}

impl OrderType {
    /// All order types, in documentation order
    pub const ALL: [OrderType; 12] = [
        Self::Market,
        Self::Limit,
        Self::StopLoss,
        Self::TakeProfit,
        Self::StopLossProfit,
        Self::StopLossProfitLimit,
        Self::StopLossLimit,
        Self::TakeProfitLimit,
        Self::TrailingStop,
        Self::TrailingStopLimit,
        Self::StopLossAndLimit,
        Self::SettlePosition,
    ];

    /// Returns the type as used in API parameters
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Market => "market",
            Self::Limit => "limit",
            Self::StopLoss => "stop-loss",
            Self::TakeProfit => "take-profit",
            Self::StopLossProfit => "stop-loss-profit",
            Self::StopLossProfitLimit => "stop-loss-profit-limit",
            Self::StopLossLimit => "stop-loss-limit",
            Self::TakeProfitLimit => "take-profit-limit",
            Self::TrailingStop => "trailing-stop",
            Self::TrailingStopLimit => "trailing-stop-limit",
            Self::StopLossAndLimit => "stop-loss-and-limit",
            Self::SettlePosition => "settle-position",
        }
    }

    /// True when the order needs a secondary price (`price2`)
    pub fn uses_price2(&self) -> bool {
        matches!(
            self,
            Self::StopLossProfit
                | Self::StopLossProfitLimit
                | Self::StopLossLimit
                | Self::TakeProfitLimit
                | Self::TrailingStopLimit
                | Self::StopLossAndLimit
        )
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderType {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| DecodeError::UnknownVariant {
                field: "ordertype".to_string(),
                value: s.to_string(),
            })
    }
}

/// Order status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Order pending book entry
    Pending,
    /// Open order
    Open,
    /// Closed order
    Closed,
    /// Order canceled
    Canceled,
    /// Order expired
    Expired,
}

impl OrderStatus {
    /// Returns the status as reported by the API
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Open => "open",
            Self::Closed => "closed",
            Self::Canceled => "canceled",
            Self::Expired => "expired",
        }
    }

    /// True once the order can no longer fill
    pub fn is_final(&self) -> bool {
        matches!(self, Self::Closed | Self::Canceled | Self::Expired)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Time in force for orders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeInForce {
    /// Good till cancelled
    #[serde(rename = "GTC")]
    GoodTillCancelled,
    /// Immediate or cancel
    #[serde(rename = "IOC")]
    ImmediateOrCancel,
    /// Good till date
    #[serde(rename = "GTD")]
    GoodTillDate,
}

impl fmt::Display for TimeInForce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GoodTillCancelled => write!(f, "GTC"),
            Self::ImmediateOrCancel => write!(f, "IOC"),
            Self::GoodTillDate => write!(f, "GTD"),
        }
    }
}

/// Order flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderFlag {
    /// Post-only order (maker only)
    PostOnly,
    /// Fee in base currency
    FeeInBase,
    /// Fee in quote currency
    FeeInQuote,
    /// Disable market price protection
    NoMarketPriceProtection,
    /// Order volume in quote currency
    VolumeInQuote,
}

impl OrderFlag {
    /// Get the API string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PostOnly => "post",
            Self::FeeInBase => "fcib",
            Self::FeeInQuote => "fciq",
            Self::NoMarketPriceProtection => "nompp",
            Self::VolumeInQuote => "viqc",
        }
    }
}
