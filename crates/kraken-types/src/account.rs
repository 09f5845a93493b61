//! Private account records (`Balance`, `TradeBalance`, `TradesHistory`,
//! `Ledgers`, `TradeVolume`)

use crate::decode::{deserialize_decimal, deserialize_optional_decimal, parse_decimal_value};
use crate::enums::OrderSide;
use crate::error::DecodeResult;
use rust_decimal::Decimal;
use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

/// Account balances keyed by asset name ("ZUSD", "XXBT", ...)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Balances(HashMap<String, Decimal>);

impl Balances {
    /// Balance for an asset
    pub fn get(&self, asset: &str) -> Option<Decimal> {
        self.0.get(asset).copied()
    }

    /// Iterate over `(asset, balance)`
    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Assets holding a non-zero balance
    pub fn non_zero(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.iter().filter(|(_, balance)| !balance.is_zero())
    }

    /// Number of assets
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the account holds no assets
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn from_map(map: HashMap<String, Value>) -> DecodeResult<Self> {
        map.into_iter()
            .map(|(asset, value)| {
                let balance = parse_decimal_value(&format!("balance.{}", asset), &value)?;
                Ok((asset, balance))
            })
            .collect::<DecodeResult<HashMap<_, _>>>()
            .map(Self)
    }
}

impl<'de> Deserialize<'de> for Balances {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let map = HashMap::<String, Value>::deserialize(deserializer)?;
        Self::from_map(map).map_err(de::Error::custom)
    }
}

/// Result of `TradeBalance`
///
/// Margin fields are absent for accounts without open positions.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TradeBalance {
    /// Equivalent balance (combined balance of all currencies)
    #[serde(rename = "eb", deserialize_with = "deserialize_decimal")]
    pub equivalent_balance: Decimal,
    /// Trade balance (combined balance of all equity currencies)
    #[serde(rename = "tb", deserialize_with = "deserialize_decimal")]
    pub trade_balance: Decimal,
    /// Margin amount of open positions
    #[serde(rename = "m", default, deserialize_with = "deserialize_optional_decimal")]
    pub margin: Option<Decimal>,
    /// Unrealized net profit/loss of open positions
    #[serde(rename = "n", default, deserialize_with = "deserialize_optional_decimal")]
    pub unrealized_pnl: Option<Decimal>,
    /// Cost basis of open positions
    #[serde(rename = "c", default, deserialize_with = "deserialize_optional_decimal")]
    pub cost_basis: Option<Decimal>,
    /// Current floating valuation of open positions
    #[serde(rename = "v", default, deserialize_with = "deserialize_optional_decimal")]
    pub valuation: Option<Decimal>,
    /// Equity: trade balance + unrealized net profit/loss
    #[serde(rename = "e", default, deserialize_with = "deserialize_optional_decimal")]
    pub equity: Option<Decimal>,
    /// Free margin: equity - initial margin
    #[serde(rename = "mf", default, deserialize_with = "deserialize_optional_decimal")]
    pub free_margin: Option<Decimal>,
    /// Margin level: (equity / initial margin) * 100
    #[serde(rename = "ml", default, deserialize_with = "deserialize_optional_decimal")]
    pub margin_level: Option<Decimal>,
    /// Unexecuted value of open orders
    #[serde(rename = "uv", default, deserialize_with = "deserialize_optional_decimal")]
    pub unexecuted_value: Option<Decimal>,
}

/// One of the account's own fills
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TradeHistoryInfo {
    /// Order responsible for execution of trade
    pub ordertxid: String,
    /// Position id
    #[serde(default)]
    pub postxid: Option<String>,
    /// Asset pair
    pub pair: String,
    /// Unix timestamp of trade
    pub time: f64,
    /// Type of order (buy/sell)
    #[serde(rename = "type")]
    pub side: OrderSide,
    /// Order type
    pub ordertype: String,
    /// Average price order was executed at (quote currency)
    #[serde(deserialize_with = "deserialize_decimal")]
    pub price: Decimal,
    /// Total cost of order (quote currency)
    #[serde(deserialize_with = "deserialize_decimal")]
    pub cost: Decimal,
    /// Total fee (quote currency)
    #[serde(deserialize_with = "deserialize_decimal")]
    pub fee: Decimal,
    /// Volume (base currency)
    #[serde(deserialize_with = "deserialize_decimal")]
    pub vol: Decimal,
    /// Initial margin (quote currency)
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub margin: Option<Decimal>,
    /// Comma delimited list of miscellaneous info
    #[serde(default)]
    pub misc: String,
    /// True if trade was executed with a maker order
    #[serde(default)]
    pub maker: Option<bool>,
}

/// Result of `TradesHistory`
#[derive(Debug, Clone, Deserialize)]
pub struct TradesHistoryResponse {
    /// Trades keyed by trade id
    pub trades: HashMap<String, TradeHistoryInfo>,
    /// Amount of available trades matching criteria
    pub count: u32,
}

/// A ledger entry
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LedgerInfo {
    /// Reference id
    pub refid: String,
    /// Unix timestamp of ledger entry
    pub time: f64,
    /// Type of ledger entry (trade, deposit, withdrawal, ...)
    #[serde(rename = "type")]
    pub entry_type: String,
    /// Additional info relating to the ledger entry type
    #[serde(default)]
    pub subtype: String,
    /// Asset class
    pub aclass: String,
    /// Asset
    pub asset: String,
    /// Transaction amount
    #[serde(deserialize_with = "deserialize_decimal")]
    pub amount: Decimal,
    /// Transaction fee
    #[serde(deserialize_with = "deserialize_decimal")]
    pub fee: Decimal,
    /// Resulting balance
    #[serde(deserialize_with = "deserialize_decimal")]
    pub balance: Decimal,
}

/// Result of `Ledgers`
#[derive(Debug, Clone, Deserialize)]
pub struct LedgersResponse {
    /// Ledger entries keyed by ledger id
    pub ledger: HashMap<String, LedgerInfo>,
    /// Amount of available ledger entries matching criteria
    #[serde(default)]
    pub count: Option<u32>,
}

/// Result of `QueryLedgers`, keyed by ledger id
pub type QueryLedgersResponse = HashMap<String, LedgerInfo>;

/// Fee tier information for a pair
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FeeInfo {
    /// Current fee (in percent)
    #[serde(deserialize_with = "deserialize_decimal")]
    pub fee: Decimal,
    /// Minimum fee for pair (if not fixed fee)
    #[serde(deserialize_with = "deserialize_decimal")]
    pub minfee: Decimal,
    /// Maximum fee for pair (if not fixed fee)
    #[serde(deserialize_with = "deserialize_decimal")]
    pub maxfee: Decimal,
    /// Next tier's fee for pair
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub nextfee: Option<Decimal>,
    /// Volume level of current tier
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub tiervolume: Option<Decimal>,
    /// Volume level of next tier
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub nextvolume: Option<Decimal>,
}

/// Result of `TradeVolume`
#[derive(Debug, Clone, Deserialize)]
pub struct TradeVolume {
    /// Fee volume currency
    pub currency: String,
    /// Current 30-day discount volume
    #[serde(deserialize_with = "deserialize_decimal")]
    pub volume: Decimal,
    /// Taker fees per requested pair
    #[serde(default)]
    pub fees: Option<HashMap<String, FeeInfo>>,
    /// Maker fees per requested pair
    #[serde(default)]
    pub fees_maker: Option<HashMap<String, FeeInfo>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_balances() {
        let balances: Balances = serde_json::from_str(
            r#"{"ZUSD": "171288.6158", "XXBT": "0.0000000000", "XETH": "5.2500000000"}"#,
        )
        .unwrap();

        assert_eq!(balances.get("ZUSD"), Some(dec!(171288.6158)));
        assert_eq!(balances.get("DOGE"), None);
        assert_eq!(balances.len(), 3);
        assert_eq!(balances.non_zero().count(), 2);
    }

    #[test]
    fn test_balances_reject_malformed_amount() {
        let err = serde_json::from_str::<Balances>(r#"{"ZUSD": "12,5"}"#).unwrap_err();
        assert!(err.to_string().contains("balance.ZUSD"));
    }

    #[test]
    fn test_trade_balance_bad_number_names_field() {
        let value = serde_json::json!({"eb": "1101.3425", "tb": "abc"});
        let err = crate::decode_value::<TradeBalance>(value).unwrap_err();
        assert_eq!(err.to_string(), "tb: invalid number \"abc\"");
    }

    #[test]
    fn test_trade_balance_without_positions() {
        let balance: TradeBalance =
            serde_json::from_str(r#"{"eb": "1101.3425", "tb": "392.2264", "uv": "0.0000"}"#).unwrap();

        assert_eq!(balance.equivalent_balance, dec!(1101.3425));
        assert_eq!(balance.trade_balance, dec!(392.2264));
        assert_eq!(balance.margin, None);
        assert_eq!(balance.unexecuted_value, Some(dec!(0.0000)));
    }

    #[test]
    fn test_trades_history() {
        let json = r#"{
            "trades": {
                "THVRQM-33VKH-UCI7BS": {
                    "ordertxid": "OQCLML-BW3P3-BUCMWZ",
                    "postxid": "TKH2SE-M7IF5-CFI7LT",
                    "pair": "XXBTZUSD",
                    "time": 1688667796.8802,
                    "type": "buy",
                    "ordertype": "limit",
                    "price": "30010.00000",
                    "cost": "600.20000",
                    "fee": "0.00000",
                    "vol": "0.02000000",
                    "margin": "0.00000",
                    "misc": "",
                    "maker": true
                }
            },
            "count": 2346
        }"#;
        let history: TradesHistoryResponse = serde_json::from_str(json).unwrap();
        let trade = &history.trades["THVRQM-33VKH-UCI7BS"];

        assert_eq!(history.count, 2346);
        assert_eq!(trade.side, OrderSide::Buy);
        assert_eq!(trade.cost, dec!(600.20000));
        assert_eq!(trade.maker, Some(true));
    }

    #[test]
    fn test_ledgers() {
        let json = r#"{
            "ledger": {
                "L4UESK-KG3EQ-UFO4T5": {
                    "refid": "TJKLXX-PGMUI-4NTLXU",
                    "time": 1688464484.1787,
                    "type": "trade",
                    "subtype": "",
                    "aclass": "currency",
                    "asset": "ZGBP",
                    "amount": "-24.5000",
                    "fee": "0.0490",
                    "balance": "459567.9171"
                }
            },
            "count": 1
        }"#;
        let ledgers: LedgersResponse = serde_json::from_str(json).unwrap();
        let entry = &ledgers.ledger["L4UESK-KG3EQ-UFO4T5"];

        assert_eq!(entry.amount, dec!(-24.5000));
        assert_eq!(entry.entry_type, "trade");
        assert_eq!(ledgers.count, Some(1));
    }

    #[test]
    fn test_trade_volume() {
        let json = r#"{
            "currency": "ZUSD",
            "volume": "200709587.4223",
            "fees": {
                "XXBTZUSD": {
                    "fee": "0.1000",
                    "minfee": "0.1000",
                    "maxfee": "0.2600",
                    "nextfee": null,
                    "nextvolume": null,
                    "tiervolume": "10000000.0000"
                }
            }
        }"#;
        let volume: TradeVolume = serde_json::from_str(json).unwrap();
        let fees = volume.fees.unwrap();

        assert_eq!(volume.volume, dec!(200709587.4223));
        assert_eq!(fees["XXBTZUSD"].maxfee, dec!(0.2600));
        assert_eq!(fees["XXBTZUSD"].nextfee, None);
        assert!(volume.fees_maker.is_none());
    }
}
