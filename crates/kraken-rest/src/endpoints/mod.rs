//! API endpoint implementations

pub mod account;
pub mod funding;
pub mod market;
pub mod trading;

pub use account::AccountEndpoints;
pub use funding::FundingEndpoints;
pub use market::MarketEndpoints;
pub use trading::TradingEndpoints;

use std::fmt::Display;

/// Owned request parameters, in insertion order
#[derive(Debug, Default, Clone)]
pub(crate) struct Params(Vec<(&'static str, String)>);

impl Params {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(mut self, key: &'static str, value: impl Display) -> Self {
        self.0.push((key, value.to_string()));
        self
    }

    pub(crate) fn push_opt(self, key: &'static str, value: Option<impl Display>) -> Self {
        match value {
            Some(value) => self.push(key, value),
            None => self,
        }
    }

    /// Add `key=true` only when the flag is set
    pub(crate) fn flag(self, key: &'static str, set: bool) -> Self {
        if set {
            self.push(key, true)
        } else {
            self
        }
    }

    pub(crate) fn as_pairs(&self) -> Vec<(&str, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str())).collect()
    }
}

/// Comma-joined list, rejecting an empty one
pub(crate) fn join_required(name: &str, values: &[&str]) -> crate::error::RestResult<String> {
    if values.is_empty() || values.iter().any(|v| v.is_empty()) {
        return Err(crate::error::RestError::InvalidParameter(format!(
            "{} must not be empty",
            name
        )));
    }
    Ok(values.join(","))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_order_and_optionals() {
        let params = Params::new()
            .push("pair", "XBTUSD")
            .push_opt("since", None::<i64>)
            .push_opt("count", Some(10))
            .flag("trades", true)
            .flag("validate", false);

        assert_eq!(
            params.as_pairs(),
            vec![("pair", "XBTUSD"), ("count", "10"), ("trades", "true")]
        );
    }

    #[test]
    fn test_join_required() {
        assert_eq!(join_required("pair", &["XBTUSD", "ETHUSD"]).unwrap(), "XBTUSD,ETHUSD");
        assert!(join_required("pair", &[]).is_err());
        assert!(join_required("txid", &[""]).is_err());
    }
}
