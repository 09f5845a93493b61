//! Private account endpoints
//!
//! These endpoints require authentication.

use super::{join_required, Params};
use crate::error::RestResult;
use crate::transport::Transport;
use kraken_auth::Credentials;
use kraken_types::{
    Balances, ClosedOrdersResponse, LedgersResponse, OpenOrdersResponse, QueryLedgersResponse,
    QueryOrdersResponse, TradeBalance, TradeVolume, TradesHistoryResponse,
};
use tracing::instrument;

/// Time window and offset for paginated history queries
///
/// `start` and `end` are unix timestamps or transaction ids, exclusive.
#[derive(Debug, Clone, Default)]
pub struct HistoryRange {
    /// Starting timestamp or id
    pub start: Option<String>,
    /// Ending timestamp or id
    pub end: Option<String>,
    /// Result offset for pagination
    pub ofs: Option<u32>,
}

impl HistoryRange {
    /// Unbounded range
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the exclusive start
    pub fn since(mut self, start: impl ToString) -> Self {
        self.start = Some(start.to_string());
        self
    }

    /// Set the exclusive end
    pub fn until(mut self, end: impl ToString) -> Self {
        self.end = Some(end.to_string());
        self
    }

    /// Set the pagination offset
    pub fn offset(mut self, ofs: u32) -> Self {
        self.ofs = Some(ofs);
        self
    }

    fn apply(&self, params: Params) -> Params {
        params
            .push_opt("start", self.start.as_deref())
            .push_opt("end", self.end.as_deref())
            .push_opt("ofs", self.ofs)
    }
}

/// Private account endpoints
#[derive(Debug, Clone, Copy)]
pub struct AccountEndpoints<'a> {
    transport: &'a Transport,
    credentials: &'a Credentials,
}

impl<'a> AccountEndpoints<'a> {
    pub fn new(transport: &'a Transport, credentials: &'a Credentials) -> Self {
        Self {
            transport,
            credentials,
        }
    }

    async fn post<T: serde::de::DeserializeOwned>(
        &self,
        method: &str,
        params: Params,
    ) -> RestResult<T> {
        self.transport
            .private(self.credentials, method, &params.as_pairs())
            .await
    }

    /// Get account balance for every asset
    #[instrument(skip(self))]
    pub async fn get_balance(&self) -> RestResult<Balances> {
        self.post("Balance", Params::new()).await
    }

    /// Get trade balance (margin info)
    ///
    /// # Arguments
    /// * `asset` - Base asset for calculations (Kraken defaults to "ZUSD")
    #[instrument(skip(self))]
    pub async fn get_trade_balance(&self, asset: Option<&str>) -> RestResult<TradeBalance> {
        self.post("TradeBalance", Params::new().push_opt("asset", asset))
            .await
    }

    /// Get open orders
    ///
    /// # Arguments
    /// * `trades` - Include related trade ids
    /// * `userref` - Restrict to a user reference id
    #[instrument(skip(self))]
    pub async fn get_open_orders(
        &self,
        trades: bool,
        userref: Option<i32>,
    ) -> RestResult<OpenOrdersResponse> {
        let params = Params::new()
            .flag("trades", trades)
            .push_opt("userref", userref);
        self.post("OpenOrders", params).await
    }

    /// Get closed orders (50 per page)
    #[instrument(skip(self))]
    pub async fn get_closed_orders(
        &self,
        trades: bool,
        range: &HistoryRange,
    ) -> RestResult<ClosedOrdersResponse> {
        let params = range.apply(Params::new().flag("trades", trades));
        self.post("ClosedOrders", params).await
    }

    /// Query orders by transaction id (up to 50)
    #[instrument(skip(self))]
    pub async fn query_orders(
        &self,
        txids: &[&str],
        trades: bool,
    ) -> RestResult<QueryOrdersResponse> {
        let params = Params::new()
            .push("txid", join_required("txid", txids)?)
            .flag("trades", trades);
        self.post("QueryOrders", params).await
    }

    /// Get trade history (50 per page, most recent first)
    #[instrument(skip(self))]
    pub async fn get_trades_history(
        &self,
        range: &HistoryRange,
    ) -> RestResult<TradesHistoryResponse> {
        self.post("TradesHistory", range.apply(Params::new())).await
    }

    /// Get ledger entries (50 per page)
    ///
    /// # Arguments
    /// * `assets` - Restrict to these assets, or all
    /// * `range` - Time window and offset
    #[instrument(skip(self))]
    pub async fn get_ledgers(
        &self,
        assets: Option<&[&str]>,
        range: &HistoryRange,
    ) -> RestResult<LedgersResponse> {
        let params = Params::new().push_opt("asset", assets.map(|a| a.join(",")));
        self.post("Ledgers", range.apply(params)).await
    }

    /// Query ledger entries by id (up to 20)
    #[instrument(skip(self))]
    pub async fn query_ledgers(&self, ids: &[&str]) -> RestResult<QueryLedgersResponse> {
        let params = Params::new().push("id", join_required("id", ids)?);
        self.post("QueryLedgers", params).await
    }

    /// Get 30-day trade volume and, for the given pairs, the fee tiers
    #[instrument(skip(self))]
    pub async fn get_trade_volume(&self, pairs: Option<&[&str]>) -> RestResult<TradeVolume> {
        let params = Params::new().push_opt("pair", pairs.map(|p| p.join(",")));
        self.post("TradeVolume", params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_range_params() {
        let range = HistoryRange::new().since(1688000000).offset(50);
        let params = range.apply(Params::new().flag("trades", true));

        assert_eq!(
            params.as_pairs(),
            vec![("trades", "true"), ("start", "1688000000"), ("ofs", "50")]
        );
    }
}
