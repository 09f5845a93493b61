//! Public market data endpoints
//!
//! These endpoints don't require authentication.

use super::{join_required, Params};
use crate::error::{RestError, RestResult};
use crate::transport::Transport;
use kraken_types::{
    AssetInfo, AssetPairInfo, OhlcResponse, OrderBook, PairMap, ServerTime, SpreadResponse,
    SystemStatus, TickerInfo, TradesResponse,
};
use tracing::{debug, instrument};

/// Candle widths accepted by `OHLC`, in minutes
pub const OHLC_INTERVALS: [u32; 9] = [1, 5, 15, 30, 60, 240, 1440, 10080, 21600];

/// Largest `count` accepted by `Depth`
pub const MAX_DEPTH: u16 = 500;

/// Largest `count` accepted by `Trades`
pub const MAX_TRADES: u16 = 1000;

/// Public market data endpoints
#[derive(Debug, Clone, Copy)]
pub struct MarketEndpoints<'a> {
    transport: &'a Transport,
}

impl<'a> MarketEndpoints<'a> {
    pub fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    /// Get server time
    #[instrument(skip(self))]
    pub async fn get_server_time(&self) -> RestResult<ServerTime> {
        self.transport.public("Time", &[]).await
    }

    /// Get system status
    #[instrument(skip(self))]
    pub async fn get_system_status(&self) -> RestResult<SystemStatus> {
        self.transport.public("SystemStatus", &[]).await
    }

    /// Get asset info
    ///
    /// # Arguments
    /// * `assets` - Assets to get info for (e.g. `["XBT", "ETH"]`), or all
    #[instrument(skip(self))]
    pub async fn get_assets(&self, assets: Option<&[&str]>) -> RestResult<PairMap<AssetInfo>> {
        let assets = assets.map(|a| join_required("asset", a)).transpose()?;
        let params = Params::new().push_opt("asset", assets);
        self.transport.public("Assets", &params.as_pairs()).await
    }

    /// Get tradable asset pairs
    ///
    /// # Arguments
    /// * `pairs` - Pairs to get info for (e.g. `["XBTUSD", "ETHUSD"]`), or all
    #[instrument(skip(self))]
    pub async fn get_asset_pairs(
        &self,
        pairs: Option<&[&str]>,
    ) -> RestResult<PairMap<AssetPairInfo>> {
        let pairs = pairs.map(|p| join_required("pair", p)).transpose()?;
        let params = Params::new().push_opt("pair", pairs);
        self.transport.public("AssetPairs", &params.as_pairs()).await
    }

    /// Get ticker information
    ///
    /// The result is keyed by Kraken's normalized pair name, which may differ
    /// from the name requested ("XBTUSD" comes back as "XXBTZUSD").
    #[instrument(skip(self))]
    pub async fn get_ticker(&self, pair: &str) -> RestResult<PairMap<TickerInfo>> {
        self.get_tickers(&[pair]).await
    }

    /// Get ticker information for multiple pairs
    #[instrument(skip(self))]
    pub async fn get_tickers(&self, pairs: &[&str]) -> RestResult<PairMap<TickerInfo>> {
        let params = Params::new().push("pair", join_required("pair", pairs)?);
        debug!("Fetching tickers for {} pairs", pairs.len());
        self.transport.public("Ticker", &params.as_pairs()).await
    }

    /// Get orderbook depth
    ///
    /// # Arguments
    /// * `pair` - Trading pair (e.g. "XBTUSD")
    /// * `count` - Maximum number of asks/bids (1-500)
    #[instrument(skip(self))]
    pub async fn get_orderbook(
        &self,
        pair: &str,
        count: Option<u16>,
    ) -> RestResult<PairMap<OrderBook>> {
        check_count("depth", count, MAX_DEPTH)?;

        let params = Params::new()
            .push("pair", join_required("pair", &[pair])?)
            .push_opt("count", count);
        self.transport.public("Depth", &params.as_pairs()).await
    }

    /// Get OHLC candles
    ///
    /// # Arguments
    /// * `pair` - Trading pair (e.g. "XBTUSD")
    /// * `interval` - Candle width in minutes, one of [`OHLC_INTERVALS`]
    /// * `since` - Return candles after this cursor (the previous `last`)
    #[instrument(skip(self))]
    pub async fn get_ohlc(
        &self,
        pair: &str,
        interval: Option<u32>,
        since: Option<i64>,
    ) -> RestResult<OhlcResponse> {
        if let Some(interval) = interval {
            if !OHLC_INTERVALS.contains(&interval) {
                return Err(RestError::InvalidParameter(format!(
                    "unsupported OHLC interval {}",
                    interval
                )));
            }
        }

        let params = Params::new()
            .push("pair", join_required("pair", &[pair])?)
            .push_opt("interval", interval)
            .push_opt("since", since);
        self.transport.public("OHLC", &params.as_pairs()).await
    }

    /// Get recent trades
    ///
    /// # Arguments
    /// * `pair` - Trading pair (e.g. "XBTUSD")
    /// * `since` - Return trades after this cursor (the previous `last`)
    /// * `count` - Number of trades to return (1-1000), rejected outside that range
    #[instrument(skip(self))]
    pub async fn get_recent_trades(
        &self,
        pair: &str,
        since: Option<&str>,
        count: Option<u16>,
    ) -> RestResult<TradesResponse> {
        check_count("trade", count, MAX_TRADES)?;

        let params = Params::new()
            .push("pair", join_required("pair", &[pair])?)
            .push_opt("since", since)
            .push_opt("count", count);
        self.transport.public("Trades", &params.as_pairs()).await
    }

    /// Get recent spread data
    ///
    /// # Arguments
    /// * `pair` - Trading pair (e.g. "XBTUSD")
    /// * `since` - Return spreads after this cursor (the previous `last`)
    #[instrument(skip(self))]
    pub async fn get_recent_spreads(
        &self,
        pair: &str,
        since: Option<&str>,
    ) -> RestResult<SpreadResponse> {
        let params = Params::new()
            .push("pair", join_required("pair", &[pair])?)
            .push_opt("since", since);
        self.transport.public("Spread", &params.as_pairs()).await
    }
}

fn check_count(what: &str, count: Option<u16>, max: u16) -> RestResult<()> {
    match count {
        Some(count) if count == 0 || count > max => Err(RestError::InvalidParameter(format!(
            "{} count must be between 1 and {}, got {}",
            what, max, count
        ))),
        _ => Ok(()),
    }
}
