//! `KrakenRestClient` and its configuration

use crate::endpoints::{AccountEndpoints, FundingEndpoints, MarketEndpoints, TradingEndpoints};
use crate::error::{RestError, RestResult};
use crate::transport::Transport;
use crate::types::OrderRequest;
use kraken_auth::Credentials;
use kraken_types::{
    AddOrderResponse, Balances, CancelOrderResponse, OhlcResponse, OpenOrdersResponse, OrderBook,
    PairMap, ServerTime, TickerInfo,
};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::info;

/// Production REST endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.kraken.com";

/// Whole-request timeout unless configured otherwise
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default `User-Agent` header
const DEFAULT_USER_AGENT: &str = concat!("kraken-rest/", env!("CARGO_PKG_VERSION"));

/// Async client for Kraken's REST API
///
/// Public methods work on any client; private ones need credentials. Cloning is cheap
/// and clones share the connection pool and the credentials' nonce counter.
///
/// # Example
///
/// ```no_run
/// use kraken_rest::{Credentials, KrakenRestClient};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     // Market data needs no key
///     let client = KrakenRestClient::new()?;
///     let tickers = client.get_ticker("XBTUSD").await?;
///     if let Some(ticker) = tickers.get("XXBTZUSD") {
///         println!("last: {}", ticker.last_trade.price);
///     }
///
///     // Account data does
///     let creds = Credentials::from_env()?;
///     let auth_client = KrakenRestClient::with_credentials(creds)?;
///     let balances = auth_client.get_balance().await?;
///     println!("ZUSD: {:?}", balances.get("ZUSD"));
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct KrakenRestClient {
    transport: Transport,
    credentials: Option<Credentials>,
}

impl KrakenRestClient {
    /// Client for public market data only
    pub fn new() -> RestResult<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Client able to call private methods with `credentials`
    pub fn with_credentials(credentials: Credentials) -> RestResult<Self> {
        Self::with_config(ClientConfig::new().with_credentials(credentials))
    }

    /// Client built from an explicit [`ClientConfig`]
    pub fn with_config(config: ClientConfig) -> RestResult<Self> {
        let transport = Transport::new(
            &config.base_url,
            Duration::from_secs(config.timeout_secs),
            config.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT),
        )?;

        info!(
            base_url = transport.base_url(),
            authenticated = config.credentials.is_some(),
            "Created Kraken REST client"
        );

        Ok(Self {
            transport,
            credentials: config.credentials,
        })
    }

    /// Whether private methods can be called
    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    /// Host requests are sent to
    pub fn base_url(&self) -> &str {
        self.transport.base_url()
    }

    fn credentials(&self) -> RestResult<&Credentials> {
        self.credentials.as_ref().ok_or(RestError::AuthRequired)
    }

    // --- generic dispatch ---

    /// Call any public method by name and decode its result
    ///
    /// ```no_run
    /// # async fn example(client: &kraken_rest::KrakenRestClient) -> kraken_rest::RestResult<()> {
    /// let time: kraken_rest::ServerTime = client.query_public("Time", &[]).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn query_public<T: DeserializeOwned>(
        &self,
        method: &str,
        params: &[(&str, &str)],
    ) -> RestResult<T> {
        self.transport.public(method, params).await
    }

    /// Call any private method by name and decode its result
    ///
    /// Fails with [`RestError::AuthRequired`] before any network I/O when the
    /// client has no credentials.
    pub async fn query_private<T: DeserializeOwned>(
        &self,
        method: &str,
        params: &[(&str, &str)],
    ) -> RestResult<T> {
        let credentials = self.credentials()?;
        self.transport.private(credentials, method, params).await
    }

    // --- market data ---

    /// Every public market-data method
    pub fn market(&self) -> MarketEndpoints<'_> {
        MarketEndpoints::new(&self.transport)
    }

    /// Get server time
    pub async fn get_server_time(&self) -> RestResult<ServerTime> {
        self.market().get_server_time().await
    }

    /// Ticker for one pair, keyed by Kraken's normalized name
    pub async fn get_ticker(&self, pair: &str) -> RestResult<PairMap<TickerInfo>> {
        self.market().get_ticker(pair).await
    }

    /// Tickers for several pairs in one request
    pub async fn get_tickers(&self, pairs: &[&str]) -> RestResult<PairMap<TickerInfo>> {
        self.market().get_tickers(pairs).await
    }

    /// Depth snapshot with up to `count` levels per side (1-500)
    pub async fn get_orderbook(
        &self,
        pair: &str,
        count: Option<u16>,
    ) -> RestResult<PairMap<OrderBook>> {
        self.market().get_orderbook(pair, count).await
    }

    /// Get OHLC candles for a trading pair
    pub async fn get_ohlc(&self, pair: &str, interval: Option<u32>) -> RestResult<OhlcResponse> {
        self.market().get_ohlc(pair, interval, None).await
    }

    // --- account (private) ---

    /// Account methods; fails with [`RestError::AuthRequired`] without credentials
    pub fn account(&self) -> RestResult<AccountEndpoints<'_>> {
        Ok(AccountEndpoints::new(&self.transport, self.credentials()?))
    }

    /// Get account balance
    pub async fn get_balance(&self) -> RestResult<Balances> {
        self.account()?.get_balance().await
    }

    /// Get open orders
    pub async fn get_open_orders(&self) -> RestResult<OpenOrdersResponse> {
        self.account()?.get_open_orders(false, None).await
    }

    // --- trading (private) ---

    /// Order placement and cancellation; needs credentials
    pub fn trading(&self) -> RestResult<TradingEndpoints<'_>> {
        Ok(TradingEndpoints::new(&self.transport, self.credentials()?))
    }

    /// Place a new order
    pub async fn add_order(&self, order: &OrderRequest) -> RestResult<AddOrderResponse> {
        self.trading()?.add_order(order).await
    }

    /// Cancel an order by transaction id
    pub async fn cancel_order(&self, txid: &str) -> RestResult<CancelOrderResponse> {
        self.trading()?.cancel_order(txid).await
    }

    /// Cancel every open order on the account
    pub async fn cancel_all_orders(&self) -> RestResult<CancelOrderResponse> {
        self.trading()?.cancel_all_orders().await
    }

    // --- funding (private) ---

    /// Deposits and withdrawals; needs credentials
    pub fn funding(&self) -> RestResult<FundingEndpoints<'_>> {
        Ok(FundingEndpoints::new(&self.transport, self.credentials()?))
    }
}

impl std::fmt::Debug for KrakenRestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KrakenRestClient")
            .field("base_url", &self.transport.base_url())
            .field("has_credentials", &self.has_credentials())
            .finish()
    }
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Key pair for private methods
    pub credentials: Option<Credentials>,
    /// Whole-request timeout, seconds
    pub timeout_secs: u64,
    /// Custom user agent
    pub user_agent: Option<String>,
    /// REST host, without trailing path
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            credentials: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl ClientConfig {
    /// Defaults: production host, 30 s timeout, no credentials
    pub fn new() -> Self {
        Self::default()
    }

    /// Set credentials
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set timeout
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Point the client at another host (a proxy or a local test server)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}
