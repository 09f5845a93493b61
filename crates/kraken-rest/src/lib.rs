//! REST API client for the Kraken cryptocurrency exchange
//!
//! # Features
//!
//! - **Market Data**: Server time, assets, pairs, ticker, orderbook, OHLC, trades, spreads
//! - **Account**: Balances, orders, trade history, ledgers, fee volume
//! - **Trading**: Place and cancel orders
//! - **Funding**: Deposit methods and addresses, withdrawals
//!
//! Every response is decoded in two stages: the `{"error", "result"}`
//! envelope first, then the result into a typed record from
//! [`kraken_types`]. Exchange-reported errors surface as
//! [`RestError::Api`] with the exchange's error strings.
//!
//! # Authentication
//!
//! Private endpoints require API credentials. Requests are signed with
//! HMAC-SHA512 and carry a strictly increasing nonce per API key.
//!
//! # Example
//!
//! ```no_run
//! use kraken_rest::{Credentials, KrakenRestClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Public endpoints (no auth required)
//!     let client = KrakenRestClient::new()?;
//!     let book = client.get_orderbook("XBTEUR", Some(10)).await?;
//!     if let Some((pair, book)) = book.single() {
//!         println!("{pair}: spread {:?}", book.spread());
//!     }
//!
//!     // Private endpoints (auth required)
//!     let creds = Credentials::from_env()?;
//!     let auth_client = KrakenRestClient::with_credentials(creds)?;
//!     let balance = auth_client.get_balance().await?;
//!     for (asset, amount) in balance.non_zero() {
//!         println!("{asset}: {amount}");
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Rate Limiting
//!
//! Kraken enforces per-key call counters. The client does not throttle or
//! retry; [`RestError::is_rate_limited`] and [`RestError::is_retryable`]
//! tell the caller when backing off is worthwhile.

pub mod client;
pub mod endpoints;
pub mod envelope;
pub mod error;
pub mod transport;
pub mod types;

// Re-export main types
pub use client::{ClientConfig, KrakenRestClient, DEFAULT_BASE_URL};
pub use envelope::{decode_response, ApiResponse};
pub use error::{RestError, RestResult};
pub use kraken_auth::{AuthError, Credentials};
pub use types::OrderRequest;

// Re-export the response records
pub use kraken_types::*;
