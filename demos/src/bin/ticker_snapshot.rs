//! Demo: Ticker Snapshot
//!
//! Fetches tickers for a few pairs in one call and prints quote, spread
//! and daily change.
//!
//! Run: cargo run --bin ticker_snapshot

use colored::*;
use kraken_rest::KrakenRestClient;
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

const PAIRS: [&str; 3] = ["XBTUSD", "ETHUSD", "SOLUSD"];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("{}", "═".repeat(60).cyan());
    println!("{}", "  TICKER SNAPSHOT".cyan().bold());
    println!("{}", "═".repeat(60).cyan());
    println!();

    let client = KrakenRestClient::new()?;
    let tickers = client.get_tickers(&PAIRS).await?;

    let mut pairs: Vec<_> = tickers.iter().collect();
    pairs.sort_by_key(|(pair, _)| *pair);

    for (pair, ticker) in pairs {
        let change = ticker.change_since_open().unwrap_or_default() * Decimal::from(100);
        let change = if change.is_sign_negative() {
            format!("{:.2}%", change).red()
        } else {
            format!("+{:.2}%", change).green()
        };

        println!("  {}", pair.yellow().bold());
        println!(
            "    {} {}  {} {}  {} {}",
            "Bid:".dimmed(),
            ticker.bid.price,
            "Ask:".dimmed(),
            ticker.ask.price,
            "Last:".dimmed(),
            ticker.last_trade.price
        );
        println!(
            "    {} {:.2} bps  {} {}  {} {}",
            "Spread:".dimmed(),
            ticker.spread_bps().unwrap_or_default(),
            "24h volume:".dimmed(),
            ticker.volume.last_24h,
            "Today:".dimmed(),
            change
        );
        println!();
    }

    Ok(())
}
