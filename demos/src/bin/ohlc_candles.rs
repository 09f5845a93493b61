//! Demo: OHLC Candles
//!
//! Fetches hourly candles and prints the most recent ones, then polls once
//! more using the returned `last` cursor.
//!
//! Run: cargo run --bin ohlc_candles -- [PAIR]

use colored::*;
use kraken_rest::KrakenRestClient;
use tracing::info;
use tracing_subscriber::EnvFilter;

const INTERVAL_MINUTES: u32 = 60;
const SHOWN: usize = 12;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let pair = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "XBTUSD".to_string());

    let client = KrakenRestClient::new()?;
    let ohlc = client.get_ohlc(&pair, Some(INTERVAL_MINUTES)).await?;

    println!("{}", "═".repeat(72).cyan());
    println!(
        "{}",
        format!("  {} {}m CANDLES", ohlc.pair, INTERVAL_MINUTES)
            .cyan()
            .bold()
    );
    println!("{}", "═".repeat(72).cyan());
    println!(
        "  {:<17} {:>11} {:>11} {:>11} {:>11} {:>8}",
        "time", "open", "high", "low", "close", "trades"
    );

    let skip = ohlc.candles.len().saturating_sub(SHOWN);
    for candle in ohlc.candles.iter().skip(skip) {
        let close = if candle.is_bullish() {
            candle.close.to_string().green()
        } else {
            candle.close.to_string().red()
        };
        println!(
            "  {:<17} {:>11} {:>11} {:>11} {:>11} {:>8}",
            candle.time.format("%Y-%m-%d %H:%M").to_string(),
            candle.open,
            candle.high,
            candle.low,
            close,
            candle.count
        );
    }

    // Incremental poll from the cursor
    let update = client
        .market()
        .get_ohlc(&pair, Some(INTERVAL_MINUTES), Some(ohlc.last))
        .await?;
    info!(candles = update.candles.len(), last = update.last, "Polled since cursor");
    println!(
        "\n  {} {} candle(s) since {}",
        "✓".green(),
        update.candles.len(),
        ohlc.last
    );

    Ok(())
}
