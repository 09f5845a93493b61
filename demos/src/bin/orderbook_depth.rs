//! Demo: Orderbook Depth
//!
//! Fetches a depth snapshot and draws cumulative volume per side.
//!
//! Run: cargo run --bin orderbook_depth -- [PAIR] [COUNT]

use colored::*;
use kraken_rest::{BookLevel, KrakenRestClient};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

const BAR_WIDTH: f64 = 40.0;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let pair = args.next().unwrap_or_else(|| "XBTUSD".to_string());
    let count: u16 = match args.next() {
        Some(count) => count.parse()?,
        None => 10,
    };

    let client = KrakenRestClient::new()?;
    let books = client.get_orderbook(&pair, Some(count)).await?;
    let (name, book) = books
        .single()
        .ok_or("expected exactly one pair in the response")?;

    println!("{}", "═".repeat(60).cyan());
    println!("{}", format!("  DEPTH: {}", name).cyan().bold());
    println!("{}", "═".repeat(60).cyan());

    let total = |levels: &[BookLevel]| levels.iter().map(|l| l.volume).sum::<Decimal>();
    let max = total(&book.asks).max(total(&book.bids));

    let mut cumulative = Decimal::ZERO;
    let asks: Vec<_> = book
        .asks
        .iter()
        .map(|level| {
            cumulative += level.volume;
            (level, cumulative)
        })
        .collect();
    for (level, cumulative) in asks.iter().rev() {
        println!(
            "  {:>14} {:>12} {}",
            level.price.to_string().red(),
            level.volume,
            bar(*cumulative, max).red()
        );
    }

    match (book.spread(), book.mid_price()) {
        (Some(spread), Some(mid)) => println!(
            "  {} {}  {} {}",
            "spread".dimmed(),
            spread,
            "mid".dimmed(),
            mid
        ),
        _ => println!("  {}", "one side of the book is empty".dimmed()),
    }

    let mut cumulative = Decimal::ZERO;
    for level in &book.bids {
        cumulative += level.volume;
        println!(
            "  {:>14} {:>12} {}",
            level.price.to_string().green(),
            level.volume,
            bar(cumulative, max).green()
        );
    }

    Ok(())
}

fn bar(volume: Decimal, max: Decimal) -> String {
    if max.is_zero() {
        return String::new();
    }
    let ratio = (volume / max).to_f64().unwrap_or(0.0);
    "█".repeat((ratio * BAR_WIDTH).round() as usize)
}
