//! Demo: Account Balances
//!
//! Reads credentials from `KRAKEN_API_KEY` / `KRAKEN_PRIVATE_KEY` and prints
//! non-zero balances, trade balance and open orders.
//!
//! Run: cargo run --bin account_balances

use colored::*;
use kraken_rest::{Credentials, KrakenRestClient, RestError};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let credentials = Credentials::from_env()?;
    let client = KrakenRestClient::with_credentials(credentials)?;

    println!("{}", "═".repeat(60).cyan());
    println!("{}", "  ACCOUNT BALANCES".cyan().bold());
    println!("{}", "═".repeat(60).cyan());

    let balances = match client.get_balance().await {
        Ok(balances) => balances,
        Err(err @ RestError::Api { .. }) => {
            println!("{} {}", "✗".red(), err);
            if err.is_rate_limited() {
                println!("  {}", "rate limited, try again later".dimmed());
            }
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    let mut assets: Vec<_> = balances.non_zero().collect();
    assets.sort_by_key(|(asset, _)| *asset);
    for (asset, amount) in assets {
        println!("  {:<10} {}", asset.yellow(), amount);
    }

    let account = client.account()?;
    let trade_balance = account.get_trade_balance(Some("ZUSD")).await?;
    println!();
    println!(
        "  {} {}  {} {}",
        "Equivalent balance:".dimmed(),
        trade_balance.equivalent_balance,
        "Trade balance:".dimmed(),
        trade_balance.trade_balance
    );

    let open = client.get_open_orders().await?;
    println!("\n  {} open order(s)", open.open.len());
    for (txid, order) in &open.open {
        println!(
            "  {} {} {} @ {} (filled {})",
            txid.dimmed(),
            order.descr.side,
            order.vol,
            order.descr.price,
            order.vol_exec
        );
    }

    Ok(())
}
