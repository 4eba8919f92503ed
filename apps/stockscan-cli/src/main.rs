//! # StockScan Entry Point
//!
//! ```text
//! stockscan scan                      interactive scanner console
//! stockscan list [--search Q]         inventory with totals
//! stockscan inc|dec <id>              adjust one item
//! stockscan set-quantity <id> <n>     set one item
//! stockscan remove <id>               delete one item
//! stockscan clear --yes               delete everything
//!
//! global: --backend rest|sqlite, --json
//! ```
//!
//! The setup lives in lib.rs so it can be tested.

use clap::Parser;
use stockscan_cli::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine
    dotenvy::dotenv().ok();

    stockscan_cli::init_tracing();

    stockscan_cli::run(Cli::parse()).await
}
