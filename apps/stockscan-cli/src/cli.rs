//! Command line definition.

use clap::{Parser, Subcommand};

use crate::config::BackendKind;

#[derive(Parser, Debug)]
#[command(
    name = "stockscan",
    version,
    about = "Barcode scanning and inventory for StockScan"
)]
pub struct Cli {
    /// Inventory backend (overrides STOCKSCAN_BACKEND)
    #[arg(long, global = true, value_enum)]
    pub backend: Option<BackendKind>,

    /// Print inventory views as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Interactive scanner console
    Scan,

    /// Show the inventory, newest first
    List {
        /// Only rows whose barcode contains this text
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Increase an item's quantity by one
    Inc { id: String },

    /// Decrease an item's quantity by one (stops at 1)
    Dec { id: String },

    /// Set an item's quantity
    SetQuantity {
        id: String,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },

    /// Delete one item
    Remove { id: String },

    /// Delete every item
    Clear {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}
