//! # StockScan CLI Library
//!
//! Everything behind the `stockscan` binary: configuration, store setup and
//! the two front ends (scanner console, inventory subcommands).
//!
//! ## Module Organization
//! ```text
//! stockscan_cli/
//! ├── lib.rs          ◄─── You are here (startup & dispatch)
//! ├── cli.rs          ◄─── clap definition
//! ├── config.rs       ◄─── Environment configuration
//! ├── analyzer.rs     ◄─── AI stubs (name, frame)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── session.rs  ◄─── Scan session behind a mutex
//! │   └── store.rs    ◄─── Inventory store handle
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── scanner.rs  ◄─── Scan list commands
//! │   └── inventory.rs◄─── Inventory commands
//! ├── repl.rs         ◄─── Scanner console loop
//! ├── render.rs       ◄─── Text output
//! └── error.rs        ◄─── AppError for commands
//! ```

pub mod analyzer;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod render;
pub mod repl;
pub mod state;

use std::fmt::Display;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::bail;
use directories::ProjectDirs;
use serde::Serialize;
use stockscan_store::migrations::migration_status;
use stockscan_store::{Database, DbConfig, InventoryStore, RestBackend};
use tokio::io::BufReader;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use analyzer::Analyzer;
use cli::{Cli, Command};
use commands::inventory;
use config::{AppConfig, BackendKind, ConfigError, ENV_STORE_URL};
use error::AppError;
use repl::Console;
use state::StoreState;

/// Runs one invocation of the CLI.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Load Configuration ───────────────────────────────────────────────► │
/// │     • environment (+ .env, merged by main)                              │
/// │     • --backend overrides STOCKSCAN_BACKEND                             │
/// │     • rest without URL/key: fatal                                       │
/// │                                                                         │
/// │  2. Open Inventory Store ─────────────────────────────────────────────► │
/// │     • rest: PostgREST client                                            │
/// │     • sqlite: pool + migrations                                         │
/// │                                                                         │
/// │  3. Dispatch ─────────────────────────────────────────────────────────► │
/// │     • scan: console on stdin/stdout                                     │
/// │     • everything else: one inventory command, then exit                 │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = AppConfig::load(cli.backend)?;
    info!(backend = ?config.backend, "Configuration loaded");

    let store = StoreState::new(open_store(&config).await?);

    match cli.command {
        Command::Scan => {
            let console = Console::new(store, Analyzer::from_config(&config));
            console
                .run(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
                .await?;
        }
        Command::List { search } => {
            let view = inventory::load_inventory(&store, search.as_deref()).await?;
            print_view(&view, cli.json)?;
        }
        Command::Inc { id } => {
            let view = inventory::increment_item(&store, &id).await?;
            print_view(&view, cli.json)?;
        }
        Command::Dec { id } => {
            let view = inventory::decrement_item(&store, &id).await?;
            print_view(&view, cli.json)?;
        }
        Command::SetQuantity { id, quantity } => {
            let view = inventory::set_item_quantity(&store, &id, quantity).await?;
            print_view(&view, cli.json)?;
        }
        Command::Remove { id } => {
            let view = inventory::remove_item(&store, &id).await?;
            print_view(&view, cli.json)?;
        }
        Command::Clear { yes } => {
            if !yes {
                bail!("Refusing to delete every inventory item without --yes");
            }
            let view = inventory::clear_inventory(&store).await;
            print_view(&view, cli.json)?;
        }
    }

    Ok(())
}

/// Opens the configured inventory backend.
pub async fn open_store(config: &AppConfig) -> Result<InventoryStore, AppError> {
    match config.backend {
        BackendKind::Rest => {
            let remote = config
                .remote
                .as_ref()
                .ok_or_else(|| ConfigError::MissingRequired(ENV_STORE_URL.to_string()))?;

            info!(url = %remote.url, "Using hosted inventory store");
            let backend = RestBackend::new(&remote.url, remote.key.clone());
            Ok(InventoryStore::new(Arc::new(backend)))
        }
        BackendKind::Sqlite => {
            let path = match &config.db_path {
                Some(path) => path.clone(),
                None => default_database_path()?,
            };

            let db = Database::new(DbConfig::new(path)).await?;
            if !db.health_check().await {
                warn!("Local database did not answer the health check");
            }

            let (known, applied) = migration_status(db.pool()).await?;
            debug!(known, applied, "Local schema ready");

            Ok(InventoryStore::new(Arc::new(db.backend())))
        }
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so console and list output stay clean on stdout.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=stockscan=trace` - Trace for stockscan crates only
/// - Default: `info,stockscan=debug,sqlx=warn`
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,stockscan=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Location of the SQLite file when `STOCKSCAN_DB_PATH` is not set.
///
/// ## Platform-Specific Paths
/// - **macOS**: `~/Library/Application Support/com.stockscan.stockscan/stockscan.db`
/// - **Windows**: `%APPDATA%\stockscan\stockscan\data\stockscan.db`
/// - **Linux**: `~/.local/share/stockscan/stockscan.db`
fn default_database_path() -> Result<PathBuf, AppError> {
    let dirs = ProjectDirs::from("com", "stockscan", "stockscan").ok_or(ConfigError::NoDataDir)?;
    let data_dir = dirs.data_dir();

    std::fs::create_dir_all(data_dir).map_err(|e| {
        AppError::internal(format!("Could not create {}: {}", data_dir.display(), e))
    })?;

    Ok(data_dir.join("stockscan.db"))
}

fn print_view<T: Serialize + Display>(view: &T, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(view)?);
    } else {
        print!("{view}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn sqlite_config(path: PathBuf) -> AppConfig {
        AppConfig {
            backend: BackendKind::Sqlite,
            remote: None,
            db_path: Some(path),
            name_delay: Duration::ZERO,
            frame_delay: Duration::ZERO,
        }
    }

    #[tokio::test]
    async fn test_open_sqlite_store_at_configured_path() {
        let path = std::env::temp_dir().join(format!("stockscan-test-{}.db", std::process::id()));
        let _ = std::fs::remove_file(&path);

        let store = open_store(&sqlite_config(path.clone())).await.unwrap();

        assert_eq!(store.backend_name(), "sqlite");
        assert!(store.list().await.unwrap().is_empty());
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_rest_without_remote_is_config_error() {
        let config = AppConfig {
            backend: BackendKind::Rest,
            ..sqlite_config(PathBuf::from("unused.db"))
        };

        let err = open_store(&config).await.unwrap_err();
        assert_eq!(err.code, error::ErrorCode::ConfigError);
    }
}
