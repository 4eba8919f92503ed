//! # Application Configuration
//!
//! Loaded once at startup from the process environment (after `.env` has
//! been merged in by `dotenvy`).
//!
//! ## Environment Variables
//! ```text
//! ┌─────────────────────────────┬──────────┬───────────────────────────────┐
//! │ Variable                    │ Default  │ Notes                         │
//! ├─────────────────────────────┼──────────┼───────────────────────────────┤
//! │ STOCKSCAN_BACKEND           │ rest     │ rest | sqlite                 │
//! │ STOCKSCAN_STORE_URL         │    -     │ required for rest             │
//! │ STOCKSCAN_STORE_KEY         │    -     │ required for rest             │
//! │ STOCKSCAN_DB_PATH           │ data dir │ sqlite file location          │
//! │ STOCKSCAN_NAME_DELAY_MS     │ 800      │ product name stub latency     │
//! │ STOCKSCAN_FRAME_DELAY_MS    │ 1500     │ frame analysis stub latency   │
//! └─────────────────────────────┴──────────┴───────────────────────────────┘
//! ```
//!
//! A missing store URL or key is fatal for the rest backend.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use clap::ValueEnum;

pub const ENV_BACKEND: &str = "STOCKSCAN_BACKEND";
pub const ENV_STORE_URL: &str = "STOCKSCAN_STORE_URL";
pub const ENV_STORE_KEY: &str = "STOCKSCAN_STORE_KEY";
pub const ENV_DB_PATH: &str = "STOCKSCAN_DB_PATH";
pub const ENV_NAME_DELAY_MS: &str = "STOCKSCAN_NAME_DELAY_MS";
pub const ENV_FRAME_DELAY_MS: &str = "STOCKSCAN_FRAME_DELAY_MS";

const DEFAULT_NAME_DELAY_MS: u64 = 800;
const DEFAULT_FRAME_DELAY_MS: u64 = 1500;

/// Which inventory backend to open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum BackendKind {
    /// Hosted table over PostgREST.
    #[default]
    Rest,
    /// Local SQLite file.
    Sqlite,
}

impl FromStr for BackendKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rest" => Ok(BackendKind::Rest),
            "sqlite" => Ok(BackendKind::Sqlite),
            _ => Err(ConfigError::InvalidValue(ENV_BACKEND.to_string())),
        }
    }
}

/// Connection details for the hosted store.
#[derive(Clone)]
pub struct RemoteConfig {
    pub url: String,
    pub key: String,
}

impl std::fmt::Debug for RemoteConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteConfig")
            .field("url", &self.url)
            .field("key", &"<redacted>")
            .finish()
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub backend: BackendKind,

    /// Present whenever both URL and key are set; required for `Rest`.
    pub remote: Option<RemoteConfig>,

    /// SQLite file override. `None` means the platform data directory.
    pub db_path: Option<PathBuf>,

    pub name_delay: Duration,
    pub frame_delay: Duration,
}

impl AppConfig {
    /// Loads configuration from the process environment.
    ///
    /// `backend_override` (the `--backend` flag) wins over
    /// `STOCKSCAN_BACKEND`.
    pub fn load(backend_override: Option<BackendKind>) -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok(), backend_override)
    }

    /// Loads configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(
        lookup: F,
        backend_override: Option<BackendKind>,
    ) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Blank values count as unset
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let backend = match backend_override {
            Some(kind) => kind,
            None => var(ENV_BACKEND)
                .map(|v| v.parse::<BackendKind>())
                .transpose()?
                .unwrap_or_default(),
        };

        let remote = match (var(ENV_STORE_URL), var(ENV_STORE_KEY)) {
            (Some(url), Some(key)) => Some(RemoteConfig { url, key }),
            (None, _) if backend == BackendKind::Rest => {
                return Err(ConfigError::MissingRequired(ENV_STORE_URL.to_string()))
            }
            (_, None) if backend == BackendKind::Rest => {
                return Err(ConfigError::MissingRequired(ENV_STORE_KEY.to_string()))
            }
            _ => None,
        };

        let millis = |name: &str, default: u64| -> Result<Duration, ConfigError> {
            match var(name) {
                Some(raw) => raw
                    .trim()
                    .parse::<u64>()
                    .map(Duration::from_millis)
                    .map_err(|_| ConfigError::InvalidValue(name.to_string())),
                None => Ok(Duration::from_millis(default)),
            }
        };

        Ok(AppConfig {
            backend,
            remote,
            db_path: var(ENV_DB_PATH).map(PathBuf::from),
            name_delay: millis(ENV_NAME_DELAY_MS, DEFAULT_NAME_DELAY_MS)?,
            frame_delay: millis(ENV_FRAME_DELAY_MS, DEFAULT_FRAME_DELAY_MS)?,
        })
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    #[error("Could not determine the application data directory")]
    NoDataDir,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_rest_defaults() {
        let config = AppConfig::from_lookup(
            lookup(&[
                (ENV_STORE_URL, "https://abc.supabase.co"),
                (ENV_STORE_KEY, "anon"),
            ]),
            None,
        )
        .unwrap();

        assert_eq!(config.backend, BackendKind::Rest);
        assert_eq!(config.remote.unwrap().url, "https://abc.supabase.co");
        assert_eq!(config.name_delay, Duration::from_millis(800));
        assert_eq!(config.frame_delay, Duration::from_millis(1500));
        assert!(config.db_path.is_none());
    }

    #[test]
    fn test_rest_requires_url_and_key() {
        let err = AppConfig::from_lookup(lookup(&[(ENV_STORE_KEY, "anon")]), None).unwrap_err();
        assert!(matches!(err, ConfigError::MissingRequired(ref v) if v == ENV_STORE_URL));

        let err = AppConfig::from_lookup(
            lookup(&[(ENV_STORE_URL, "https://abc.supabase.co"), (ENV_STORE_KEY, "  ")]),
            None,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::MissingRequired(ref v) if v == ENV_STORE_KEY));
    }

    #[test]
    fn test_sqlite_needs_no_remote() {
        let config = AppConfig::from_lookup(
            lookup(&[(ENV_BACKEND, "SQLite"), (ENV_DB_PATH, "/tmp/stock.db")]),
            None,
        )
        .unwrap();

        assert_eq!(config.backend, BackendKind::Sqlite);
        assert!(config.remote.is_none());
        assert_eq!(config.db_path, Some(PathBuf::from("/tmp/stock.db")));
    }

    #[test]
    fn test_flag_overrides_env_backend() {
        let config = AppConfig::from_lookup(
            lookup(&[(ENV_BACKEND, "rest")]),
            Some(BackendKind::Sqlite),
        )
        .unwrap();

        assert_eq!(config.backend, BackendKind::Sqlite);
    }

    #[test]
    fn test_invalid_values() {
        let err = AppConfig::from_lookup(lookup(&[(ENV_BACKEND, "mongo")]), None).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(ref v) if v == ENV_BACKEND));

        let err = AppConfig::from_lookup(
            lookup(&[(ENV_NAME_DELAY_MS, "soon")]),
            Some(BackendKind::Sqlite),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(ref v) if v == ENV_NAME_DELAY_MS));
    }

    #[test]
    fn test_custom_delays() {
        let config = AppConfig::from_lookup(
            lookup(&[(ENV_NAME_DELAY_MS, "0"), (ENV_FRAME_DELAY_MS, "25")]),
            Some(BackendKind::Sqlite),
        )
        .unwrap();

        assert_eq!(config.name_delay, Duration::ZERO);
        assert_eq!(config.frame_delay, Duration::from_millis(25));
    }

    #[test]
    fn test_debug_redacts_key() {
        let remote = RemoteConfig {
            url: "https://abc.supabase.co".to_string(),
            key: "very-secret".to_string(),
        };
        assert!(!format!("{remote:?}").contains("very-secret"));
    }
}
