use std::path::PathBuf;

use anidex_db::{IdStrategy, StoreOptions, WriteStrategy};

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Directory holding one JSON file per entity kind (default: `data`).
    pub data_dir: PathBuf,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Write coordination and id assignment for every collection.
    pub store: StoreOptions,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                 |
    /// |------------------------|-------------------------|
    /// | `HOST`                 | `0.0.0.0`               |
    /// | `PORT`                 | `3000`                  |
    /// | `DATA_DIR`             | `data`                  |
    /// | `CORS_ORIGINS`         | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                    |
    /// | `WRITE_STRATEGY`       | `unguarded`             |
    /// | `WRITE_MAX_RETRIES`    | `3`                     |
    /// | `ID_STRATEGY`          | `count`                 |
    ///
    /// Panics on unparseable values so misconfiguration fails at startup.
    pub fn from_env() -> Self {
        Self::from_source(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an arbitrary variable lookup.
    pub fn from_source(var: impl Fn(&str) -> Option<String>) -> Self {
        let host = var("HOST").unwrap_or_else(|| "0.0.0.0".into());

        let port: u16 = var("PORT")
            .unwrap_or_else(|| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let data_dir = PathBuf::from(var("DATA_DIR").unwrap_or_else(|| "data".into()));

        let cors_origins: Vec<String> = var("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let max_retries: u32 = var("WRITE_MAX_RETRIES")
            .unwrap_or_else(|| "3".into())
            .parse()
            .expect("WRITE_MAX_RETRIES must be a valid u32");

        let write_strategy = var("WRITE_STRATEGY")
            .map(|raw| {
                parse_write_strategy(&raw, max_retries)
                    .unwrap_or_else(|| panic!("Unknown WRITE_STRATEGY '{raw}'"))
            })
            .unwrap_or_default();

        let id_strategy = var("ID_STRATEGY")
            .map(|raw| {
                parse_id_strategy(&raw).unwrap_or_else(|| panic!("Unknown ID_STRATEGY '{raw}'"))
            })
            .unwrap_or_default();

        Self {
            host,
            port,
            data_dir,
            cors_origins,
            request_timeout_secs,
            store: StoreOptions {
                write_strategy,
                id_strategy,
            },
        }
    }
}

fn parse_write_strategy(raw: &str, max_retries: u32) -> Option<WriteStrategy> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "unguarded" => Some(WriteStrategy::Unguarded),
        "serialized" => Some(WriteStrategy::Serialized),
        "optimistic" => Some(WriteStrategy::Optimistic { max_retries }),
        _ => None,
    }
}

fn parse_id_strategy(raw: &str) -> Option<IdStrategy> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "count" => Some(IdStrategy::CountPlusOne),
        "sequence" => Some(IdStrategy::Sequence),
        _ => None,
    }
}
