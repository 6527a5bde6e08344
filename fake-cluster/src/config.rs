//! Server configuration loaded from environment variables.

use std::env;
use std::num::NonZeroUsize;
use std::str::FromStr;

use fake_cluster_bulk::BulkConfig;
use fake_cluster_store::{EvictionPolicy, StoreConfig};

use crate::errors::ServerError;

/// Default bind address (all interfaces).
const DEFAULT_ADDR: &str = "0.0.0.0";

/// Default bind port.
const DEFAULT_PORT: u16 = 9200;

/// Default body limit for store PUT requests.
const DEFAULT_MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human readable console output.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            _ => Err("expected 'pretty' or 'json'".to_string()),
        }
    }
}

/// Runtime configuration for the fake cluster.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind, as a host name or IP.
    pub addr: String,
    pub port: u16,
    /// Seed for node name and cluster id generation. Random when `None`.
    pub seed: Option<u64>,
    pub bulk: BulkConfig,
    /// Applied to both the pipeline and the template store.
    pub store: StoreConfig,
    /// Largest body accepted by store PUT requests.
    pub max_body_bytes: usize,
    pub log_format: LogFormat,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: DEFAULT_ADDR.to_string(),
            port: DEFAULT_PORT,
            seed: None,
            bulk: BulkConfig::default(),
            store: StoreConfig::default(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            log_format: LogFormat::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `FAKE_CLUSTER_ADDR`: Bind address (default: 0.0.0.0)
    /// - `FAKE_CLUSTER_PORT`: Bind port (default: 9200)
    /// - `FAKE_CLUSTER_SEED`: Seed for the node identity (default: random)
    /// - `BULK_ERROR_BUDGET`: Consecutive malformed bulk entries before aborting, at least 1 (default: 5)
    /// - `BULK_MAX_LINE_BYTES`: Longest accepted bulk line, at least 1 (default: 65536)
    /// - `STORE_CAPACITY`: Entries per pipeline/template store (default: unbounded)
    /// - `STORE_EVICTION`: "fifo" or "lru", used with `STORE_CAPACITY` (default: fifo)
    /// - `MAX_BODY_BYTES`: Body limit for store PUT requests (default: 16 MiB)
    /// - `LOG_FORMAT`: "pretty" or "json" (default: pretty)
    ///
    /// # Returns
    ///
    /// * `Ok(ServerConfig)` - The loaded configuration
    /// * `Err(ServerError)` - If a variable is set to an invalid value
    pub fn from_env() -> Result<Self, ServerError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ServerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let addr = lookup("FAKE_CLUSTER_ADDR")
            .filter(|addr| !addr.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let port = parse_var(&lookup, "FAKE_CLUSTER_PORT")?.unwrap_or(DEFAULT_PORT);
        let seed: Option<u64> = parse_var(&lookup, "FAKE_CLUSTER_SEED")?;

        // Zero is rejected by the `NonZeroUsize` parse.
        let mut bulk = BulkConfig::default();
        if let Some(budget) = parse_var::<NonZeroUsize, _>(&lookup, "BULK_ERROR_BUDGET")? {
            bulk = bulk.with_error_budget(budget);
        }
        if let Some(max) = parse_var::<NonZeroUsize, _>(&lookup, "BULK_MAX_LINE_BYTES")? {
            bulk = bulk.with_max_line_bytes(max);
        }

        let eviction: EvictionPolicy = parse_var(&lookup, "STORE_EVICTION")?.unwrap_or_default();
        let store = match parse_var::<usize, _>(&lookup, "STORE_CAPACITY")? {
            Some(capacity) => StoreConfig::bounded(capacity, eviction)?,
            None => StoreConfig::unbounded(),
        };

        let max_body_bytes: usize =
            parse_var(&lookup, "MAX_BODY_BYTES")?.unwrap_or(DEFAULT_MAX_BODY_BYTES);
        let log_format: LogFormat = parse_var(&lookup, "LOG_FORMAT")?.unwrap_or_default();

        Ok(Self {
            addr,
            port,
            seed,
            bulk,
            store,
            max_body_bytes,
            log_format,
        })
    }
}

/// Parse an optional variable, failing on values that do not parse.
fn parse_var<T, F>(lookup: &F, name: &str) -> Result<Option<T>, ServerError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| ServerError::config(format!("Invalid {} '{}': {}", name, raw, e))),
        _ => Ok(None),
    }
}
