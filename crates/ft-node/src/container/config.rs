//! # Node Configuration
//!
//! Runtime parameters read from the environment.
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `FT_ADMIN_IDENTITY` | required | Hex address of the registry admin |
//! | `FT_DATA_PATH` | unset | Store file; in-memory store when unset |
//! | `FT_REREGISTRATION` | `upsert` | `upsert` or `reject` |
//! | `FT_MAX_TEXT_LEN` | unlimited | Maximum bytes in names, origins, locations |
//! | `FT_BUS_CAPACITY` | `1000` | Event bus buffer per subscriber |
//! | `FT_METRICS_SYNC_SECS` | `5` | Interval for mirroring registry counters |

use ft_registry::{RegistryConfig, ReregistrationPolicy, DEFAULT_MAX_TEXT_LEN};
use shared_bus::DEFAULT_CHANNEL_CAPACITY;
use shared_types::{Identity, IdentityParseError};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Complete node configuration.
#[derive(Debug, Clone)]
pub struct NodeConfig {
    /// Registry configuration, admin included.
    pub registry: RegistryConfig,
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Event bus configuration.
    pub bus: BusConfig,
}

impl NodeConfig {
    /// Defaults for everything but the admin.
    pub fn new(admin: Identity) -> Self {
        Self {
            registry: RegistryConfig::new(admin),
            storage: StorageConfig::default(),
            bus: BusConfig::default(),
        }
    }

    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let admin_hex = lookup("FT_ADMIN_IDENTITY").ok_or(ConfigError::MissingAdmin)?;
        let admin = Identity::from_hex(&admin_hex).map_err(|source| ConfigError::InvalidAdmin {
            value: admin_hex.clone(),
            source,
        })?;
        if admin.is_zero() {
            return Err(ConfigError::ZeroAdmin);
        }

        let mut config = Self::new(admin);

        if let Some(path) = lookup("FT_DATA_PATH").filter(|p| !p.trim().is_empty()) {
            config.storage.data_path = Some(PathBuf::from(path));
        }

        if let Some(value) = lookup("FT_REREGISTRATION") {
            let policy = value
                .parse::<ReregistrationPolicy>()
                .map_err(|reason| ConfigError::invalid("FT_REREGISTRATION", &value, reason))?;
            config.registry.reregistration = policy;
        }

        if let Some(value) = lookup("FT_MAX_TEXT_LEN") {
            config.registry.max_text_len = parse_positive("FT_MAX_TEXT_LEN", &value)?;
        }

        if let Some(value) = lookup("FT_BUS_CAPACITY") {
            config.bus.capacity = parse_positive("FT_BUS_CAPACITY", &value)?;
        }

        if let Some(value) = lookup("FT_METRICS_SYNC_SECS") {
            let secs = parse_positive("FT_METRICS_SYNC_SECS", &value)?;
            config.bus.metrics_sync_interval = Duration::from_secs(secs as u64);
        }

        Ok(config)
    }
}

fn parse_positive(var: &'static str, value: &str) -> Result<usize, ConfigError> {
    match value.trim().parse::<usize>() {
        Ok(0) => Err(ConfigError::invalid(var, value, "must be greater than zero")),
        Ok(n) => Ok(n),
        Err(e) => Err(ConfigError::invalid(var, value, e.to_string())),
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No admin identity configured.
    #[error("FT_ADMIN_IDENTITY is not set; the registry needs an admin")]
    MissingAdmin,

    /// Admin identity is not a 20-byte hex address.
    #[error("FT_ADMIN_IDENTITY {value:?} is not a valid address: {source}")]
    InvalidAdmin {
        value: String,
        #[source]
        source: IdentityParseError,
    },

    /// The zero address cannot administer the registry.
    #[error("FT_ADMIN_IDENTITY must not be the zero address")]
    ZeroAdmin,

    /// Any other variable with an unusable value.
    #[error("{var}={value:?} is invalid: {reason}")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    fn invalid(var: &'static str, value: &str, reason: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            var,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

/// Storage configuration.
#[derive(Debug, Clone, Default)]
pub struct StorageConfig {
    /// File for the file-backed store. `None` keeps everything in memory.
    pub data_path: Option<PathBuf>,
}

/// Event bus configuration.
#[derive(Debug, Clone)]
pub struct BusConfig {
    /// Buffered events per subscriber before it starts lagging.
    pub capacity: usize,
    /// How often registry counters are copied into the exporter.
    pub metrics_sync_interval: Duration,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CHANNEL_CAPACITY,
            metrics_sync_interval: Duration::from_secs(5),
        }
    }
}
