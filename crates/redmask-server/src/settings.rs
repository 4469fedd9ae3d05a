//! Server settings.
//!
//! Settings come from an optional YAML file overlaid with `REDMASK_*`
//! environment variables. Nested keys use `__`, for example
//! `REDMASK_SERVER__PORT=9000`; lists are comma separated
//! (`REDMASK_FIELDS_TO_MASK=username,email`).

use std::collections::HashSet;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File, FileFormat};
use redmask_core::{MaskingError, PatternConfig, default_patterns};
use redmask_engine::store::{DEFAULT_MEMORY_CAPACITY, DEFAULT_REDIS_ADDR};
use redmask_engine::{EngineConfig, StoreConfig};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable naming the settings file.
pub const CONFIG_PATH_ENV: &str = "REDMASK_CONFIG";

/// Settings file used when `REDMASK_CONFIG` is unset.
pub const DEFAULT_CONFIG_PATH: &str = "redmask.yaml";

/// Prefix of environment overrides.
pub const ENV_PREFIX: &str = "REDMASK";

/// Errores al cargar la configuracion.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to load settings: {0}")]
    Load(#[from] config::ConfigError),

    #[error("failed to parse settings YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Invalid(#[from] MaskingError),
}

/// Which key-value store backs the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Redis,
    Memory,
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Deadline applied to the store calls of one request, in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8890,
            request_timeout_secs: 5,
        }
    }
}

/// Complete server settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub store_backend: StoreBackend,
    pub redis_addr: String,
    pub redis_password: String,
    pub redis_db: i64,
    /// Entry lifetime in seconds; 0 keeps entries forever.
    pub token_ttl: i64,
    /// Capacity of the in-process store.
    pub memory_capacity: u64,
    pub fields_to_mask: Vec<String>,
    pub patterns: Vec<PatternConfig>,
    pub server: ServerSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            store_backend: StoreBackend::default(),
            redis_addr: DEFAULT_REDIS_ADDR.to_string(),
            redis_password: String::new(),
            redis_db: 0,
            token_ttl: 0,
            memory_capacity: DEFAULT_MEMORY_CAPACITY,
            fields_to_mask: Vec::new(),
            patterns: default_patterns(),
            server: ServerSettings::default(),
        }
    }
}

impl Settings {
    /// Loads settings from `REDMASK_CONFIG` (or `redmask.yaml`) and the
    /// process environment, then validates them.
    ///
    /// An explicitly named file must exist; the default one is optional.
    pub fn load() -> Result<Self, SettingsError> {
        let (path, required) = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => (PathBuf::from(path), true),
            Err(_) => (PathBuf::from(DEFAULT_CONFIG_PATH), false),
        };

        Self::load_from(Some(&path), required, Self::environment())
    }

    /// Loads settings from an optional file and an environment source.
    pub fn load_from(
        path: Option<&Path>,
        required: bool,
        environment: Environment,
    ) -> Result<Self, SettingsError> {
        let mut builder = Config::builder();

        if let Some(path) = path {
            let name = path.to_string_lossy();
            builder = builder.add_source(File::new(&name, FileFormat::Yaml).required(required));
        }

        let mut settings: Settings = builder.add_source(environment).build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Parses and validates settings from YAML text.
    pub fn from_yaml(text: &str) -> Result<Self, SettingsError> {
        let mut settings: Settings = serde_yaml::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Environment source reading `REDMASK_*` variables.
    pub fn environment() -> Environment {
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("fields_to_mask")
    }

    /// Checks the settings and fills in defaults for empty values.
    pub fn validate(&mut self) -> Result<(), MaskingError> {
        if self.redis_addr.trim().is_empty() {
            self.redis_addr = DEFAULT_REDIS_ADDR.to_string();
        }

        if self.token_ttl < 0 {
            return Err(MaskingError::invalid_config(
                "token_ttl",
                "must be non-negative",
            ));
        }

        if self.redis_db < 0 {
            return Err(MaskingError::invalid_config(
                "redis_db",
                "must be non-negative",
            ));
        }

        let mut seen = HashSet::new();
        for pattern in &self.patterns {
            if pattern.name.trim().is_empty() {
                return Err(MaskingError::invalid_config(
                    "patterns",
                    "pattern name must not be empty",
                ));
            }
            if !seen.insert(pattern.name.as_str()) {
                return Err(MaskingError::invalid_config(
                    "patterns",
                    format!("duplicate pattern name '{}'", pattern.name),
                ));
            }
        }

        Ok(())
    }

    /// Store configuration for the engine.
    pub fn store_config(&self) -> StoreConfig {
        let ttl = u64::try_from(self.token_ttl).unwrap_or(0);

        let builder = match self.store_backend {
            StoreBackend::Memory => StoreConfig::builder().memory(self.memory_capacity),
            StoreBackend::Redis => {
                let mut builder = StoreConfig::builder()
                    .redis(&self.redis_addr)
                    .db(self.redis_db);
                if !self.redis_password.is_empty() {
                    builder = builder.password(&self.redis_password);
                }
                builder
            }
        };

        builder.token_ttl(ttl).build()
    }

    /// Engine configuration derived from these settings.
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            fields_to_mask: self.fields_to_mask.clone(),
            patterns: self.patterns.clone(),
            store: self.store_config(),
        }
    }

    /// Address the HTTP server binds to.
    pub fn listen_addr(&self) -> Result<SocketAddr, MaskingError> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| MaskingError::invalid_config("server", format!("invalid address: {e}")))
    }

    /// Per-request deadline for store calls.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.server.request_timeout_secs)
    }
}
