//! Configuration loading and bootstrap value resolution
//!
//! Priority order for each bootstrap value (catalog path, port):
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! A missing or unreadable TOML file never stops startup: a warning is
//! logged and compiled defaults are used.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::{Error, Result};

/// Environment variable overriding the catalog path
pub const ENV_CATALOG: &str = "AASD_CATALOG";

/// Environment variable overriding the HTTP port
pub const ENV_PORT: &str = "AASD_PORT";

/// Default catalog file, relative to the working directory
pub const DEFAULT_CATALOG_FILE: &str = "audio_product_data.csv";

/// Default design service port
pub const DEFAULT_PORT: u16 = 5780;

/// Bootstrap configuration loaded from TOML file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TomlConfig {
    /// Product catalog CSV path
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,

    /// HTTP server port
    #[serde(default)]
    pub port: Option<u16>,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Default configuration file path: `<config_dir>/aasd/aasd-ds.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("aasd").join("aasd-ds.toml"))
}

/// Parse a TOML configuration file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse TOML {} failed: {}", path.display(), e)))
}

/// Load the TOML configuration, degrading to defaults
///
/// An explicit `path` that does not exist is reported as a warning, the
/// implicit default path silently falls back when absent.
pub fn load_or_default(path: Option<&Path>) -> TomlConfig {
    let (path, explicit) = match path {
        Some(p) => (p.to_path_buf(), true),
        None => match default_config_path() {
            Some(p) => (p, false),
            None => {
                warn!("Could not determine config directory, using defaults");
                return TomlConfig::default();
            }
        },
    };

    if !path.exists() {
        if explicit {
            warn!("Config file not found: {}, using defaults", path.display());
        }
        return TomlConfig::default();
    }

    match load_toml_config(&path) {
        Ok(config) => {
            info!("Loaded configuration from {}", path.display());
            config
        }
        Err(e) => {
            warn!("{}; using defaults", e);
            TomlConfig::default()
        }
    }
}

/// Resolve the catalog path
pub fn resolve_catalog_path(cli_arg: Option<&Path>, config: &TomlConfig) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(ENV_CATALOG) {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }

    // Priority 3: TOML config file
    if let Some(path) = &config.catalog_path {
        return path.clone();
    }

    // Priority 4: Compiled default
    PathBuf::from(DEFAULT_CATALOG_FILE)
}

/// Resolve the HTTP port
///
/// An unparseable environment value is ignored with a warning.
pub fn resolve_port(cli_arg: Option<u16>, config: &TomlConfig) -> u16 {
    if let Some(port) = cli_arg {
        return port;
    }

    if let Ok(value) = std::env::var(ENV_PORT) {
        match value.trim().parse::<u16>() {
            Ok(port) => return port,
            Err(_) => warn!("Ignoring invalid {}={:?}", ENV_PORT, value),
        }
    }

    config.port.unwrap_or(DEFAULT_PORT)
}
