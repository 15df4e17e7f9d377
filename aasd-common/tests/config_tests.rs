//! Unit tests for configuration and graceful degradation
//!
//! Tests the implementation of:
//! - Missing TOML files SHALL NOT cause termination
//! - Priority order: CLI → ENV → TOML → compiled default
//!
//! Note: Uses serial_test crate to prevent ENV variable race conditions.
//! Tests that manipulate AASD_CATALOG or AASD_PORT are marked with #[serial].

use aasd_common::config::{
    load_or_default, load_toml_config, resolve_catalog_path, resolve_port, TomlConfig,
    DEFAULT_CATALOG_FILE, DEFAULT_PORT, ENV_CATALOG, ENV_PORT,
};
use serial_test::serial;
use std::env;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[test]
fn test_missing_explicit_config_falls_back_to_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config = load_or_default(Some(temp_dir.path().join("absent.toml").as_path()));
    assert_eq!(config, TomlConfig::default());
}

#[test]
fn test_malformed_config_falls_back_to_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.toml");
    std::fs::write(&path, "port = \"not a number\"\n[logging\n").unwrap();

    assert!(load_toml_config(&path).is_err());
    assert_eq!(load_or_default(Some(path.as_path())), TomlConfig::default());
}

#[test]
fn test_config_file_values_loaded() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("aasd-ds.toml");
    std::fs::write(
        &path,
        "catalog_path = \"/data/products.csv\"\nport = 6100\n\n[logging]\nlevel = \"warn\"\n",
    )
    .unwrap();

    let config = load_or_default(Some(path.as_path()));
    assert_eq!(config.catalog_path, Some(PathBuf::from("/data/products.csv")));
    assert_eq!(config.port, Some(6100));
    assert_eq!(config.logging.level, "warn");
}

#[test]
#[serial]
fn test_catalog_resolution_priority() {
    env::remove_var(ENV_CATALOG);

    let config = TomlConfig {
        catalog_path: Some(PathBuf::from("toml.csv")),
        ..TomlConfig::default()
    };

    // Priority 3: TOML
    assert_eq!(resolve_catalog_path(None, &config), PathBuf::from("toml.csv"));

    // Priority 2: ENV beats TOML
    env::set_var(ENV_CATALOG, "env.csv");
    assert_eq!(resolve_catalog_path(None, &config), PathBuf::from("env.csv"));

    // Priority 1: CLI beats ENV
    assert_eq!(
        resolve_catalog_path(Some(Path::new("cli.csv")), &config),
        PathBuf::from("cli.csv")
    );

    env::remove_var(ENV_CATALOG);

    // Priority 4: compiled default
    assert_eq!(
        resolve_catalog_path(None, &TomlConfig::default()),
        PathBuf::from(DEFAULT_CATALOG_FILE)
    );
}

#[test]
#[serial]
fn test_port_resolution_priority() {
    env::remove_var(ENV_PORT);

    let config = TomlConfig {
        port: Some(6200),
        ..TomlConfig::default()
    };
    assert_eq!(resolve_port(None, &config), 6200);
    assert_eq!(resolve_port(None, &TomlConfig::default()), DEFAULT_PORT);

    env::set_var(ENV_PORT, "6300");
    assert_eq!(resolve_port(None, &config), 6300);
    assert_eq!(resolve_port(Some(6400), &config), 6400);

    // Invalid ENV value ignored
    env::set_var(ENV_PORT, "not-a-port");
    assert_eq!(resolve_port(None, &config), 6200);

    env::remove_var(ENV_PORT);
}
