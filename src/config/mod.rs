//! Application configuration.
//!
//! Aggregates the projection and storage sections into a single Config
//! struct that can be loaded from YAML files or environment variables.

mod projection;
mod storage;

pub use projection::{ProjectionConfig, DEFAULT_HORIZON_DAYS};
pub use storage::{PostgresConfig, SqliteConfig, StorageConfig, StorageType};

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";
/// Environment variable for configuration file path.
pub const CONFIG_ENV_VAR: &str = "AUTOSHIP_CONFIG";
/// Prefix for configuration environment variables.
pub const CONFIG_ENV_PREFIX: &str = "AUTOSHIP";
/// Environment variable for logging configuration.
pub const LOG_ENV_VAR: &str = "AUTOSHIP_LOG";

use serde::Deserialize;

/// Main application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Projection run configuration.
    pub projection: ProjectionConfig,
    /// Warehouse storage configuration.
    pub storage: StorageConfig,
}

impl Config {
    /// Load configuration from file and environment.
    ///
    /// Configuration sources (in order of priority, later overrides earlier):
    /// 1. `config.yaml` in current directory (if exists)
    /// 2. File specified by `path` argument (if provided)
    /// 3. File specified by `CONFIG_ENV_VAR` environment variable (if set)
    /// 4. Environment variables with `CONFIG_ENV_PREFIX` prefix,
    ///    e.g. `AUTOSHIP__PROJECTION__HORIZON_DAYS=30`
    pub fn load(path: Option<&str>) -> Result<Self, Box<dyn std::error::Error>> {
        use ::config::{Config as ConfigLib, Environment, File, FileFormat};

        let mut builder = ConfigLib::builder()
            .add_source(File::new(DEFAULT_CONFIG_FILE, FileFormat::Yaml).required(false));

        if let Some(config_path) = path {
            builder = builder.add_source(File::new(config_path, FileFormat::Yaml).required(true));
        }

        if let Ok(config_path) = std::env::var(CONFIG_ENV_VAR) {
            builder = builder.add_source(File::new(&config_path, FileFormat::Yaml).required(true));
        }

        let config = builder
            .add_source(
                Environment::with_prefix(CONFIG_ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Config = config.try_deserialize()?;
        Ok(config)
    }

    /// Create config for testing.
    ///
    /// In-memory SQLite with migrations applied.
    pub fn for_test() -> Self {
        Self {
            storage: StorageConfig {
                sqlite: SqliteConfig {
                    path: ":memory:".to_string(),
                },
                run_migrations: true,
                ..StorageConfig::default()
            },
            ..Self::default()
        }
    }
}
