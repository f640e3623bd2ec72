//! Warehouse snapshot sources.
//!
//! Provides read-only access to the tables a report run consumes:
//! subscription line snapshots, the pull-forward history and per-product
//! report metrics.

use std::sync::Arc;

use tracing::{error, info};

use crate::config::{StorageConfig, StorageType};

pub mod mock;
#[cfg(any(feature = "sqlite", feature = "postgres"))]
pub mod schema;
mod snapshot_source;
#[cfg(any(feature = "sqlite", feature = "postgres"))]
pub mod sql;

pub use mock::MockSnapshotSource;
pub use snapshot_source::SnapshotSource;

#[cfg(feature = "postgres")]
pub use sql::postgres::PostgresSnapshotSource;
#[cfg(feature = "sqlite")]
pub use sql::sqlite::SqliteSnapshotSource;

/// Errors raised while reading warehouse inputs.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[cfg(any(feature = "sqlite", feature = "postgres"))]
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[cfg(any(feature = "sqlite", feature = "postgres"))]
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage type '{0}' requested but its feature is not enabled")]
    FeatureDisabled(StorageType),

    #[error("Snapshot source unavailable: {0}")]
    Unavailable(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Initialize the snapshot source based on configuration.
pub async fn init_source(config: &StorageConfig) -> Result<Arc<dyn SnapshotSource>> {
    info!("Storage: {}", config.storage_type);

    match config.storage_type {
        #[cfg(feature = "sqlite")]
        StorageType::Sqlite => {
            let path = &config.sqlite.path;
            let url = if path == ":memory:" {
                "sqlite::memory:".to_string()
            } else {
                if config.run_migrations {
                    if let Some(parent) = std::path::Path::new(path).parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                }
                let mode = if config.run_migrations { "rwc" } else { "ro" };
                format!("sqlite:{}?mode={}", path, mode)
            };

            // An in-memory database lives and dies with its connection.
            let pool = sqlx::sqlite::SqlitePoolOptions::new()
                .max_connections(if path == ":memory:" { 1 } else { 4 })
                .connect(&url)
                .await?;

            let source = SqliteSnapshotSource::new(pool);
            if config.run_migrations {
                source.migrate().await?;
            }
            Ok(Arc::new(source))
        }
        #[cfg(feature = "postgres")]
        StorageType::Postgres => {
            let pool = sqlx::PgPool::connect(&config.postgres.uri).await?;

            let source = PostgresSnapshotSource::new(pool);
            if config.run_migrations {
                source.migrate().await?;
            }
            Ok(Arc::new(source))
        }
        #[allow(unreachable_patterns)]
        other => {
            error!("Storage type '{}' requested but its feature is not enabled", other);
            Err(StorageError::FeatureDisabled(other))
        }
    }
}
