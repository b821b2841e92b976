//! SQLite reading store facade
//!
//! Read-only access (apart from schema bootstrap) to the `readings`
//! table populated by an external ingester. Connections are pooled via
//! r2d2; queries run on the blocking pool.

mod sqlite_store;

use std::path::Path;

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::StoreConfig;

pub use sqlite_store::SqliteReadingStore;

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Store setup error: {0}")]
    Setup(String),
}

impl From<StoreError> for application::ApplicationError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Pool(e) => Self::StoreUnavailable(e.to_string()),
            StoreError::Sqlite(e) => Self::Internal(e.to_string()),
            StoreError::Setup(e) => Self::StoreUnavailable(e),
        }
    }
}

/// SQLite connection pool type alias
pub type ConnectionPool = Pool<SqliteConnectionManager>;

/// Pooled connection type alias
pub type PooledConn = PooledConnection<SqliteConnectionManager>;

/// Create a connection pool and bootstrap the schema
pub fn create_pool(config: &StoreConfig) -> Result<ConnectionPool, StoreError> {
    let Some(path) = config.path.as_deref() else {
        return Err(StoreError::Setup("no store path configured".into()));
    };
    info!(path, max_connections = config.max_connections, "Opening reading store");

    let manager = if path == ":memory:" {
        SqliteConnectionManager::memory()
    } else {
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    StoreError::Setup(format!("failed to create store directory: {e}"))
                })?;
            }
        }
        SqliteConnectionManager::file(path)
    };

    let pool = Pool::builder()
        .max_size(config.max_connections)
        .build(manager)?;

    {
        let conn = pool.get()?;
        initialize_schema(&conn)?;
    }

    debug!("Reading store pool created");
    Ok(pool)
}

/// Apply connection settings and create the readings table
fn initialize_schema(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA busy_timeout = 5000;

        CREATE TABLE IF NOT EXISTS readings (
            time_utc TEXT PRIMARY KEY,
            date_local TEXT NOT NULL,
            time_local TEXT NOT NULL,
            air_temperature REAL,
            relative_humidity REAL,
            wind_speed_ms REAL,
            wind_from_deg REAL,
            pressure_hpa REAL,
            precip_mm REAL,
            symbol_code TEXT,
            symbol_emoji TEXT
        );
        CREATE INDEX IF NOT EXISTS idx_readings_date_local
            ON readings(date_local);
        ",
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_config() -> StoreConfig {
        StoreConfig {
            path: Some(":memory:".to_string()),
            max_connections: 1,
        }
    }

    #[test]
    fn create_in_memory_pool() {
        let pool = create_pool(&memory_config());
        assert!(pool.is_ok());
    }

    #[test]
    fn missing_path_is_a_setup_error() {
        let err = create_pool(&StoreConfig::default()).unwrap_err();
        assert!(matches!(err, StoreError::Setup(_)));
    }

    #[test]
    fn schema_bootstrap_is_idempotent() {
        let pool = create_pool(&memory_config()).unwrap();
        let conn = pool.get().unwrap();
        initialize_schema(&conn).unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM readings", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn store_error_maps_to_application_error() {
        let err: application::ApplicationError = StoreError::Setup("no path".into()).into();
        assert!(matches!(
            err,
            application::ApplicationError::StoreUnavailable(_)
        ));
    }
}
