//! Database connection pool management.

use anyhow::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

use crate::schema::{TableDef, SCHEMA};

/// Path that selects a private in-memory database instead of a file.
pub const IN_MEMORY: &str = ":memory:";

/// Database connection pool wrapper.
///
/// Holds a single connection: the importer and the query layer never access
/// the store concurrently, and an in-memory database lives exactly as long
/// as its one connection.
#[derive(Clone)]
pub struct DbPool {
    pool: SqlitePool,
}

impl DbPool {
    /// Create a new database pool from a SQLite database path.
    ///
    /// # Arguments
    /// * `db_path` - Path to the SQLite database file, or `:memory:`
    ///
    /// # Returns
    /// A new `DbPool` instance
    pub async fn new(db_path: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(db_path)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
            .connect_with(options)
            .await?;

        info!("Connected to database at {}", db_path);

        Ok(Self { pool })
    }

    /// Connect to `db_path` and create any missing table of `SCHEMA`.
    ///
    /// Both the importer and the read-only lookups go through here, so a
    /// lookup on a fresh database sees empty tables instead of failing.
    pub async fn open(db_path: &str) -> Result<Self> {
        let db = Self::new(db_path).await?;
        db.ensure_schema(SCHEMA).await?;
        Ok(db)
    }

    /// Get a reference to the underlying SQLite pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create every table of `schema` that does not exist yet.
    pub async fn ensure_schema(&self, schema: &[TableDef]) -> Result<()> {
        info!("Ensuring database schema ({} tables)", schema.len());
        for table in schema {
            debug!(table = table.name, "Creating table if missing");
            let statement = table.create_statement();
            sqlx::query(&statement)
                .execute(&self.pool)
                .await
                .map_err(|e| anyhow::anyhow!("Creating table {} failed: {}", table.name, e))?;
        }
        Ok(())
    }

    /// Close every connection of the pool.
    pub async fn close(&self) {
        self.pool.close().await;
        debug!("Database pool closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::{fetch_routes, fetch_stops};

    #[tokio::test]
    async fn test_database_creation() {
        let db = DbPool::new(IN_MEMORY).await.unwrap();
        db.ensure_schema(SCHEMA).await.unwrap();

        let tables: Vec<String> = sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
        )
        .fetch_all(db.pool())
        .await
        .unwrap();
        assert_eq!(tables, vec!["accessibility", "bus_routes", "bus_stops"]);
    }

    #[tokio::test]
    async fn test_lookups_on_a_never_imported_database() {
        let path = std::env::temp_dir().join(format!("ratp_access_fresh_{}.db", std::process::id()));
        let _ = std::fs::remove_file(&path);
        let path = path.to_string_lossy().into_owned();

        let db = DbPool::open(&path).await.unwrap();
        assert!(fetch_routes(&db, 5).await.unwrap().is_empty());
        assert!(fetch_stops(&db, "54", -1).await.unwrap().is_empty());
        db.close().await;

        std::fs::remove_file(&path).unwrap();
    }

    #[tokio::test]
    async fn test_ensure_schema_is_idempotent() {
        let db = DbPool::new(IN_MEMORY).await.unwrap();
        db.ensure_schema(SCHEMA).await.unwrap();
        db.ensure_schema(SCHEMA).await.unwrap();
    }

    #[tokio::test]
    async fn test_in_memory_databases_are_isolated() {
        let first = DbPool::new(IN_MEMORY).await.unwrap();
        first.ensure_schema(SCHEMA).await.unwrap();

        let second = DbPool::new(IN_MEMORY).await.unwrap();
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'bus_routes'",
        )
        .fetch_one(second.pool())
        .await
        .unwrap();
        assert_eq!(count, 0);
    }
}
