use std::fs;
use std::path::Path;

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use tracing::debug;

use crate::error::Result;

// Type aliases for the database connection pool
pub type DbPool = Pool<SqliteConnectionManager>;
pub type DbConnection = r2d2::PooledConnection<SqliteConnectionManager>;

/// Database manager for handling connections and migrations
pub struct Database {
    pool: DbPool,
}

impl Database {
    /// Create a new database connection pool and apply migrations
    pub fn new(path: &str, max_connections: u32) -> Result<Self> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        // Set up connection manager and pool; every connection enforces
        // foreign keys (SQLite leaves them off by default)
        let manager = SqliteConnectionManager::file(path)
            .with_init(|conn| conn.execute_batch("PRAGMA foreign_keys = ON;"));
        let pool = Pool::builder().max_size(max_connections).build(manager)?;

        // Run migrations
        let conn = pool.get()?;
        Self::run_migrations(&conn)?;
        debug!(path, "database ready");

        Ok(Self { pool })
    }

    /// Run database migrations
    fn run_migrations(conn: &Connection) -> Result<()> {
        conn.execute_batch(include_str!(
            "../migrations/2025-06-02-000000_create_tables/up.sql"
        ))?;
        conn.execute_batch(include_str!(
            "../migrations/2025-06-18-000000_add_lookup_indexes/up.sql"
        ))?;

        Ok(())
    }

    /// Get a connection from the pool
    pub fn get_connection(&self) -> Result<DbConnection> {
        Ok(self.pool.get()?)
    }

    /// Number of idle and in-use connections, for diagnostics
    #[must_use]
    pub fn pool_size(&self) -> u32 {
        self.pool.state().connections
    }
}
