//! SQLite connection pool and schema.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::config::DatabaseConfig;

const SCHEMA: [&str; 3] = [
    r#"
    CREATE TABLE IF NOT EXISTS packages (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        package TEXT NOT NULL UNIQUE,
        display TEXT NOT NULL,
        repo TEXT NOT NULL,
        stable INTEGER NOT NULL DEFAULT 1,
        deprecated INTEGER NOT NULL DEFAULT 0
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS releases (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        package_id INTEGER NOT NULL REFERENCES packages(id) ON DELETE CASCADE,
        version TEXT NOT NULL,
        release_date TEXT NOT NULL,
        UNIQUE (package_id, version)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_releases_package_date ON releases (package_id, release_date)",
];

/// Shared handle to the release database.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Build a pool without connecting; the first query opens the connection.
    pub fn connect_lazy(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(&config.url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_lazy_with(options);

        Ok(Self { pool })
    }

    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create tables that do not exist yet.
    pub async fn migrate(&self) -> Result<(), sqlx::Error> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        tracing::debug!("Database schema up to date");
        Ok(())
    }
}

#[cfg(test)]
pub(crate) async fn memory_database() -> Database {
    let db = Database::connect_lazy(&DatabaseConfig {
        url: "sqlite::memory:".into(),
        max_connections: 1,
    })
    .unwrap();
    db.migrate().await.unwrap();
    db
}
