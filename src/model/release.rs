//! Release storage.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::database::Database;
use crate::model::package::Package;

/// A stored release row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Release {
    pub id: i64,
    pub package_id: i64,
    pub version: String,
    pub release_date: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct ReleaseModel {
    db: Database,
}

impl ReleaseModel {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Releases of one package, newest first.
    pub async fn package_history(&self, package_id: i64) -> Result<Vec<Release>, sqlx::Error> {
        sqlx::query_as::<_, Release>(
            "SELECT id, package_id, version, release_date FROM releases \
             WHERE package_id = ? ORDER BY release_date DESC, id DESC",
        )
        .bind(package_id)
        .fetch_all(self.db.pool())
        .await
    }

    pub async fn latest_release(&self, package_id: i64) -> Result<Option<Release>, sqlx::Error> {
        sqlx::query_as::<_, Release>(
            "SELECT id, package_id, version, release_date FROM releases \
             WHERE package_id = ? ORDER BY release_date DESC, id DESC LIMIT 1",
        )
        .bind(package_id)
        .fetch_optional(self.db.pool())
        .await
    }

    /// Latest release per package id. Packages without releases are absent.
    pub async fn latest_releases(
        &self,
        packages: &[Package],
    ) -> Result<HashMap<i64, Release>, sqlx::Error> {
        let mut latest = HashMap::with_capacity(packages.len());
        for package in packages {
            if let Some(release) = self.latest_release(package.id).await? {
                latest.insert(package.id, release);
            }
        }
        Ok(latest)
    }

    pub async fn has_release(&self, package_id: i64, version: &str) -> Result<bool, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM releases WHERE package_id = ? AND version = ?")
                .bind(package_id)
                .bind(version)
                .fetch_one(self.db.pool())
                .await?;
        Ok(count > 0)
    }

    /// Record a release. Returns `false` when it was already known.
    pub async fn add_release(
        &self,
        package_id: i64,
        version: &str,
        release_date: DateTime<Utc>,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT OR IGNORE INTO releases (package_id, version, release_date) VALUES (?, ?, ?)",
        )
        .bind(package_id)
        .bind(version)
        .bind(release_date)
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
