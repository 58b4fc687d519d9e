//! Package storage.

use serde::Serialize;

use crate::model::database::Database;

/// A stored package row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Package {
    pub id: i64,
    pub package: String,
    pub display: String,
    pub repo: String,
    pub stable: bool,
    pub deprecated: bool,
}

/// Fields written when adding or updating a package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPackage {
    pub package: String,
    pub display: String,
    pub repo: String,
    pub stable: bool,
    pub deprecated: bool,
}

impl NewPackage {
    /// Whether `existing` already holds these values.
    pub fn matches(&self, existing: &Package) -> bool {
        self.package == existing.package
            && self.display == existing.display
            && self.repo == existing.repo
            && self.stable == existing.stable
            && self.deprecated == existing.deprecated
    }
}

#[derive(Debug, Clone)]
pub struct PackageModel {
    db: Database,
}

impl PackageModel {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// All packages ordered by display name.
    pub async fn packages(&self) -> Result<Vec<Package>, sqlx::Error> {
        sqlx::query_as::<_, Package>(
            "SELECT id, package, display, repo, stable, deprecated FROM packages ORDER BY display",
        )
        .fetch_all(self.db.pool())
        .await
    }

    pub async fn package(&self, name: &str) -> Result<Option<Package>, sqlx::Error> {
        sqlx::query_as::<_, Package>(
            "SELECT id, package, display, repo, stable, deprecated FROM packages WHERE package = ?",
        )
        .bind(name)
        .fetch_optional(self.db.pool())
        .await
    }

    /// Insert a package and return its id.
    pub async fn add_package(&self, package: &NewPackage) -> Result<i64, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO packages (package, display, repo, stable, deprecated) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&package.package)
        .bind(&package.display)
        .bind(&package.repo)
        .bind(package.stable)
        .bind(package.deprecated)
        .execute(self.db.pool())
        .await?;

        Ok(result.last_insert_rowid())
    }

    pub async fn update_package(&self, id: i64, package: &NewPackage) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE packages SET package = ?, display = ?, repo = ?, stable = ?, deprecated = ? WHERE id = ?",
        )
        .bind(&package.package)
        .bind(&package.display)
        .bind(&package.repo)
        .bind(package.stable)
        .bind(package.deprecated)
        .bind(id)
        .execute(self.db.pool())
        .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::database::memory_database;

    fn router_package() -> NewPackage {
        NewPackage {
            package: "router".into(),
            display: "Router".into(),
            repo: "router".into(),
            stable: true,
            deprecated: false,
        }
    }

    #[tokio::test]
    async fn test_add_and_fetch() {
        let model = PackageModel::new(memory_database().await);
        let id = model.add_package(&router_package()).await.unwrap();

        let stored = model.package("router").await.unwrap().unwrap();
        assert_eq!(stored.id, id);
        assert!(router_package().matches(&stored));
        assert!(model.package("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update() {
        let model = PackageModel::new(memory_database().await);
        let id = model.add_package(&router_package()).await.unwrap();

        let changed = NewPackage {
            deprecated: true,
            ..router_package()
        };
        model.update_package(id, &changed).await.unwrap();

        let stored = model.package("router").await.unwrap().unwrap();
        assert!(stored.deprecated);
        assert!(!router_package().matches(&stored));
    }

    #[tokio::test]
    async fn test_packages_sorted_by_display_name() {
        let model = PackageModel::new(memory_database().await);
        model.add_package(&router_package()).await.unwrap();
        model
            .add_package(&NewPackage {
                package: "di".into(),
                display: "DI".into(),
                repo: "di".into(),
                stable: true,
                deprecated: false,
            })
            .await
            .unwrap();

        let names: Vec<_> = model
            .packages()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.package)
            .collect();
        assert_eq!(names, vec!["di", "router"]);
    }

    #[tokio::test]
    async fn test_duplicate_package_is_rejected() {
        let model = PackageModel::new(memory_database().await);
        model.add_package(&router_package()).await.unwrap();
        assert!(model.add_package(&router_package()).await.is_err());
    }
}
