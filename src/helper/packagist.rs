//! Packagist API client.
//!
//! # Responsibilities
//! - Fetch package metadata from `{base_url}/packages/{vendor}/{name}.json`
//! - Extract tagged releases (branch aliases such as `dev-master` are skipped)
//! - Serve download counts from the cache pool while they are fresh

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cache::CachePool;
use crate::config::PackagistConfig;
use crate::helper::packages::PackageRegistry;

/// Cache pool key holding the per-package download totals.
pub const DOWNLOADS_CACHE_KEY: &str = "packagist.downloads";

#[derive(Debug, thiserror::Error)]
pub enum PackagistError {
    #[error("Packagist request failed: {0}")]
    Http(#[from] reqwest::Error),
}

#[derive(Debug, Deserialize)]
struct PackageResponse {
    package: PackageData,
}

#[derive(Debug, Deserialize)]
struct PackageData {
    #[serde(default)]
    downloads: Downloads,
    #[serde(default)]
    versions: BTreeMap<String, VersionData>,
}

#[derive(Debug, Default, Deserialize)]
struct Downloads {
    #[serde(default)]
    total: u64,
}

#[derive(Debug, Deserialize)]
struct VersionData {
    version: String,
    #[serde(default)]
    time: Option<DateTime<Utc>>,
}

/// A tagged release as reported by Packagist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackagistRelease {
    pub version: String,
    pub released_at: DateTime<Utc>,
}

fn is_dev_version(version: &str) -> bool {
    version.starts_with("dev-") || version.ends_with("-dev")
}

pub struct PackagistHelper {
    http: reqwest::Client,
    cache: Arc<CachePool>,
    packages: Arc<PackageRegistry>,
    base_url: String,
    vendor: String,
    cache_ttl: Duration,
}

impl PackagistHelper {
    pub fn new(
        http: reqwest::Client,
        cache: Arc<CachePool>,
        packages: Arc<PackageRegistry>,
        config: &PackagistConfig,
        vendor: impl Into<String>,
    ) -> Self {
        Self {
            http,
            cache,
            packages,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            vendor: vendor.into(),
            cache_ttl: Duration::from_secs(config.cache_ttl_secs),
        }
    }

    pub fn packages(&self) -> &PackageRegistry {
        &self.packages
    }

    async fn fetch(&self, package: &str) -> Result<PackageData, PackagistError> {
        let url = format!("{}/packages/{}/{}.json", self.base_url, self.vendor, package);
        tracing::debug!(%url, "Fetching Packagist metadata");

        let response = self.http.get(&url).send().await?.error_for_status()?;
        Ok(response.json::<PackageResponse>().await?.package)
    }

    /// Tagged releases of `package`, oldest first.
    pub async fn package_versions(
        &self,
        package: &str,
    ) -> Result<Vec<PackagistRelease>, PackagistError> {
        let data = self.fetch(package).await?;

        let mut releases: Vec<_> = data
            .versions
            .into_values()
            .filter(|v| !is_dev_version(&v.version))
            .filter_map(|v| {
                let released_at = v.time?;
                Some(PackagistRelease {
                    version: v.version,
                    released_at,
                })
            })
            .collect();
        releases.sort_by(|a, b| a.released_at.cmp(&b.released_at));

        Ok(releases)
    }

    /// Total downloads of a single package, uncached.
    pub async fn download_count(&self, package: &str) -> Result<u64, PackagistError> {
        Ok(self.fetch(package).await?.downloads.total)
    }

    /// Download totals for every manifest package.
    pub async fn download_counts(&self) -> Result<BTreeMap<String, u64>, PackagistError> {
        if let Some(counts) = self.cache.get::<BTreeMap<String, u64>>(DOWNLOADS_CACHE_KEY) {
            return Ok(counts);
        }

        let mut counts = BTreeMap::new();
        for name in self.packages.names() {
            counts.insert(name.to_string(), self.download_count(name).await?);
        }

        if let Err(e) = self.cache.set(DOWNLOADS_CACHE_KEY, &counts, Some(self.cache_ttl)) {
            tracing::warn!(error = %e, "Failed to cache download counts");
        }
        tracing::info!(packages = counts.len(), "Refreshed Packagist download counts");

        Ok(counts)
    }
}
