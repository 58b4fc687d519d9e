//! Package status board views.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;

use crate::error::AppResult;
use crate::helper::PackagistHelper;
use crate::model::{PackageModel, ReleaseModel};
use crate::renderer::Renderer;

/// One row of the status board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageStatus {
    pub name: String,
    pub display: String,
    pub version: Option<String>,
    pub release_date: Option<DateTime<Utc>>,
    pub deprecated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub downloads: Option<u64>,
}

async fn collect_status(
    packages: &PackageModel,
    releases: &ReleaseModel,
) -> AppResult<Vec<PackageStatus>> {
    let packages = packages.packages().await?;
    let mut latest = releases.latest_releases(&packages).await?;

    Ok(packages
        .into_iter()
        .map(|package| {
            let release = latest.remove(&package.id);
            PackageStatus {
                name: package.package,
                display: package.display,
                version: release.as_ref().map(|r| r.version.clone()),
                release_date: release.map(|r| r.release_date),
                deprecated: package.deprecated,
                downloads: None,
            }
        })
        .collect())
}

pub struct StatusHtmlView {
    packages: Arc<PackageModel>,
    releases: Arc<ReleaseModel>,
    packagist: Arc<PackagistHelper>,
    renderer: Arc<dyn Renderer>,
    layout: String,
}

impl StatusHtmlView {
    pub fn new(
        packages: Arc<PackageModel>,
        releases: Arc<ReleaseModel>,
        packagist: Arc<PackagistHelper>,
        renderer: Arc<dyn Renderer>,
    ) -> Self {
        Self {
            packages,
            releases,
            packagist,
            renderer,
            layout: "status.html".to_string(),
        }
    }

    pub fn set_layout(&mut self, layout: impl Into<String>) -> &mut Self {
        self.layout = layout.into();
        self
    }

    pub fn layout(&self) -> &str {
        &self.layout
    }

    pub async fn render(&self) -> AppResult<String> {
        let mut rows = collect_status(&self.packages, &self.releases).await?;

        let downloads = match self.packagist.download_counts().await {
            Ok(counts) => counts,
            Err(e) => {
                tracing::warn!(error = %e, "Download counts unavailable");
                BTreeMap::new()
            }
        };
        for row in &mut rows {
            row.downloads = downloads.get(&row.name).copied();
        }
        let total_downloads: u64 = downloads.values().sum();

        let data = json!({
            "packages": rows,
            "total_downloads": total_downloads,
        });
        Ok(self.renderer.render(&self.layout, &data)?)
    }
}

pub struct StatusJsonView {
    packages: Arc<PackageModel>,
    releases: Arc<ReleaseModel>,
}

impl StatusJsonView {
    pub fn new(packages: Arc<PackageModel>, releases: Arc<ReleaseModel>) -> Self {
        Self { packages, releases }
    }

    pub async fn render(&self) -> AppResult<serde_json::Value> {
        let rows = collect_status(&self.packages, &self.releases).await?;
        Ok(json!({ "packages": rows }))
    }
}
