use std::sync::Arc;

use crate::cli::ConsoleOutput;
use crate::error::AppResult;
use crate::helper::PackagistHelper;
use crate::model::{PackageModel, ReleaseModel};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PackagistSyncSummary {
    pub added: usize,
    pub failed: usize,
}

/// Records releases published on Packagist that the database does not know yet.
pub struct PackagistSyncCommand {
    packages: Arc<PackageModel>,
    releases: Arc<ReleaseModel>,
    packagist: Arc<PackagistHelper>,
}

impl PackagistSyncCommand {
    pub fn new(
        packages: Arc<PackageModel>,
        releases: Arc<ReleaseModel>,
        packagist: Arc<PackagistHelper>,
    ) -> Self {
        Self {
            packages,
            releases,
            packagist,
        }
    }

    /// A package whose metadata cannot be fetched is skipped and counted in
    /// `failed`; database errors abort the run.
    pub async fn sync(&self, output: &ConsoleOutput) -> AppResult<PackagistSyncSummary> {
        let mut summary = PackagistSyncSummary::default();

        for package in self.packages.packages().await? {
            let versions = match self.packagist.package_versions(&package.package).await {
                Ok(versions) => versions,
                Err(e) => {
                    tracing::warn!(package = %package.package, error = %e, "Packagist lookup failed");
                    output.error(&format!("{}: {e}", package.package));
                    summary.failed += 1;
                    continue;
                }
            };

            for release in versions {
                if self
                    .releases
                    .add_release(package.id, &release.version, release.released_at)
                    .await?
                {
                    tracing::info!(
                        package = %package.package,
                        version = %release.version,
                        "Release recorded"
                    );
                    output.line(&format!("  {} {}", package.display, release.version));
                    summary.added += 1;
                }
            }
        }

        Ok(summary)
    }

    pub async fn execute(&self, output: &ConsoleOutput) -> AppResult<()> {
        output.title("Syncing Packagist releases");
        let summary = self.sync(output).await?;
        output.success(&format!(
            "{} new releases, {} packages failed",
            summary.added, summary.failed
        ));
        Ok(())
    }
}
