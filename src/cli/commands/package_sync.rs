use std::sync::Arc;

use crate::cli::ConsoleOutput;
use crate::error::AppResult;
use crate::helper::{PackageHelper, PackageRegistry};
use crate::model::{NewPackage, PackageModel};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PackageSyncSummary {
    pub added: usize,
    pub updated: usize,
    pub unchanged: usize,
}

/// Upserts every manifest package into the `packages` table.
pub struct PackageSyncCommand {
    registry: Arc<PackageRegistry>,
    helper: Arc<PackageHelper>,
    packages: Arc<PackageModel>,
}

impl PackageSyncCommand {
    pub fn new(
        registry: Arc<PackageRegistry>,
        helper: Arc<PackageHelper>,
        packages: Arc<PackageModel>,
    ) -> Self {
        Self {
            registry,
            helper,
            packages,
        }
    }

    pub async fn sync(&self) -> AppResult<PackageSyncSummary> {
        let mut summary = PackageSyncSummary::default();

        for (name, info) in self.registry.iter() {
            let wanted = NewPackage {
                package: name.to_string(),
                display: info.display.clone(),
                repo: self.helper.repository_name(name),
                stable: info.stable,
                deprecated: info.deprecated,
            };

            match self.packages.package(name).await? {
                None => {
                    self.packages.add_package(&wanted).await?;
                    tracing::info!(package = name, "Package added");
                    summary.added += 1;
                }
                Some(existing) if !wanted.matches(&existing) => {
                    self.packages.update_package(existing.id, &wanted).await?;
                    tracing::info!(package = name, "Package updated");
                    summary.updated += 1;
                }
                Some(_) => summary.unchanged += 1,
            }
        }

        Ok(summary)
    }

    pub async fn execute(&self, output: &ConsoleOutput) -> AppResult<()> {
        output.title("Syncing packages");
        let summary = self.sync().await?;
        output.success(&format!(
            "{} added, {} updated, {} unchanged",
            summary.added, summary.updated, summary.unchanged
        ));
        Ok(())
    }
}
