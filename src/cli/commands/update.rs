use std::sync::Arc;

use super::{PackageSyncCommand, PackagistSyncCommand, RouterCacheCommand, TemplateResetCacheCommand};
use crate::cli::ConsoleOutput;
use crate::error::AppResult;

/// Runs the sync and cache commands in sequence, stopping at the first failure.
pub struct UpdateCommand {
    package_sync: Arc<PackageSyncCommand>,
    packagist_sync: Arc<PackagistSyncCommand>,
    router_cache: Arc<RouterCacheCommand>,
    template_reset_cache: Arc<TemplateResetCacheCommand>,
}

impl UpdateCommand {
    pub fn new(
        package_sync: Arc<PackageSyncCommand>,
        packagist_sync: Arc<PackagistSyncCommand>,
        router_cache: Arc<RouterCacheCommand>,
        template_reset_cache: Arc<TemplateResetCacheCommand>,
    ) -> Self {
        Self {
            package_sync,
            packagist_sync,
            router_cache,
            template_reset_cache,
        }
    }

    pub async fn execute(&self, output: &ConsoleOutput) -> AppResult<()> {
        self.package_sync.execute(output).await?;
        self.packagist_sync.execute(output).await?;
        self.router_cache.execute(output).await?;
        self.template_reset_cache.execute(output).await?;
        output.success("Update complete");
        Ok(())
    }
}
