//! Console commands.

pub mod help;
pub mod package_sync;
pub mod packagist_downloads;
pub mod packagist_sync;
pub mod router_cache;
pub mod template_reset_cache;
pub mod update;

use std::sync::Arc;

pub use help::HelpCommand;
pub use package_sync::{PackageSyncCommand, PackageSyncSummary};
pub use packagist_downloads::PackagistDownloadsCommand;
pub use packagist_sync::{PackagistSyncCommand, PackagistSyncSummary};
pub use router_cache::RouterCacheCommand;
pub use template_reset_cache::TemplateResetCacheCommand;
pub use update::UpdateCommand;

use crate::cli::{CliCommand, ConsoleOutput};
use crate::error::AppResult;

/// Every registered command, addressed by `CliCommand`.
pub struct Console {
    pub help: Arc<HelpCommand>,
    pub package_sync: Arc<PackageSyncCommand>,
    pub packagist_sync: Arc<PackagistSyncCommand>,
    pub packagist_downloads: Arc<PackagistDownloadsCommand>,
    pub router_cache: Arc<RouterCacheCommand>,
    pub template_reset_cache: Arc<TemplateResetCacheCommand>,
    pub update: Arc<UpdateCommand>,
}

impl Console {
    pub async fn run(&self, command: CliCommand, output: &ConsoleOutput) -> AppResult<()> {
        match command {
            CliCommand::Help => self.help.execute(output).await,
            CliCommand::PackageSync => self.package_sync.execute(output).await,
            CliCommand::PackagistSync => self.packagist_sync.execute(output).await,
            CliCommand::PackagistDownloads => self.packagist_downloads.execute(output).await,
            CliCommand::RouterCache => self.router_cache.execute(output).await,
            CliCommand::TemplateResetCache => self.template_reset_cache.execute(output).await,
            CliCommand::Update => self.update.execute(output).await,
        }
    }
}
