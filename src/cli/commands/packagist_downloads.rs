use std::sync::Arc;

use crate::cli::ConsoleOutput;
use crate::error::AppResult;
use crate::helper::PackagistHelper;

pub struct PackagistDownloadsCommand {
    packagist: Arc<PackagistHelper>,
}

impl PackagistDownloadsCommand {
    pub fn new(packagist: Arc<PackagistHelper>) -> Self {
        Self { packagist }
    }

    pub async fn execute(&self, output: &ConsoleOutput) -> AppResult<()> {
        output.title("Packagist downloads");

        let counts = self.packagist.download_counts().await?;
        let width = counts.keys().map(String::len).max().unwrap_or(0).max(5);
        for (name, count) in &counts {
            output.row(name, &count.to_string(), width);
        }
        output.row("total", &counts.values().sum::<u64>().to_string(), width);
        Ok(())
    }
}
