use std::path::PathBuf;

use crate::cli::ConsoleOutput;
use crate::error::AppResult;
use crate::routing::{compiled, website_routes};

/// Writes the static route table to the compiled router artifact.
pub struct RouterCacheCommand {
    path: PathBuf,
}

impl RouterCacheCommand {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub async fn execute(&self, output: &ConsoleOutput) -> AppResult<()> {
        output.title("Caching router");

        let router = website_routes()?;
        compiled::store(&router, &self.path)?;

        output.success(&format!(
            "{} routes written to {}",
            router.len(),
            self.path.display()
        ));
        Ok(())
    }
}
