use std::sync::Arc;

use crate::cli::ConsoleOutput;
use crate::error::AppResult;
use crate::renderer::Renderer;

pub struct TemplateResetCacheCommand {
    renderer: Arc<dyn Renderer>,
}

impl TemplateResetCacheCommand {
    pub fn new(renderer: Arc<dyn Renderer>) -> Self {
        Self { renderer }
    }

    pub async fn execute(&self, output: &ConsoleOutput) -> AppResult<()> {
        output.title("Resetting template cache");
        let count = self.renderer.reset_cache()?;
        output.success(&format!("{count} templates parsed"));
        Ok(())
    }
}
