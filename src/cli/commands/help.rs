use clap::CommandFactory;

use crate::cli::{CliArgs, ConsoleOutput};
use crate::error::AppResult;

/// Lists every command with its description.
#[derive(Debug, Default)]
pub struct HelpCommand;

impl HelpCommand {
    pub fn new() -> Self {
        Self
    }

    pub async fn execute(&self, output: &ConsoleOutput) -> AppResult<()> {
        let command = CliArgs::command();
        let subcommands: Vec<_> = command
            .get_subcommands()
            .map(|c| {
                let about = c.get_about().map(|a| a.to_string()).unwrap_or_default();
                (c.get_name().to_string(), about)
            })
            .collect();
        let width = subcommands.iter().map(|(name, _)| name.len()).max().unwrap_or(0);

        output.title("Framework Website CLI");
        output.line("");
        output.line("Usage: website-cli [--config <path>] [--no-colors] <command>");
        output.line("");
        output.title("Available commands:");
        for (name, about) in &subcommands {
            output.row(name, about, width);
        }
        Ok(())
    }
}
