//! Maintenance console.
//!
//! # Data Flow
//! ```text
//! argv → CliArgs (clap) → CliOptions (registered in the container)
//!     → CliApplication::run
//!     → Console::run(CliCommand)
//!     → command execute(&ConsoleOutput)
//! ```

pub mod commands;
pub mod output;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};

pub use commands::Console;
pub use output::{CapturedOutput, ConsoleOutput};

use crate::config::WebsiteConfig;
use crate::error::AppResult;

#[derive(Parser, Debug)]
#[command(name = "website-cli", version)]
#[command(about = "Maintenance commands for the framework website", long_about = None)]
#[command(disable_help_subcommand = true)]
pub struct CliArgs {
    /// Path to the configuration file
    #[arg(long, global = true, default_value = "config.toml")]
    pub config: PathBuf,

    /// Disable ANSI colors in output
    #[arg(long, global = true)]
    pub no_colors: bool,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliCommand {
    /// List the available commands
    #[command(name = "help")]
    Help,
    /// Sync the package manifest into the database
    #[command(name = "package:sync")]
    PackageSync,
    /// Record new releases from Packagist
    #[command(name = "packagist:sync")]
    PackagistSync,
    /// Show Packagist download totals
    #[command(name = "packagist:downloads")]
    PackagistDownloads,
    /// Write the compiled router artifact
    #[command(name = "router:cache")]
    RouterCache,
    /// Re-parse the template cache
    #[command(name = "template:reset-cache")]
    TemplateResetCache,
    /// Run every sync and cache task in order
    #[command(name = "update")]
    Update,
}

impl CliCommand {
    pub fn name(&self) -> &'static str {
        match self {
            CliCommand::Help => "help",
            CliCommand::PackageSync => "package:sync",
            CliCommand::PackagistSync => "packagist:sync",
            CliCommand::PackagistDownloads => "packagist:downloads",
            CliCommand::RouterCache => "router:cache",
            CliCommand::TemplateResetCache => "template:reset-cache",
            CliCommand::Update => "update",
        }
    }
}

/// Parsed command line, as seen by the container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliOptions {
    pub config_path: PathBuf,
    pub no_colors: bool,
    pub command: Option<CliCommand>,
}

impl From<CliArgs> for CliOptions {
    fn from(args: CliArgs) -> Self {
        Self {
            config_path: args.config,
            no_colors: args.no_colors,
            command: args.command,
        }
    }
}

pub struct CliApplication {
    console: Arc<Console>,
    output: Arc<ConsoleOutput>,
    config: Arc<WebsiteConfig>,
}

impl CliApplication {
    pub fn new(
        console: Arc<Console>,
        output: Arc<ConsoleOutput>,
        config: Arc<WebsiteConfig>,
    ) -> Self {
        Self {
            console,
            output,
            config,
        }
    }

    pub fn output(&self) -> &ConsoleOutput {
        &self.output
    }

    /// Run `command`, or `help` when none was given.
    pub async fn run(&self, command: Option<CliCommand>) -> AppResult<()> {
        let command = command.unwrap_or(CliCommand::Help);
        tracing::debug!(
            command = command.name(),
            debug = self.config.debug,
            "Running console command"
        );

        self.console.run(command, &self.output).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_names_match_clap() {
        let args = CliArgs::try_parse_from(["website-cli", "packagist:sync", "--no-colors"]).unwrap();
        assert_eq!(args.command, Some(CliCommand::PackagistSync));
        assert!(args.no_colors);
        assert_eq!(args.config, PathBuf::from("config.toml"));

        let args = CliArgs::try_parse_from(["website-cli", "--config", "a.toml", "help"]).unwrap();
        assert_eq!(args.command, Some(CliCommand::Help));
        assert_eq!(args.config, PathBuf::from("a.toml"));
    }

    #[test]
    fn test_no_command() {
        let options = CliOptions::from(CliArgs::try_parse_from(["website-cli"]).unwrap());
        assert_eq!(options.command, None);
        assert!(!options.no_colors);
    }

    #[test]
    fn test_unknown_command() {
        assert!(CliArgs::try_parse_from(["website-cli", "cache:clear"]).is_err());
    }
}
