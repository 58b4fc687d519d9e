use clap::Parser;

use framework_website::cli::{CliApplication, CliArgs, CliCommand, CliOptions};
use framework_website::config::load_config_or_default;
use framework_website::model::Database;
use framework_website::observability::logging;
use framework_website::{bootstrap, AppError};

#[tokio::main]
async fn main() {
    let options = CliOptions::from(CliArgs::parse());

    if let Err(e) = run(options).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(options: CliOptions) -> Result<(), AppError> {
    let config = load_config_or_default(&options.config_path)?;
    logging::init_logging(&config.logging);

    let command = options.command;
    let mut container = bootstrap(config);
    container.set(options);

    if !matches!(command, None | Some(CliCommand::Help)) {
        container.get::<Database>()?.migrate().await?;
    }
    container.get::<CliApplication>()?.run(command).await
}
