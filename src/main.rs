use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use framework_website::config::load_config_or_default;
use framework_website::lifecycle::signals;
use framework_website::model::Database;
use framework_website::observability::{logging, metrics};
use framework_website::renderer::{Renderer, TeraRenderer};
use framework_website::{bootstrap, HttpServer, Shutdown, WebApplication};

#[derive(Parser)]
#[command(name = "framework-website", version)]
#[command(about = "Framework project website", long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = load_config_or_default(&args.config)?;

    logging::init_logging(&config.logging);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "framework-website starting");
    tracing::info!(
        bind_address = %config.server.bind_address,
        debug = config.debug,
        templates = %config.templates.path,
        "Configuration loaded"
    );

    if config.metrics.enabled {
        match config.metrics.address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.metrics.address,
                "Failed to parse metrics address"
            ),
        }
    }

    let bind_address = config.server.bind_address.clone();
    let container = bootstrap(config);

    container.get::<Database>()?.migrate().await?;
    let app = container.get::<WebApplication>()?;
    let server = HttpServer::new(app.clone(), app.config());

    let listener = TcpListener::bind(&bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Arc::new(Shutdown::new());
    let receiver = shutdown.subscribe();
    tokio::spawn({
        let shutdown = shutdown.clone();
        async move {
            signals::shutdown_signal().await;
            shutdown.trigger();
        }
    });

    spawn_template_reload(container.get::<TeraRenderer>()?);

    server.run(listener, receiver).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Reset the template cache on every SIGHUP.
#[cfg(unix)]
fn spawn_template_reload(renderer: Arc<TeraRenderer>) {
    let Some(mut hangup) = signals::hangup() else {
        return;
    };
    tokio::spawn(async move {
        while hangup.recv().await.is_some() {
            match renderer.reset_cache() {
                Ok(count) => tracing::info!(templates = count, "Template cache reset"),
                Err(e) => tracing::error!(error = %e, "Template cache reset failed"),
            }
        }
    });
}

#[cfg(not(unix))]
fn spawn_template_reload(_renderer: Arc<TeraRenderer>) {}
