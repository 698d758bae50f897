//! # Meridian Server
//!
//! Entry point: load configuration, initialise logging, wire the configured
//! storage backend and serve the REST API until shutdown.

use meridian_config::ConfigLoader;
use meridian_core::MeridianResult;
use meridian_server::{logging::init_logging, server::Application, startup};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        // Logging may not be initialised if configuration failed.
        eprintln!("Application error: {e}");
        error!("Application error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> MeridianResult<()> {
    let config_loader = ConfigLoader::from_default_location()?;
    let config = config_loader.get().await;

    init_logging(&config.observability)?;
    startup::print_banner();
    info!("Starting {} v{}", config.app.name, env!("CARGO_PKG_VERSION"));

    let app = Application::build(&config).await?;
    startup::print_startup_info(&config);
    app.serve(&config).await
}
