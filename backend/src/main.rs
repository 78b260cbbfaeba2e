use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod domain;
mod error;
mod rest;
mod storage;

use config::AppConfig;
use domain::TicketLogService;
use rest::AppState;
use storage::ManifestStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging, RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env()?;
    info!("Serving static files from {}", config.static_dir.display());
    info!("Ticket log at {}", config.manifest_path.display());

    let store = ManifestStore::new(&config.manifest_path);
    let app_state = AppState::new(TicketLogService::new(store));
    let app = rest::create_router(app_state, &config);

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server running at {}", config.display_url());

    axum::serve(listener, app).await?;

    Ok(())
}
