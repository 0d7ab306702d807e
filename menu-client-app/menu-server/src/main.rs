use std::net::SocketAddr;

use tracing::{error, info};

use menu_api::{build_router, AppState};
use menu_infrastructure::build_menu_repository;
use menu_shared::config::AppConfig;
use menu_shared::telemetry::init_telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load()?;

    // Initialize telemetry; the guard flushes buffered logs on exit
    let _log_guard = init_telemetry(&config.log)?;

    info!("{} starting ({})...", config.app.name, config.app.env);

    // Repository backend
    let menu_repo = match build_menu_repository(&config.database).await {
        Ok(repo) => repo,
        Err(e) => {
            error!("Failed to initialize menu storage: {:#}", e);
            return Err(e);
        }
    };

    // Build router
    let state = AppState::new(menu_repo, config.clone());
    let app = build_router(state);

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
