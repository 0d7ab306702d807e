//! Replace every menu in the configured store with the default menu set

use tracing::{info, warn};

use menu_core::MenuService;
use menu_infrastructure::build_menu_repository;
use menu_shared::config::{AppConfig, StorageBackend};
use menu_shared::telemetry::init_telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    let _log_guard = init_telemetry(&config.log)?;

    if config.database.backend == StorageBackend::Memory {
        warn!("Seeding the in-memory store; the menus vanish when this process exits");
    }

    let service = MenuService::new(build_menu_repository(&config.database).await?);
    let created = service.seed_defaults().await?;

    info!("Seeding completed: {} menus created", created);
    Ok(())
}
