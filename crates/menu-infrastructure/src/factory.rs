//! Repository selection from configuration

use std::sync::Arc;

use anyhow::Context;
use menu_core::repositories::MenuRepository;
use menu_shared::config::{DatabaseSettings, StorageBackend};
use tracing::info;

use crate::database::{create_pool, run_migrations, InMemoryMenuRepository, PgMenuRepository};

/// Build the menu repository the configuration asks for
pub async fn build_menu_repository(
    settings: &DatabaseSettings,
) -> anyhow::Result<Arc<dyn MenuRepository>> {
    match settings.backend {
        StorageBackend::Memory => {
            info!("Using in-memory menu store (data is lost on exit)");
            Ok(Arc::new(InMemoryMenuRepository::new()))
        }
        StorageBackend::Postgres => {
            info!("Connecting to PostgreSQL...");
            let pool = create_pool(settings)
                .await
                .context("failed to connect to the menu database")?;
            info!("Database connection established.");

            if settings.run_migrations {
                run_migrations(&pool)
                    .await
                    .context("failed to apply database migrations")?;
            }

            Ok(Arc::new(PgMenuRepository::new(pool)))
        }
    }
}
