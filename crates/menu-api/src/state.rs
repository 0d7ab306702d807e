use std::sync::Arc;

use menu_core::repositories::MenuRepository;
use menu_core::MenuService;
use menu_shared::config::AppConfig;

pub type SharedMenuService = Arc<MenuService<dyn MenuRepository>>;

#[derive(Clone)]
pub struct AppState {
    pub menu_service: SharedMenuService,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(menu_repo: Arc<dyn MenuRepository>, config: AppConfig) -> Self {
        Self {
            menu_service: Arc::new(MenuService::new(menu_repo)),
            config,
        }
    }
}
