//! Domain services (business logic)

pub mod menu_service;
pub mod seed;

pub use menu_service::MenuService;
pub use seed::{SeedMenu, DEFAULT_MENUS};
