//! # Menu Infrastructure
//! 
//! Persistence adapters for the menu repository port.

pub mod database;
pub mod factory;

pub use database::{create_pool, run_migrations, InMemoryMenuRepository, PgMenuRepository};
pub use factory::build_menu_repository;
