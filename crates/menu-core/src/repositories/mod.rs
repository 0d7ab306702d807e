//! Repository traits (ports)

pub mod menu_repository;

pub use menu_repository::{AtomicOperation, MenuFilter, MenuRepository, ParentScope};

#[cfg(test)]
pub use menu_repository::MockMenuRepository;
