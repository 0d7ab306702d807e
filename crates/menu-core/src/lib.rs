//! # Menu Core
//! 
//! Domain entity, tree engine, repository port, and menu service.

pub mod domain;
pub mod tree;
pub mod services;
pub mod repositories;
pub mod error;

// Re-export domain entities
pub use domain::*;
pub use error::{DomainError, ErrorKind};
pub use services::MenuService;
