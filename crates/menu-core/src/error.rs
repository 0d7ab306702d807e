//! Domain errors

use thiserror::Error;
use uuid::Uuid;

use crate::tree::TreeError;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Menu with ID {0} not found")]
    MenuNotFound(Uuid),

    #[error("Parent menu with ID {0} not found")]
    ParentNotFound(Uuid),

    #[error("Menu with name \"{name}\" already exists at this level")]
    NameConflict { parent_id: Option<Uuid>, name: String },

    #[error("Menu cannot be its own parent")]
    SelfParent,

    #[error("Cannot set parent to a descendant menu (circular reference)")]
    CircularReference,

    #[error("Cannot delete menu \"{name}\" that has {count} children. Delete children first or move them to another parent.")]
    HasChildren { name: String, count: usize },

    #[error("Reorder rejected: {0}")]
    ReorderMismatch(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Menu tree integrity error: {0}")]
    Integrity(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Stable error category callers can branch on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Conflict,
    BadRequest,
    Internal,
}

impl DomainError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::MenuNotFound(_) | DomainError::ParentNotFound(_) => ErrorKind::NotFound,
            DomainError::NameConflict { .. } => ErrorKind::Conflict,
            DomainError::SelfParent
            | DomainError::CircularReference
            | DomainError::HasChildren { .. }
            | DomainError::ReorderMismatch(_)
            | DomainError::ValidationError(_) => ErrorKind::BadRequest,
            DomainError::Integrity(_)
            | DomainError::DatabaseError(_)
            | DomainError::InternalError(_) => ErrorKind::Internal,
        }
    }
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(errors: validator::ValidationErrors) -> Self {
        DomainError::ValidationError(errors.to_string())
    }
}

impl From<TreeError> for DomainError {
    fn from(error: TreeError) -> Self {
        if error.is_integrity() {
            DomainError::Integrity(error.to_string())
        } else {
            DomainError::ReorderMismatch(error.to_string())
        }
    }
}
