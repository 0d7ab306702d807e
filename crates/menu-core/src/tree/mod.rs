//! Tree engine: pure algorithms over menu rows linked by `parent_id`.
//!
//! Nothing in here touches persistence. Callers hand in the rows they
//! loaded and get shapes or answers back.

mod ancestry;
mod assembly;
mod ordering;

use thiserror::Error;
use uuid::Uuid;

pub use ancestry::{
    ancestor_path, collect_descendants, compute_depth, is_descendant, parent_lookup, ParentLookup,
};
pub use assembly::{build_tree, find_in_tree, flatten, subtree_height, MenuForest};
pub use ordering::{dense_assignments, validate_sibling_assignments};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("Cycle detected in menu ancestry at node {0}")]
    Cycle(Uuid),

    #[error("Menu node {0} is missing from the supplied rows")]
    UnknownNode(Uuid),

    #[error("Expected {expected} sibling assignments, got {actual}")]
    AssignmentCountMismatch { expected: usize, actual: usize },

    #[error("Menu {0} does not belong to this sibling group")]
    ForeignAssignment(Uuid),

    #[error("Menu {0} appears more than once in the reorder set")]
    DuplicateAssignment(Uuid),
}

impl TreeError {
    /// True for malformed stored data, as opposed to bad caller input
    pub fn is_integrity(&self) -> bool {
        matches!(self, TreeError::Cycle(_) | TreeError::UnknownNode(_))
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::Utc;
    use uuid::Uuid;

    use crate::domain::MenuNode;

    pub fn node(name: &str, parent_id: Option<Uuid>, order: i32) -> MenuNode {
        let created_at = Utc::now();
        MenuNode {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: None,
            icon: None,
            url: None,
            order,
            is_active: true,
            parent_id,
            children: Vec::new(),
            created_at,
            updated_at: created_at,
        }
    }
}
