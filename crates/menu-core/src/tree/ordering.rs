//! Sibling-order checks for reorder batches.

use std::collections::HashSet;

use uuid::Uuid;

use super::TreeError;
use crate::domain::{MenuNode, OrderAssignment};

/// The assignment ids must be exactly the sibling ids: no duplicates,
/// nothing foreign, nothing missing.
pub fn validate_sibling_assignments(
    siblings: &[MenuNode],
    assignments: &[OrderAssignment],
) -> Result<(), TreeError> {
    let sibling_ids: HashSet<Uuid> = siblings.iter().map(|n| n.id).collect();
    let mut seen = HashSet::with_capacity(assignments.len());

    for assignment in assignments {
        if !seen.insert(assignment.id) {
            return Err(TreeError::DuplicateAssignment(assignment.id));
        }
        if !sibling_ids.contains(&assignment.id) {
            return Err(TreeError::ForeignAssignment(assignment.id));
        }
    }

    if seen.len() != sibling_ids.len() {
        return Err(TreeError::AssignmentCountMismatch {
            expected: sibling_ids.len(),
            actual: assignments.len(),
        });
    }

    Ok(())
}

/// Dense 0..n-1 orders following the given id sequence
pub fn dense_assignments(ids: &[Uuid]) -> Vec<OrderAssignment> {
    ids.iter()
        .enumerate()
        .map(|(idx, &id)| OrderAssignment {
            id,
            order: i32::try_from(idx).unwrap_or(i32::MAX),
        })
        .collect()
}
