//! Ancestor and descendant queries over parent links.
//!
//! Every walk remembers the ids it has already seen, so malformed cyclic
//! data ends in `TreeError::Cycle` instead of an endless loop.

use std::collections::{HashMap, HashSet, VecDeque};

use uuid::Uuid;

use super::TreeError;
use crate::domain::MenuNode;

/// node id -> parent id
pub type ParentLookup = HashMap<Uuid, Option<Uuid>>;

pub fn parent_lookup(nodes: &[MenuNode]) -> ParentLookup {
    nodes.iter().map(|n| (n.id, n.parent_id)).collect()
}

/// Ancestor ids of `id`, root first, excluding `id` itself
pub fn ancestor_path(id: Uuid, lookup: &ParentLookup) -> Result<Vec<Uuid>, TreeError> {
    let mut seen = HashSet::from([id]);
    let mut path = Vec::new();
    let mut current = *lookup.get(&id).ok_or(TreeError::UnknownNode(id))?;

    while let Some(parent) = current {
        if !seen.insert(parent) {
            return Err(TreeError::Cycle(parent));
        }
        path.push(parent);
        current = *lookup.get(&parent).ok_or(TreeError::UnknownNode(parent))?;
    }

    path.reverse();
    Ok(path)
}

/// 0 for a root, otherwise one more than the parent's depth
pub fn compute_depth(id: Uuid, lookup: &ParentLookup) -> Result<usize, TreeError> {
    ancestor_path(id, lookup).map(|path| path.len())
}

/// Every id reachable downwards from `id`, not including `id`
pub fn collect_descendants(id: Uuid, nodes: &[MenuNode]) -> Result<HashSet<Uuid>, TreeError> {
    let mut children: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
    for node in nodes {
        if let Some(parent_id) = node.parent_id {
            children.entry(parent_id).or_default().push(node.id);
        }
    }

    let mut found = HashSet::new();
    let mut queue = VecDeque::from([id]);
    while let Some(current) = queue.pop_front() {
        for &child in children.get(&current).into_iter().flatten() {
            // a row has one parent, so meeting an id twice means a loop
            if child == id || !found.insert(child) {
                return Err(TreeError::Cycle(child));
            }
            queue.push_back(child);
        }
    }

    Ok(found)
}

pub fn is_descendant(id: Uuid, candidate: Uuid, nodes: &[MenuNode]) -> Result<bool, TreeError> {
    Ok(collect_descendants(id, nodes)?.contains(&candidate))
}
