//! Turning flat parent-pointer rows into nested forests and back.

use std::collections::HashMap;

use tracing::warn;
use uuid::Uuid;

use crate::domain::MenuNode;

/// One canonical in-memory view of a set of menu rows.
///
/// Rows are kept sorted by `order`. The sort is stable, so rows sharing an
/// `order` keep the sequence they were supplied in (repositories deliver
/// insertion order). Both response shapes are projections of this view.
#[derive(Debug, Clone, Default)]
pub struct MenuForest {
    nodes: Vec<MenuNode>,
    roots: Vec<usize>,
    children: HashMap<Uuid, Vec<usize>>,
}

impl MenuForest {
    pub fn new(flat: &[MenuNode]) -> Self {
        let mut nodes: Vec<MenuNode> = flat.iter().map(MenuNode::detached).collect();
        nodes.sort_by_key(|n| n.order);

        let mut roots = Vec::new();
        let mut children: HashMap<Uuid, Vec<usize>> = HashMap::new();
        for (idx, node) in nodes.iter().enumerate() {
            match node.parent_id {
                None => roots.push(idx),
                Some(parent_id) => children.entry(parent_id).or_default().push(idx),
            }
        }

        Self { nodes, roots, children }
    }

    /// Fully nested forest, unbounded depth.
    ///
    /// Rows whose parent is missing, or that hang off a parent cycle, cannot
    /// be reached from a root and are left out.
    pub fn to_nested(&self) -> Vec<MenuNode> {
        let mut slots: Vec<Option<MenuNode>> = self.nodes.iter().cloned().map(Some).collect();
        let forest: Vec<MenuNode> = self
            .roots
            .iter()
            .filter_map(|&idx| self.take_subtree(&mut slots, idx))
            .collect();

        let unreachable = slots.iter().filter(|s| s.is_some()).count();
        if unreachable > 0 {
            warn!(
                "{} menu rows are not reachable from a root (orphaned or cyclic parent links)",
                unreachable
            );
        }

        forest
    }

    /// Every row with exactly one level of children attached
    pub fn flat_with_children(&self) -> Vec<MenuNode> {
        self.nodes
            .iter()
            .map(|node| MenuNode {
                children: self.child_rows(node.id),
                ..node.clone()
            })
            .collect()
    }

    /// Direct children of `parent_id` (the root group for `None`), one level deep
    pub fn siblings_with_children(&self, parent_id: Option<Uuid>) -> Vec<MenuNode> {
        self.flat_with_children()
            .into_iter()
            .filter(|n| n.parent_id == parent_id)
            .collect()
    }

    fn child_rows(&self, id: Uuid) -> Vec<MenuNode> {
        self.children
            .get(&id)
            .map(|idxs| idxs.iter().map(|&i| self.nodes[i].clone()).collect())
            .unwrap_or_default()
    }

    // Each slot is taken once, so a malformed self-link cannot recurse forever.
    fn take_subtree(&self, slots: &mut [Option<MenuNode>], idx: usize) -> Option<MenuNode> {
        let mut node = slots[idx].take()?;
        if let Some(child_idxs) = self.children.get(&node.id) {
            node.children = child_idxs
                .iter()
                .filter_map(|&child| self.take_subtree(slots, child))
                .collect();
        }
        Some(node)
    }
}

/// Nest flat rows into root nodes with `children` filled recursively
pub fn build_tree(flat: &[MenuNode]) -> Vec<MenuNode> {
    MenuForest::new(flat).to_nested()
}

/// Pre-order walk of a nested forest. The returned rows carry no children.
pub fn flatten(roots: &[MenuNode]) -> Vec<MenuNode> {
    let mut out = Vec::new();
    let mut stack: Vec<&MenuNode> = roots.iter().rev().collect();
    while let Some(node) = stack.pop() {
        out.push(node.detached());
        stack.extend(node.children.iter().rev());
    }
    out
}

/// Levels below `node`: 0 for a leaf
pub fn subtree_height(node: &MenuNode) -> usize {
    node.children
        .iter()
        .map(|child| 1 + subtree_height(child))
        .max()
        .unwrap_or(0)
}

pub fn find_in_tree(roots: &[MenuNode], id: Uuid) -> Option<&MenuNode> {
    roots.iter().find_map(|node| {
        if node.id == id {
            Some(node)
        } else {
            find_in_tree(&node.children, id)
        }
    })
}
