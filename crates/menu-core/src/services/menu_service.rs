// ============================================================================
// Menu Core - Menu Service
// File: crates/menu-core/src/services/menu_service.rs
// ============================================================================
//! Menu service: every mutation of the menu tree goes through here

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, error, info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::domain::{CreateMenuInput, MenuNode, MenuPath, OrderAssignment, UpdateMenuInput};
use crate::error::DomainError;
use crate::repositories::{AtomicOperation, MenuFilter, MenuRepository};
use crate::tree::{self, MenuForest, TreeError};

/// Menu service enforcing the tree invariants on top of a repository
pub struct MenuService<R: MenuRepository + ?Sized> {
    menu_repo: Arc<R>,
}

impl<R: MenuRepository + ?Sized> MenuService<R> {
    pub fn new(menu_repo: Arc<R>) -> Self {
        Self { menu_repo }
    }

    /// Create a menu under an existing parent, or at the root
    pub async fn create(&self, input: CreateMenuInput) -> Result<MenuNode, DomainError> {
        let input = input.normalized();
        input.validate()?;

        // 1. Parent must exist
        if let Some(parent_id) = input.parent_id {
            self.require_parent(parent_id).await?;
        }

        // 2. Name must be free at this level
        self.ensure_unique_name(input.parent_id, &input.name, None).await?;

        // 3. Persist
        let menu = MenuNode::new(input);
        let created = self.menu_repo.create(&menu).await?;

        info!("Menu created: {} ({})", created.name, created.id);
        Ok(created)
    }

    /// All rows, each with one level of children
    pub async fn list_flat(&self) -> Result<Vec<MenuNode>, DomainError> {
        let rows = self.menu_repo.find_many(&MenuFilter::all()).await?;
        Ok(MenuForest::new(&rows).flat_with_children())
    }

    /// The whole forest, nested to any depth
    pub async fn list_tree(&self) -> Result<Vec<MenuNode>, DomainError> {
        let rows = self.menu_repo.find_many(&MenuFilter::all()).await?;
        Ok(tree::build_tree(&rows))
    }

    pub async fn get_one(&self, id: Uuid) -> Result<MenuNode, DomainError> {
        let menu = self.require_menu(id).await?;
        self.with_children(menu).await
    }

    /// Ancestors of a menu, root first, with its depth and the number of
    /// levels below it
    pub async fn get_path(&self, id: Uuid) -> Result<MenuPath, DomainError> {
        self.require_menu(id).await?;
        let rows = self.menu_repo.find_many(&MenuFilter::all()).await?;

        let ancestor_ids =
            tree::ancestor_path(id, &tree::parent_lookup(&rows)).map_err(integrity_failure)?;
        let forest = tree::build_tree(&rows);
        let height = tree::find_in_tree(&forest, id)
            .map(tree::subtree_height)
            .unwrap_or(0);

        let mut by_id: HashMap<Uuid, MenuNode> = rows.into_iter().map(|m| (m.id, m)).collect();
        let ancestors: Vec<MenuNode> = ancestor_ids
            .iter()
            .filter_map(|ancestor| by_id.remove(ancestor))
            .collect();

        Ok(MenuPath {
            depth: ancestors.len(),
            height,
            ancestors,
        })
    }

    /// Patch a menu. Reparenting is checked for self-reference, cycles and
    /// a missing parent before anything is written.
    pub async fn update(&self, id: Uuid, patch: UpdateMenuInput) -> Result<MenuNode, DomainError> {
        let patch = patch.normalized();
        patch.validate()?;

        let existing = self.require_menu(id).await?;

        if let Some(Some(new_parent)) = patch.parent_id {
            if new_parent == id {
                warn!("Rejected update of {}: menu cannot be its own parent", id);
                return Err(DomainError::SelfParent);
            }

            let rows = self.menu_repo.find_many(&MenuFilter::all()).await?;
            if tree::is_descendant(id, new_parent, &rows).map_err(integrity_failure)? {
                warn!("Rejected update of {}: {} is one of its descendants", id, new_parent);
                return Err(DomainError::CircularReference);
            }

            self.require_parent(new_parent).await?;
        }

        let effective_parent = patch.parent_id.unwrap_or(existing.parent_id);
        let parent_changed = effective_parent != existing.parent_id;
        if patch.name.is_some() || parent_changed {
            let name = patch.name.as_deref().unwrap_or(&existing.name);
            self.ensure_unique_name(effective_parent, name, Some(id)).await?;
        }

        let mut merged = existing;
        merged.apply(patch);
        let saved = self.menu_repo.update(&merged).await?;

        info!("Menu updated: {} ({})", saved.name, saved.id);
        self.with_children(saved).await
    }

    /// Delete a childless menu
    pub async fn remove(&self, id: Uuid) -> Result<String, DomainError> {
        let menu = self.require_menu(id).await?;

        let children = self.menu_repo.find_many(&MenuFilter::children_of(Some(id))).await?;
        if !children.is_empty() {
            warn!("Rejected delete of {}: {} children", id, children.len());
            return Err(DomainError::HasChildren {
                name: menu.name,
                count: children.len(),
            });
        }

        self.menu_repo.delete(&id).await?;

        info!("Menu deleted: {} ({})", menu.name, id);
        Ok(format!("Menu \"{}\" deleted successfully", menu.name))
    }

    /// Same validation path as `update`; `None` moves the menu to the root
    pub async fn move_node(&self, id: Uuid, new_parent: Option<Uuid>) -> Result<MenuNode, DomainError> {
        self.update(id, UpdateMenuInput::reparent(new_parent)).await
    }

    /// Assign new orders to one complete sibling group in a single batch
    pub async fn reorder_siblings(
        &self,
        parent_id: Option<Uuid>,
        assignments: Vec<OrderAssignment>,
    ) -> Result<Vec<MenuNode>, DomainError> {
        if let Some(bad) = assignments.iter().find(|a| a.order < 0) {
            return Err(DomainError::ValidationError(format!(
                "Order must be 0 or greater (menu {})",
                bad.id
            )));
        }

        let siblings = self.menu_repo.find_many(&MenuFilter::children_of(parent_id)).await?;
        tree::validate_sibling_assignments(&siblings, &assignments).map_err(|e| {
            warn!("Rejected reorder under {:?}: {}", parent_id, e);
            DomainError::from(e)
        })?;

        let operations = assignments
            .iter()
            .map(|a| AtomicOperation::SetOrder { id: a.id, order: a.order })
            .collect();
        self.menu_repo.run_atomic(operations).await?;

        info!("Reordered {} menus under {:?}", assignments.len(), parent_id);
        let rows = self.menu_repo.find_many(&MenuFilter::all()).await?;
        Ok(MenuForest::new(&rows).siblings_with_children(parent_id))
    }

    /// Reorder using the position in `ordered_ids` as a dense 0..n-1 order
    pub async fn reorder_dense(
        &self,
        parent_id: Option<Uuid>,
        ordered_ids: &[Uuid],
    ) -> Result<Vec<MenuNode>, DomainError> {
        self.reorder_siblings(parent_id, tree::dense_assignments(ordered_ids)).await
    }

    /// Delete every menu, leaves before their parents, in one batch
    pub async fn clear_all(&self) -> Result<usize, DomainError> {
        let rows = self.menu_repo.find_many(&MenuFilter::all()).await?;
        let ordered = tree::flatten(&tree::build_tree(&rows));
        if ordered.len() != rows.len() {
            error!(
                "Refusing to clear menus: {} of {} rows unreachable from a root",
                rows.len() - ordered.len(),
                rows.len()
            );
            return Err(DomainError::Integrity(
                "menu rows unreachable from a root".to_string(),
            ));
        }

        let operations: Vec<AtomicOperation> = ordered
            .iter()
            .rev()
            .map(|m| AtomicOperation::Delete(m.id))
            .collect();
        let count = operations.len();
        self.menu_repo.run_atomic(operations).await?;

        info!("Cleared {} menus", count);
        Ok(count)
    }

    /// Readiness of the underlying store
    pub async fn ping(&self) -> Result<(), DomainError> {
        self.menu_repo.ping().await
    }

    async fn require_menu(&self, id: Uuid) -> Result<MenuNode, DomainError> {
        self.menu_repo.find_by_id(&id).await?.ok_or_else(|| {
            debug!("Menu not found: {}", id);
            DomainError::MenuNotFound(id)
        })
    }

    async fn require_parent(&self, parent_id: Uuid) -> Result<MenuNode, DomainError> {
        self.menu_repo.find_by_id(&parent_id).await?.ok_or_else(|| {
            warn!("Parent menu not found: {}", parent_id);
            DomainError::ParentNotFound(parent_id)
        })
    }

    async fn ensure_unique_name(
        &self,
        parent_id: Option<Uuid>,
        name: &str,
        exclude_id: Option<Uuid>,
    ) -> Result<(), DomainError> {
        let clashes = self
            .menu_repo
            .find_many(&MenuFilter::sibling_named(parent_id, name, exclude_id))
            .await?;

        if !clashes.is_empty() {
            warn!("Menu name \"{}\" already taken under {:?}", name, parent_id);
            return Err(DomainError::NameConflict {
                parent_id,
                name: name.to_string(),
            });
        }
        Ok(())
    }

    async fn with_children(&self, mut menu: MenuNode) -> Result<MenuNode, DomainError> {
        menu.children = self
            .menu_repo
            .find_many(&MenuFilter::children_of(Some(menu.id)))
            .await?;
        Ok(menu)
    }
}

fn integrity_failure(err: TreeError) -> DomainError {
    error!("Menu tree integrity check failed: {}", err);
    DomainError::from(err)
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;

    use super::*;
    use crate::repositories::MockMenuRepository;
    use crate::tree::fixtures::node;
    use crate::ErrorKind;

    fn service(repo: MockMenuRepository) -> MenuService<MockMenuRepository> {
        MenuService::new(Arc::new(repo))
    }

    #[tokio::test]
    async fn test_create_with_missing_parent() {
        let parent_id = Uuid::new_v4();
        let mut repo = MockMenuRepository::new();
        repo.expect_find_by_id()
            .with(eq(parent_id))
            .returning(|_| Ok(None));
        repo.expect_create().never();

        let err = service(repo)
            .create(CreateMenuInput::named("Orphan").under(parent_id))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::ParentNotFound(id) if id == parent_id));
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_input_before_any_read() {
        let mut repo = MockMenuRepository::new();
        repo.expect_find_by_id().never();
        repo.expect_find_many().never();

        let err = service(repo)
            .create(CreateMenuInput::named("   "))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_create_name_conflict_at_root() {
        let existing = node("Settings", None, 0);
        let mut repo = MockMenuRepository::new();
        repo.expect_find_many()
            .withf(|f| f.name.as_deref() == Some("Settings") && f.parent == crate::repositories::ParentScope::Root)
            .returning(move |_| Ok(vec![existing.clone()]));
        repo.expect_create().never();

        let err = service(repo)
            .create(CreateMenuInput::named("Settings"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_update_self_parent_is_rejected_without_writes() {
        let menu = node("Settings", None, 0);
        let id = menu.id;
        let mut repo = MockMenuRepository::new();
        repo.expect_find_by_id().returning(move |_| Ok(Some(menu.clone())));
        repo.expect_update().never();

        let err = service(repo)
            .update(id, UpdateMenuInput::reparent(Some(id)))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::SelfParent));
    }

    #[tokio::test]
    async fn test_update_on_cyclic_rows_surfaces_integrity_error() {
        let mut a = node("A", None, 0);
        let b = node("B", Some(a.id), 0);
        a.parent_id = Some(b.id);
        let target = node("Target", None, 0);
        let (a_id, target_id) = (a.id, target.id);
        let rows = vec![a.clone(), b.clone(), target.clone()];

        let mut repo = MockMenuRepository::new();
        repo.expect_find_by_id().returning(move |_| Ok(Some(a.clone())));
        repo.expect_find_many().returning(move |_| Ok(rows.clone()));
        repo.expect_update().never();

        let err = service(repo)
            .update(a_id, UpdateMenuInput::reparent(Some(target_id)))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Integrity(_)));
        assert_eq!(err.kind(), ErrorKind::Internal);
    }

    #[tokio::test]
    async fn test_reorder_failure_propagates_from_batch() {
        let x = node("X", None, 0);
        let y = node("Y", None, 1);
        let siblings = vec![x.clone(), y.clone()];

        let mut repo = MockMenuRepository::new();
        repo.expect_find_many().returning(move |_| Ok(siblings.clone()));
        repo.expect_run_atomic()
            .times(1)
            .returning(|_| Err(DomainError::DatabaseError("connection reset".to_string())));

        let err = service(repo)
            .reorder_siblings(
                None,
                vec![
                    OrderAssignment { id: x.id, order: 1 },
                    OrderAssignment { id: y.id, order: 0 },
                ],
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::DatabaseError(_)));
    }

    #[tokio::test]
    async fn test_reorder_rejects_negative_order() {
        let mut repo = MockMenuRepository::new();
        repo.expect_find_many().never();
        repo.expect_run_atomic().never();

        let err = service(repo)
            .reorder_siblings(None, vec![OrderAssignment { id: Uuid::new_v4(), order: -1 }])
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BadRequest);
    }

    #[tokio::test]
    async fn test_clear_all_deletes_leaves_first() {
        let settings = node("Settings", None, 0);
        let general = node("General", Some(settings.id), 0);
        let rows = vec![settings.clone(), general.clone()];
        let expected = vec![
            AtomicOperation::Delete(general.id),
            AtomicOperation::Delete(settings.id),
        ];

        let mut repo = MockMenuRepository::new();
        repo.expect_find_many().returning(move |_| Ok(rows.clone()));
        repo.expect_run_atomic()
            .with(eq(expected))
            .times(1)
            .returning(|_| Ok(()));

        assert_eq!(service(repo).clear_all().await.unwrap(), 2);
    }
}
