// ============================================================================
// Menu Infrastructure - In-Memory Menu Repository
// File: crates/menu-infrastructure/src/database/memory/menu_repo_impl.rs
// ============================================================================
//! Process-local menu store.
//!
//! Rows live in insertion order behind one `RwLock`. It enforces the same
//! storage constraints as the PostgreSQL schema (parent must exist, sibling
//! names unique, no delete while children remain) so services behave alike
//! on either backend.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use menu_core::domain::MenuNode;
use menu_core::error::DomainError;
use menu_core::repositories::{AtomicOperation, MenuFilter, MenuRepository};

#[derive(Default)]
pub struct InMemoryMenuRepository {
    rows: RwLock<Vec<MenuNode>>,
}

impl InMemoryMenuRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing rows as-is, without any constraint checks
    pub fn with_rows(rows: Vec<MenuNode>) -> Self {
        Self {
            rows: RwLock::new(rows.iter().map(MenuNode::detached).collect()),
        }
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

fn check_parent(rows: &[MenuNode], menu: &MenuNode) -> Result<(), DomainError> {
    match menu.parent_id {
        Some(parent_id) if !rows.iter().any(|r| r.id == parent_id) => {
            Err(DomainError::ParentNotFound(parent_id))
        }
        _ => Ok(()),
    }
}

fn check_sibling_name(rows: &[MenuNode], menu: &MenuNode) -> Result<(), DomainError> {
    let clash = rows
        .iter()
        .any(|r| r.id != menu.id && r.parent_id == menu.parent_id && r.name == menu.name);
    if clash {
        return Err(DomainError::NameConflict {
            parent_id: menu.parent_id,
            name: menu.name.clone(),
        });
    }
    Ok(())
}

fn position(rows: &[MenuNode], id: Uuid) -> Result<usize, DomainError> {
    rows.iter()
        .position(|r| r.id == id)
        .ok_or(DomainError::MenuNotFound(id))
}

fn insert_row(rows: &mut Vec<MenuNode>, menu: &MenuNode) -> Result<MenuNode, DomainError> {
    if rows.iter().any(|r| r.id == menu.id) {
        return Err(DomainError::DatabaseError(format!("duplicate menu id {}", menu.id)));
    }
    check_parent(rows, menu)?;
    check_sibling_name(rows, menu)?;

    let row = menu.detached();
    rows.push(row.clone());
    Ok(row)
}

fn update_row(rows: &mut [MenuNode], menu: &MenuNode) -> Result<MenuNode, DomainError> {
    let idx = position(rows, menu.id)?;
    if menu.parent_id == Some(menu.id) {
        return Err(DomainError::SelfParent);
    }
    check_parent(rows, menu)?;
    check_sibling_name(rows, menu)?;

    let row = MenuNode {
        created_at: rows[idx].created_at,
        updated_at: Utc::now(),
        ..menu.detached()
    };
    rows[idx] = row.clone();
    Ok(row)
}

fn delete_row(rows: &mut Vec<MenuNode>, id: Uuid) -> Result<(), DomainError> {
    let idx = position(rows, id)?;
    if rows.iter().any(|r| r.parent_id == Some(id)) {
        return Err(DomainError::DatabaseError(format!(
            "menu {} is still referenced by child rows",
            id
        )));
    }
    rows.remove(idx);
    Ok(())
}

#[async_trait]
impl MenuRepository for InMemoryMenuRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<MenuNode>, DomainError> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|r| r.id == *id).cloned())
    }

    async fn find_many(&self, filter: &MenuFilter) -> Result<Vec<MenuNode>, DomainError> {
        let rows = self.rows.read().await;
        let mut found: Vec<MenuNode> = rows.iter().filter(|r| filter.matches(r)).cloned().collect();
        // stable: equal orders stay in insertion order
        found.sort_by_key(|r| r.order);
        Ok(found)
    }

    async fn create(&self, menu: &MenuNode) -> Result<MenuNode, DomainError> {
        let mut rows = self.rows.write().await;
        insert_row(&mut rows, menu)
    }

    async fn update(&self, menu: &MenuNode) -> Result<MenuNode, DomainError> {
        let mut rows = self.rows.write().await;
        update_row(&mut rows, menu)
    }

    async fn delete(&self, id: &Uuid) -> Result<(), DomainError> {
        let mut rows = self.rows.write().await;
        delete_row(&mut rows, *id)
    }

    async fn run_atomic(&self, operations: Vec<AtomicOperation>) -> Result<(), DomainError> {
        let mut rows = self.rows.write().await;

        // Work on a copy; the live rows are only swapped once every step succeeded
        let mut staged = rows.clone();
        for operation in &operations {
            match operation {
                AtomicOperation::SetOrder { id, order } => {
                    let idx = position(&staged, *id)?;
                    staged[idx].order = *order;
                    staged[idx].updated_at = Utc::now();
                }
                AtomicOperation::Delete(id) => {
                    delete_row(&mut staged, *id)?;
                }
            }
        }

        *rows = staged;
        debug!("Committed batch of {} menu operations", operations.len());
        Ok(())
    }

    async fn ping(&self) -> Result<(), DomainError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use menu_core::domain::CreateMenuInput;

    fn menu(name: &str, parent_id: Option<Uuid>, order: i32) -> MenuNode {
        let mut input = CreateMenuInput::named(name).with_order(order);
        input.parent_id = parent_id;
        MenuNode::new(input)
    }

    #[tokio::test]
    async fn test_find_many_orders_and_filters() {
        let repo = InMemoryMenuRepository::new();
        let settings = repo.create(&menu("Settings", None, 2)).await.unwrap();
        repo.create(&menu("Dashboard", None, 1)).await.unwrap();
        repo.create(&menu("Reports", None, 2)).await.unwrap();
        repo.create(&menu("General", Some(settings.id), 0)).await.unwrap();

        let roots = repo.find_many(&MenuFilter::children_of(None)).await.unwrap();
        let names: Vec<&str> = roots.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Dashboard", "Settings", "Reports"]);

        let children = repo.find_many(&MenuFilter::children_of(Some(settings.id))).await.unwrap();
        assert_eq!(children.len(), 1);
        assert_eq!(repo.find_many(&MenuFilter::all()).await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_storage_constraints() {
        let repo = InMemoryMenuRepository::new();
        let settings = repo.create(&menu("Settings", None, 0)).await.unwrap();

        let dup = repo.create(&menu("Settings", None, 1)).await.unwrap_err();
        assert!(matches!(dup, DomainError::NameConflict { .. }));

        let missing_parent = repo.create(&menu("Lost", Some(Uuid::new_v4()), 0)).await.unwrap_err();
        assert!(matches!(missing_parent, DomainError::ParentNotFound(_)));

        repo.create(&menu("General", Some(settings.id), 0)).await.unwrap();
        assert!(repo.delete(&settings.id).await.is_err());
        assert!(matches!(
            repo.delete(&Uuid::new_v4()).await,
            Err(DomainError::MenuNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_update_refreshes_timestamp_only() {
        let repo = InMemoryMenuRepository::new();
        let created = repo.create(&menu("Settings", None, 0)).await.unwrap();

        let mut changed = created.clone();
        changed.name = "Preferences".to_string();
        changed.created_at = Utc::now();
        let saved = repo.update(&changed).await.unwrap();

        assert_eq!(saved.name, "Preferences");
        assert_eq!(saved.created_at, created.created_at);
        assert!(saved.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn test_run_atomic_is_all_or_nothing() {
        let repo = InMemoryMenuRepository::new();
        let x = repo.create(&menu("X", None, 0)).await.unwrap();
        let y = repo.create(&menu("Y", None, 1)).await.unwrap();

        let err = repo
            .run_atomic(vec![
                AtomicOperation::SetOrder { id: x.id, order: 5 },
                AtomicOperation::SetOrder { id: Uuid::new_v4(), order: 6 },
            ])
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::MenuNotFound(_)));
        assert_eq!(repo.find_by_id(&x.id).await.unwrap().unwrap().order, 0);

        repo.run_atomic(vec![
            AtomicOperation::SetOrder { id: x.id, order: 1 },
            AtomicOperation::SetOrder { id: y.id, order: 0 },
        ])
        .await
        .unwrap();
        let roots = repo.find_many(&MenuFilter::all()).await.unwrap();
        assert_eq!(roots[0].id, y.id);
        assert_eq!(roots[1].id, x.id);
    }
}
