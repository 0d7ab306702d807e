//! Menu repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::MenuNode;
use crate::error::DomainError;

/// Which sibling group a query is restricted to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParentScope {
    #[default]
    Any,
    Root,
    Of(Uuid),
}

impl ParentScope {
    pub fn from_parent(parent_id: Option<Uuid>) -> Self {
        match parent_id {
            Some(id) => ParentScope::Of(id),
            None => ParentScope::Root,
        }
    }

    pub fn matches(&self, parent_id: Option<Uuid>) -> bool {
        match self {
            ParentScope::Any => true,
            ParentScope::Root => parent_id.is_none(),
            ParentScope::Of(id) => parent_id == Some(*id),
        }
    }
}

/// Row filter for `find_many`. Empty filter selects every row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MenuFilter {
    pub parent: ParentScope,
    pub name: Option<String>,
    pub exclude_id: Option<Uuid>,
}

impl MenuFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn children_of(parent_id: Option<Uuid>) -> Self {
        Self {
            parent: ParentScope::from_parent(parent_id),
            ..Self::default()
        }
    }

    /// Same-named rows in a sibling group, optionally ignoring one row
    pub fn sibling_named(parent_id: Option<Uuid>, name: &str, exclude_id: Option<Uuid>) -> Self {
        Self {
            parent: ParentScope::from_parent(parent_id),
            name: Some(name.to_string()),
            exclude_id,
        }
    }

    pub fn matches(&self, menu: &MenuNode) -> bool {
        self.parent.matches(menu.parent_id)
            && self.name.as_ref().map_or(true, |name| &menu.name == name)
            && self.exclude_id != Some(menu.id)
    }
}

/// One write inside an all-or-nothing batch
#[derive(Debug, Clone, PartialEq)]
pub enum AtomicOperation {
    SetOrder { id: Uuid, order: i32 },
    Delete(Uuid),
}

/// Persistence port for menu rows.
///
/// `find_many` returns rows without children, sorted by `order`, then
/// creation time, then id.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MenuRepository: Send + Sync {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<MenuNode>, DomainError>;
    async fn find_many(&self, filter: &MenuFilter) -> Result<Vec<MenuNode>, DomainError>;
    async fn create(&self, menu: &MenuNode) -> Result<MenuNode, DomainError>;
    async fn update(&self, menu: &MenuNode) -> Result<MenuNode, DomainError>;
    async fn delete(&self, id: &Uuid) -> Result<(), DomainError>;
    /// Apply every operation or none of them
    async fn run_atomic(&self, operations: Vec<AtomicOperation>) -> Result<(), DomainError>;
    async fn ping(&self) -> Result<(), DomainError>;
}
