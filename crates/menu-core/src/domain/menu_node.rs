// ============================================================================
// Menu Core - Menu Node Entity
// File: crates/menu-core/src/domain/menu_node.rs
// Description: Menu hierarchy entity and its write inputs
// ============================================================================

use chrono::{DateTime, Utc};
use menu_shared::types::{new_id, now};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A single navigable menu item.
///
/// `children` is never persisted. It is filled by the tree engine from the
/// `parent_id` backlinks of the other rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuNode {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub url: Option<String>,
    pub order: i32,
    pub is_active: bool,
    pub parent_id: Option<Uuid>,
    #[serde(default)]
    pub children: Vec<MenuNode>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MenuNode {
    /// Build a fresh node from an already validated input
    pub fn new(input: CreateMenuInput) -> Self {
        let timestamp = now();
        Self {
            id: new_id(),
            name: input.name,
            description: input.description,
            icon: input.icon,
            url: input.url,
            order: input.order.unwrap_or(0),
            is_active: input.is_active.unwrap_or(true),
            parent_id: input.parent_id,
            children: Vec::new(),
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Copy of this node without any nested children
    pub fn detached(&self) -> Self {
        Self {
            children: Vec::new(),
            ..self.clone()
        }
    }

    /// Merge a patch into this node. Fields the patch leaves out stay as they are.
    pub fn apply(&mut self, patch: UpdateMenuInput) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(icon) = patch.icon {
            self.icon = icon;
        }
        if let Some(url) = patch.url {
            self.url = url;
        }
        if let Some(order) = patch.order {
            self.order = order;
        }
        if let Some(is_active) = patch.is_active {
            self.is_active = is_active;
        }
        if let Some(parent_id) = patch.parent_id {
            self.parent_id = parent_id;
        }
    }
}

/// Fields accepted when creating a menu
#[derive(Debug, Clone, Default, Validate)]
pub struct CreateMenuInput {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,

    #[validate(length(max = 500, message = "Description must be less than 500 characters"))]
    pub description: Option<String>,

    #[validate(length(max = 100, message = "Icon must be less than 100 characters"))]
    pub icon: Option<String>,

    #[validate(length(max = 500, message = "URL must be less than 500 characters"))]
    pub url: Option<String>,

    #[validate(range(min = 0, message = "Order must be 0 or greater"))]
    pub order: Option<i32>,

    pub is_active: Option<bool>,
    pub parent_id: Option<Uuid>,
}

impl CreateMenuInput {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn under(mut self, parent_id: Uuid) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    pub fn with_order(mut self, order: i32) -> Self {
        self.order = Some(order);
        self
    }

    /// Trim text fields; blank optional text becomes `None`
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            description: normalize_text(self.description),
            icon: normalize_text(self.icon),
            url: normalize_text(self.url),
            ..self
        }
    }
}

/// Partial update of a menu.
///
/// `parent_id` is tri-state: `None` leaves the parent alone, `Some(None)`
/// moves the node to the root group, `Some(Some(id))` reparents it.
/// The optional text fields follow the same shape.
#[derive(Debug, Clone, Default, Validate)]
#[validate(schema(function = "validate_update_text"))]
pub struct UpdateMenuInput {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: Option<String>,

    pub description: Option<Option<String>>,

    pub icon: Option<Option<String>>,

    pub url: Option<Option<String>>,

    #[validate(range(min = 0, message = "Order must be 0 or greater"))]
    pub order: Option<i32>,

    pub is_active: Option<bool>,
    pub parent_id: Option<Option<Uuid>>,
}

impl UpdateMenuInput {
    pub fn reparent(parent_id: Option<Uuid>) -> Self {
        Self {
            parent_id: Some(parent_id),
            ..Default::default()
        }
    }

    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn normalized(self) -> Self {
        Self {
            name: self.name.map(|n| n.trim().to_string()),
            description: self.description.map(normalize_text),
            icon: self.icon.map(normalize_text),
            url: self.url.map(normalize_text),
            ..self
        }
    }
}

/// New `order` value for one sibling in a reorder batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderAssignment {
    pub id: Uuid,
    pub order: i32,
}

/// Breadcrumb of a node: its ancestors from the root down, excluding itself.
/// `height` counts the levels below the node (0 for a leaf).
#[derive(Debug, Clone, Serialize)]
pub struct MenuPath {
    pub depth: usize,
    pub height: usize,
    pub ancestors: Vec<MenuNode>,
}

fn normalize_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn validate_optional_length(
    value: &Option<Option<String>>,
    max: usize,
    code: &'static str,
) -> Result<(), validator::ValidationError> {
    match value {
        Some(Some(text)) if text.chars().count() > max => Err(validator::ValidationError::new(code)),
        _ => Ok(()),
    }
}

fn validate_update_text(input: &UpdateMenuInput) -> Result<(), validator::ValidationError> {
    validate_optional_length(&input.description, 500, "description_too_long")?;
    validate_optional_length(&input.icon, 100, "icon_too_long")?;
    validate_optional_length(&input.url, 500, "url_too_long")
}
