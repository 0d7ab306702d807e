// ============================================================================
// Menu API - Data Transfer Objects
// File: crates/menu-api/src/dto.rs
// ============================================================================
//! Wire shapes for the menu endpoints. JSON field names are camelCase.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use menu_core::domain::{CreateMenuInput, MenuNode, MenuPath, OrderAssignment, UpdateMenuInput};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub url: Option<String>,
    pub order: i32,
    pub is_active: bool,
    pub parent_id: Option<Uuid>,
    pub children: Vec<MenuResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<MenuNode> for MenuResponse {
    fn from(menu: MenuNode) -> Self {
        Self {
            id: menu.id,
            name: menu.name,
            description: menu.description,
            icon: menu.icon,
            url: menu.url,
            order: menu.order,
            is_active: menu.is_active,
            parent_id: menu.parent_id,
            children: menu.children.into_iter().map(Into::into).collect(),
            created_at: menu.created_at,
            updated_at: menu.updated_at,
        }
    }
}

pub fn menu_list(menus: Vec<MenuNode>) -> Vec<MenuResponse> {
    menus.into_iter().map(Into::into).collect()
}

#[derive(Debug, Serialize)]
pub struct MenuPathResponse {
    pub depth: usize,
    pub height: usize,
    pub ancestors: Vec<MenuResponse>,
}

impl From<MenuPath> for MenuPathResponse {
    fn from(path: MenuPath) -> Self {
        Self {
            depth: path.depth,
            height: path.height,
            ancestors: menu_list(path.ancestors),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMenuRequest {
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub url: Option<String>,
    pub order: Option<i32>,
    pub is_active: Option<bool>,
    pub parent_id: Option<Uuid>,
}

impl From<CreateMenuRequest> for CreateMenuInput {
    fn from(req: CreateMenuRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            icon: req.icon,
            url: req.url,
            order: req.order,
            is_active: req.is_active,
            parent_id: req.parent_id,
        }
    }
}

/// Absent fields stay untouched; an explicit `null` clears the field
/// (for `parentId`, moves the menu to the root).
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMenuRequest {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub icon: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub url: Option<Option<String>>,
    pub order: Option<i32>,
    pub is_active: Option<bool>,
    #[serde(default, deserialize_with = "present")]
    pub parent_id: Option<Option<Uuid>>,
}

impl From<UpdateMenuRequest> for UpdateMenuInput {
    fn from(req: UpdateMenuRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            icon: req.icon,
            url: req.url,
            order: req.order,
            is_active: req.is_active,
            parent_id: req.parent_id,
        }
    }
}

/// Only called when the key is present, so `null` becomes `Some(None)`
fn present<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveMenuRequest {
    #[serde(default)]
    pub parent_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderRequest {
    #[serde(default)]
    pub parent_id: Option<Uuid>,
    pub orders: Vec<OrderAssignment>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DenseReorderRequest {
    #[serde(default)]
    pub parent_id: Option<Uuid>,
    pub ids: Vec<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_request_tri_state() {
        let untouched: UpdateMenuRequest = serde_json::from_str(r#"{"name":"General"}"#).unwrap();
        assert_eq!(untouched.parent_id, None);
        assert_eq!(untouched.icon, None);

        let cleared: UpdateMenuRequest =
            serde_json::from_str(r#"{"parentId":null,"icon":null}"#).unwrap();
        assert_eq!(cleared.parent_id, Some(None));
        assert_eq!(cleared.icon, Some(None));

        let id = Uuid::new_v4();
        let moved: UpdateMenuRequest =
            serde_json::from_str(&format!(r#"{{"parentId":"{}"}}"#, id)).unwrap();
        assert_eq!(moved.parent_id, Some(Some(id)));
    }

    #[test]
    fn test_menu_response_is_camel_case() {
        let menu = MenuNode::new(CreateMenuInput::named("Dashboard"));
        let body = serde_json::to_value(MenuResponse::from(menu)).unwrap();
        assert_eq!(body["isActive"], true);
        assert!(body["parentId"].is_null());
        assert!(body["children"].as_array().unwrap().is_empty());
        assert!(body.get("createdAt").is_some());
    }
}
