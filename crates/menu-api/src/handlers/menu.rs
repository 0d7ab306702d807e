// ============================================================================
// Menu API - Menu Handlers
// File: crates/menu-api/src/handlers/menu.rs
// ============================================================================
//! Menu CRUD, move and reorder handlers

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::dto::{
    menu_list, CreateMenuRequest, DenseReorderRequest, MenuPathResponse, MenuResponse,
    MessageResponse, MoveMenuRequest, ReorderRequest, UpdateMenuRequest,
};
use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;

type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

/// Create handler - POST /api/v1/menus
pub async fn create_menu(
    State(state): State<AppState>,
    payload: Result<Json<CreateMenuRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<MenuResponse>>), ApiError> {
    let Json(payload) = payload?;
    let menu = state.menu_service.create(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(menu.into()))))
}

/// Flat list handler - GET /api/v1/menus
pub async fn list_menus(State(state): State<AppState>) -> ApiResult<Vec<MenuResponse>> {
    let menus = state.menu_service.list_flat().await?;
    Ok(Json(ApiResponse::success(menu_list(menus))))
}

/// Nested tree handler - GET /api/v1/menus/tree
pub async fn menu_tree(State(state): State<AppState>) -> ApiResult<Vec<MenuResponse>> {
    let tree = state.menu_service.list_tree().await?;
    Ok(Json(ApiResponse::success(menu_list(tree))))
}

/// GET /api/v1/menus/{id}
pub async fn get_menu(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<MenuResponse> {
    let Path(id) = id?;
    let menu = state.menu_service.get_one(id).await?;
    Ok(Json(ApiResponse::success(menu.into())))
}

/// GET /api/v1/menus/{id}/path
pub async fn menu_path(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<MenuPathResponse> {
    let Path(id) = id?;
    let path = state.menu_service.get_path(id).await?;
    Ok(Json(ApiResponse::success(path.into())))
}

/// PATCH /api/v1/menus/{id}
pub async fn update_menu(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateMenuRequest>, JsonRejection>,
) -> ApiResult<MenuResponse> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    let menu = state.menu_service.update(id, payload.into()).await?;
    Ok(Json(ApiResponse::success(menu.into())))
}

/// DELETE /api/v1/menus/{id}
pub async fn delete_menu(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<MessageResponse> {
    let Path(id) = id?;
    let message = state.menu_service.remove(id).await?;
    Ok(Json(ApiResponse::success(MessageResponse { message })))
}

/// PATCH /api/v1/menus/{id}/move
pub async fn move_menu(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<MoveMenuRequest>, JsonRejection>,
) -> ApiResult<MenuResponse> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    let menu = state.menu_service.move_node(id, payload.parent_id).await?;
    Ok(Json(ApiResponse::success(menu.into())))
}

/// POST /api/v1/menus/reorder
pub async fn reorder_menus(
    State(state): State<AppState>,
    payload: Result<Json<ReorderRequest>, JsonRejection>,
) -> ApiResult<Vec<MenuResponse>> {
    let Json(payload) = payload?;
    let menus = state
        .menu_service
        .reorder_siblings(payload.parent_id, payload.orders)
        .await?;
    Ok(Json(ApiResponse::success(menu_list(menus))))
}

/// POST /api/v1/menus/reorder/dense
pub async fn reorder_menus_dense(
    State(state): State<AppState>,
    payload: Result<Json<DenseReorderRequest>, JsonRejection>,
) -> ApiResult<Vec<MenuResponse>> {
    let Json(payload) = payload?;
    let menus = state
        .menu_service
        .reorder_dense(payload.parent_id, &payload.ids)
        .await?;
    Ok(Json(ApiResponse::success(menu_list(menus))))
}
