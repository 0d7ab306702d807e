// ============================================================================
// Menu API - Router
// File: crates/menu-api/src/routes.rs
// ============================================================================

use std::time::Duration;

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    routing::{get, patch, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};
use tracing::warn;

use crate::handlers::{health, menu};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.app.cors_origins);
    let timeout = Duration::from_secs(state.config.app.request_timeout_secs);

    // Public routes
    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    // Menu routes
    let menu_routes = Router::new()
        .route("/", post(menu::create_menu).get(menu::list_menus))
        .route("/tree", get(menu::menu_tree))
        .route("/reorder", post(menu::reorder_menus))
        .route("/reorder/dense", post(menu::reorder_menus_dense))
        .route(
            "/{id}",
            get(menu::get_menu)
                .patch(menu::update_menu)
                .delete(menu::delete_menu),
        )
        .route("/{id}/path", get(menu::menu_path))
        .route("/{id}/move", patch(menu::move_menu));

    Router::new()
        .merge(health_routes)
        .nest("/api/v1/menus", menu_routes)
        .with_state(state)
        .layer(TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, timeout))
        .layer(cors)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}
