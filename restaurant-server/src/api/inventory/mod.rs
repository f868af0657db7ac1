//! Inventory API 模块

mod handler;

use axum::{
    Router, middleware,
    routing::{get, patch, post},
};

use crate::auth::{ADMIN_ONLY, STAFF_ROLES, require_role};
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/inventory", routes())
}

fn routes() -> Router<ServerState> {
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/low-stock", get(handler::low_stock))
        .route_layer(middleware::from_fn(require_role(STAFF_ROLES)));

    let manage_routes = Router::new()
        .route("/", post(handler::create))
        .route("/{id}", patch(handler::update))
        .route_layer(middleware::from_fn(require_role(ADMIN_ONLY)));

    read_routes.merge(manage_routes)
}
