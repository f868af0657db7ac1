//! Reservations API 模块

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::{STAFF_ROLES, require_role};
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    let list_routes = Router::new()
        .route("/api/reservations", get(handler::list))
        .route_layer(middleware::from_fn(require_role(STAFF_ROLES)));

    Router::new()
        .route("/api/reservations", post(handler::create))
        .merge(list_routes)
}
