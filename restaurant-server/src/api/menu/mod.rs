//! Menu API 模块
//!
//! | 路径 | 方法 | 权限 |
//! |------|------|------|
//! | /api/menu | GET | 公开 (`?available=true` 仅返回可点) |
//! | /api/menu/{id} | GET | 公开 |
//! | /api/menu/{id}/inventory | GET | staff / admin |
//! | /api/menu | POST | admin |
//! | /api/menu/{id} | PATCH / DELETE | admin |

mod handler;

use axum::{
    Router, middleware,
    routing::{get, patch, post},
};

use crate::auth::{ADMIN_ONLY, STAFF_ROLES, require_role};
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/menu", routes())
}

fn routes() -> Router<ServerState> {
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id));

    let staff_routes = Router::new()
        .route("/{id}/inventory", get(handler::inventory))
        .route_layer(middleware::from_fn(require_role(STAFF_ROLES)));

    let manage_routes = Router::new()
        .route("/", post(handler::create))
        .route("/{id}", patch(handler::update).delete(handler::delete))
        .route_layer(middleware::from_fn(require_role(ADMIN_ONLY)));

    read_routes.merge(staff_routes).merge(manage_routes)
}
