//! Orders API 模块
//!
//! | 路径 | 方法 | 权限 |
//! |------|------|------|
//! | /api/orders | POST | 公开 (访客或登录用户) |
//! | /api/orders | GET | 登录 (顾客仅见自己的订单) |
//! | /api/orders/{id} | GET | 订单所有者 / staff / kitchen / admin |
//! | /api/orders/{id}/status | PATCH | kitchen / admin |

mod handler;

use axum::{
    Router, middleware,
    routing::{get, patch, post},
};

use crate::auth::{KITCHEN_ROLES, require_auth, require_role};
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    let place_routes = Router::new().route("/", post(handler::create));

    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id))
        .route_layer(middleware::from_fn(require_auth));

    let kitchen_routes = Router::new()
        .route("/{id}/status", patch(handler::update_status))
        .route_layer(middleware::from_fn(require_role(KITCHEN_ROLES)));

    place_routes.merge(read_routes).merge(kitchen_routes)
}
