//! Reviews API 模块
//!
//! | 路径 | 方法 | 权限 |
//! |------|------|------|
//! | /api/reviews | POST | 公开 |
//! | /api/reviews | GET | 公开 (非员工仅见 approved) |
//! | /api/reviews/stats | GET | 公开 |
//! | /api/reviews/{id} | PATCH | staff / admin |

mod handler;

use axum::{
    Router, middleware,
    routing::{get, patch},
};

use crate::auth::{STAFF_ROLES, require_role};
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/reviews", routes())
}

fn routes() -> Router<ServerState> {
    let public_routes = Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/stats", get(handler::stats));

    let moderation_routes = Router::new()
        .route("/{id}", patch(handler::moderate))
        .route_layer(middleware::from_fn(require_role(STAFF_ROLES)));

    public_routes.merge(moderation_routes)
}
