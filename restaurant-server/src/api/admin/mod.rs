//! Admin API 模块
//!
//! - POST /api/admin/staff - 创建员工 / 厨房 / 管理员账号
//! - GET /api/admin/dashboard - 仪表盘汇总

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::{ADMIN_ONLY, require_role};
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/admin/staff", post(handler::create_staff))
        .route("/api/admin/dashboard", get(handler::dashboard))
        .route_layer(middleware::from_fn(require_role(ADMIN_ONLY)))
}
