//! 实时订单推送路由
//!
//! GET /api/ws?token=<JWT>
//! 浏览器 WebSocket 无法设置自定义 header, 令牌通过查询参数传递

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/ws", get(handler::upgrade))
}
