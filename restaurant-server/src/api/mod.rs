//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`auth`] - 注册、登录、当前用户
//! - [`menu`] - 菜单管理接口
//! - [`inventory`] - 库存管理接口
//! - [`orders`] - 订单接口 (下单、查询、状态流转)
//! - [`kitchen`] - 厨房待办订单
//! - [`reservations`] - 预订接口
//! - [`reviews`] - 评价与审核
//! - [`admin`] - 员工账号与仪表盘
//! - [`ws`] - 实时订单推送 (WebSocket)

pub mod admin;
pub mod auth;
pub mod health;
pub mod inventory;
pub mod kitchen;
pub mod menu;
pub mod orders;
pub mod reservations;
pub mod reviews;
pub mod ws;

use axum::Router;

use crate::core::ServerState;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};

/// 汇总 REST 路由 (尚未挂载 state 和全局中间件)
///
/// WebSocket 路由 [`ws::router`] 不在其中, 由 `build_app` 单独挂载以跳过压缩层
pub fn routes(state: &ServerState) -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(auth::router(state))
        .merge(menu::router())
        .merge(inventory::router())
        .merge(orders::router())
        .merge(kitchen::router())
        .merge(reservations::router())
        .merge(reviews::router())
        .merge(admin::router())
}
