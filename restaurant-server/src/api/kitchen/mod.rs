//! Kitchen API 模块
//!
//! 厨房看板: 未完成订单 (pending / confirmed / preparing / ready), 最早的在前

use axum::{Json, Router, extract::State, middleware, routing::get};
use shared::models::Order;

use crate::auth::{KITCHEN_ROLES, require_role};
use crate::core::ServerState;
use crate::db;
use crate::utils::{AppResult, db_err};

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/kitchen/orders", get(active_orders))
        .route_layer(middleware::from_fn(require_role(KITCHEN_ROLES)))
}

/// GET /api/kitchen/orders - 待处理订单
async fn active_orders(State(state): State<ServerState>) -> AppResult<Json<Vec<Order>>> {
    let orders = db::orders::list_active(&state.pool)
        .await
        .map_err(db_err)?;
    Ok(Json(orders))
}
