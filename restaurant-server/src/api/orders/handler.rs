//! Orders API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use shared::models::{Order, OrderCreate, OrderCreated, OrderStatusUpdate};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db;
use crate::orders;
use crate::utils::{AppError, AppResult, ErrorCode, db_err};

/// POST /api/orders - 下单 (访客需提供姓名和电话)
pub async fn create(
    State(state): State<ServerState>,
    user: Option<CurrentUser>,
    Json(payload): Json<OrderCreate>,
) -> AppResult<(StatusCode, Json<OrderCreated>)> {
    let order = orders::place_order(&state.pool, &state.hub, user.as_ref(), payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(OrderCreated {
            order_id: order.id,
            order,
        }),
    ))
}

/// GET /api/orders - 订单列表 (按角色过滤, 最新在前)
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<Order>>> {
    let orders = if user.role.sees_all_orders() {
        db::orders::list_all(&state.pool).await
    } else {
        db::orders::list_by_customer(&state.pool, user.id).await
    }
    .map_err(db_err)?;
    Ok(Json(orders))
}

/// GET /api/orders/{id} - 单个订单 (非所有者返回 404)
pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<Order>> {
    let order = db::orders::find_by_id(&state.pool, id)
        .await
        .map_err(db_err)?
        .filter(|order| orders::can_view(&user, order))
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound).with_detail("order_id", id))?;
    Ok(Json(order))
}

/// PATCH /api/orders/{id}/status - 推进或取消订单
pub async fn update_status(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<OrderStatusUpdate>,
) -> AppResult<Json<Order>> {
    let order = orders::change_status(&state.pool, &state.hub, id, &payload.status).await?;
    tracing::debug!(order_id = id, user_id = user.id, status = %order.status, "Status updated via API");
    Ok(Json(order))
}
