//! Order status transitions
//!
//! `pending → confirmed → preparing → ready → completed`, plus `cancelled`
//! from any non-terminal state. Cancelling does not restock inventory.

use shared::models::{Order, OrderStatus};
use shared::util::now_millis;
use sqlx::SqlitePool;

use crate::db;
use crate::live::LiveOrderHub;
use crate::utils::{AppError, ErrorCode, ServiceResult};

/// Parse a client-supplied status value
pub fn parse_status(value: &str) -> Result<OrderStatus, AppError> {
    value.trim().parse::<OrderStatus>().map_err(|_| {
        AppError::with_message(
            ErrorCode::OrderInvalidStatus,
            format!("Unknown order status: {value}"),
        )
        .with_detail("status", value)
    })
}

fn check_transition(from: OrderStatus, to: OrderStatus) -> Result<(), AppError> {
    if from.can_transition_to(to) {
        return Ok(());
    }
    Err(AppError::with_message(
        ErrorCode::OrderInvalidTransition,
        format!("Cannot change order status from {from} to {to}"),
    )
    .with_detail("from", from.as_str())
    .with_detail("to", to.as_str()))
}

/// Apply a status change and push `order:updated` to the kitchen and the owner
pub async fn change_status(
    pool: &SqlitePool,
    hub: &LiveOrderHub,
    order_id: i64,
    status: &str,
) -> ServiceResult<Order> {
    let target = parse_status(status)?;

    let current = db::orders::find_by_id(pool, order_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound).with_detail("order_id", order_id))?;
    let previous = current.status;
    check_transition(previous, target)?;

    if !db::orders::update_status(pool, order_id, previous, target, now_millis()).await? {
        // moved on concurrently; report against the fresh state
        let fresh = db::orders::find_by_id(pool, order_id)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))?;
        check_transition(fresh.status, target)?;
        return Err(AppError::with_message(
            ErrorCode::OrderInvalidTransition,
            "Order status changed concurrently, retry",
        )
        .into());
    }

    let order = db::orders::find_by_id(pool, order_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))?;

    let delivered = hub.publish_order_updated(&order, previous);
    tracing::info!(
        order_id,
        from = %previous,
        to = %order.status,
        subscribers = delivered,
        "Order status changed"
    );

    Ok(order)
}
