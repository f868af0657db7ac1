//! Admin dashboard aggregates

use serde::Serialize;
use shared::models::Order;
use shared::util::start_of_today_millis;
use sqlx::SqlitePool;

use super::{menu_items, orders, reservations};
use crate::orders::money::{to_decimal, to_f64};

const RECENT_ORDERS: i64 = 5;

#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    /// Completed orders created today (UTC)
    pub today_revenue: f64,
    pub active_orders: i64,
    pub menu_items: i64,
    pub today_reservations: i64,
    pub recent_orders: Vec<Order>,
}

pub async fn summary(pool: &SqlitePool) -> Result<DashboardSummary, sqlx::Error> {
    let today = chrono::Utc::now().date_naive().format("%Y-%m-%d").to_string();
    let revenue = orders::completed_revenue_since(pool, start_of_today_millis()).await?;

    Ok(DashboardSummary {
        today_revenue: to_f64(to_decimal(revenue)),
        active_orders: orders::count_active(pool).await?,
        menu_items: menu_items::count(pool).await?,
        today_reservations: reservations::count_on(pool, &today).await?,
        recent_orders: orders::recent(pool, RECENT_ORDERS).await?,
    })
}
