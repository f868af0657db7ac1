//! Inventory adjustment for a new order
//!
//! Runs inside the order transaction. The required amount is aggregated per
//! stock row over the whole order and every row is checked before any row is
//! written, so a shortfall leaves all stock untouched.

use rust_decimal::Decimal;
use shared::models::InventoryItem;
use sqlx::SqliteConnection;
use std::collections::BTreeMap;

use super::money::{stock_to_f64, to_decimal};
use crate::db;
use crate::utils::{AppError, ErrorCode, ServiceResult};

/// Resulting change to one stock row
#[derive(Debug, Clone, PartialEq)]
pub struct StockChange {
    pub inventory_item_id: i64,
    pub name: String,
    pub before: f64,
    pub after: f64,
    /// At or below the minimum threshold after the change
    pub is_low: bool,
}

/// Validate the aggregated demand against current stock
///
/// Rows with zero demand are skipped. Fails on the first row (by id) whose
/// requirement exceeds what is on hand.
pub fn plan(demand: Vec<(InventoryItem, Decimal)>) -> Result<Vec<StockChange>, AppError> {
    let mut changes = Vec::with_capacity(demand.len());

    for (item, required) in demand {
        if required.is_zero() {
            continue;
        }
        let available = to_decimal(item.quantity);
        if required > available {
            return Err(AppError::with_message(
                ErrorCode::InsufficientStock,
                format!("Insufficient stock for {}", item.name),
            )
            .with_detail("inventory_item_id", item.id)
            .with_detail("inventory_item_name", item.name.clone())
            .with_detail("available", item.quantity)
            .with_detail("required", stock_to_f64(required)));
        }

        let after = stock_to_f64(available - required);
        changes.push(StockChange {
            inventory_item_id: item.id,
            is_low: after <= item.min_quantity,
            name: item.name,
            before: item.quantity,
            after,
        });
    }

    Ok(changes)
}

/// Decrement stock for `(menu_item_id, quantity)` lines, all or nothing
pub async fn consume(
    conn: &mut SqliteConnection,
    lines: &[(i64, i64)],
) -> ServiceResult<Vec<StockChange>> {
    // servings per menu item
    let mut servings: BTreeMap<i64, i64> = BTreeMap::new();
    for &(menu_item_id, quantity) in lines {
        *servings.entry(menu_item_id).or_default() += quantity;
    }

    // required amount per stock row
    let mut demand: BTreeMap<i64, (InventoryItem, Decimal)> = BTreeMap::new();
    for (menu_item_id, quantity) in servings {
        for item in db::inventory_items::linked_to_menu_item_tx(conn, menu_item_id).await? {
            let required = to_decimal(item.usage_per_serving) * Decimal::from(quantity);
            demand
                .entry(item.id)
                .and_modify(|(_, total)| *total += required)
                .or_insert((item, required));
        }
    }

    let changes = plan(demand.into_values().collect())?;

    for change in &changes {
        let applied = db::inventory_items::set_quantity_if_unchanged_tx(
            conn,
            change.inventory_item_id,
            change.before,
            change.after,
        )
        .await?;
        if !applied {
            return Err(AppError::new(ErrorCode::InventoryConflict)
                .with_detail("inventory_item_id", change.inventory_item_id)
                .into());
        }
    }

    Ok(changes)
}
