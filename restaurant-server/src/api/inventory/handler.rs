//! Inventory API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use shared::models::{InventoryItemCreate, InventoryItemUpdate, InventoryItemView};

use crate::core::ServerState;
use crate::db;
use crate::orders::money::validate_stock;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text,
    validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode, db_err};

async fn ensure_menu_item(state: &ServerState, menu_item_id: Option<i64>) -> AppResult<()> {
    if let Some(id) = menu_item_id
        && !db::menu_items::exists(&state.pool, id).await.map_err(db_err)?
    {
        return Err(AppError::new(ErrorCode::MenuItemNotFound).with_detail("menu_item_id", id));
    }
    Ok(())
}

/// GET /api/inventory - 全部库存 (含 is_low)
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<InventoryItemView>>> {
    let rows = db::inventory_items::list(&state.pool)
        .await
        .map_err(db_err)?;
    Ok(Json(rows.into_iter().map(InventoryItemView::from).collect()))
}

/// GET /api/inventory/low-stock - 低于最低库存的条目
pub async fn low_stock(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<InventoryItemView>>> {
    let rows = db::inventory_items::low_stock(&state.pool)
        .await
        .map_err(db_err)?;
    Ok(Json(rows.into_iter().map(InventoryItemView::from).collect()))
}

/// POST /api/inventory - 创建库存条目
pub async fn create(
    State(state): State<ServerState>,
    Json(mut payload): Json<InventoryItemCreate>,
) -> AppResult<(StatusCode, Json<InventoryItemView>)> {
    payload.name = payload.name.trim().to_string();
    payload.unit = payload.unit.trim().to_string();

    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&payload.unit, "unit", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    validate_stock(payload.quantity, "quantity")?;
    validate_stock(payload.min_quantity, "min_quantity")?;
    validate_stock(payload.usage_per_serving, "usage_per_serving")?;
    ensure_menu_item(&state, payload.menu_item_id).await?;

    let item = db::inventory_items::create(&state.pool, &payload)
        .await
        .map_err(db_err)?;

    tracing::info!(inventory_item_id = item.id, name = %item.name, "Inventory item created");
    Ok((StatusCode::CREATED, Json(item.into())))
}

/// PATCH /api/inventory/{id} - 部分更新 (补货即设置 quantity)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(mut payload): Json<InventoryItemUpdate>,
) -> AppResult<Json<InventoryItemView>> {
    payload.name = payload.name.map(|v| v.trim().to_string());
    payload.unit = payload.unit.map(|v| v.trim().to_string());

    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(unit) = &payload.unit {
        validate_required_text(unit, "unit", MAX_SHORT_TEXT_LEN)?;
    }
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    for (value, field) in [
        (payload.quantity, "quantity"),
        (payload.min_quantity, "min_quantity"),
        (payload.usage_per_serving, "usage_per_serving"),
    ] {
        if let Some(value) = value {
            validate_stock(value, field)?;
        }
    }
    ensure_menu_item(&state, payload.menu_item_id.flatten()).await?;

    let item = db::inventory_items::update(&state.pool, id, &payload)
        .await
        .map_err(db_err)?
        .ok_or_else(|| {
            AppError::new(ErrorCode::InventoryItemNotFound).with_detail("inventory_item_id", id)
        })?;

    tracing::info!(
        inventory_item_id = id,
        quantity = item.quantity,
        "Inventory item updated"
    );
    Ok(Json(item.into()))
}
