//! Menu API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use shared::models::{InventoryItemView, MenuItem, MenuItemCreate, MenuItemUpdate};

use crate::core::ServerState;
use crate::db;
use crate::db::menu_items::DeleteOutcome;
use crate::orders::money::{to_decimal, to_f64, validate_price};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, MAX_URL_LEN, validate_optional_text,
    validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode, db_err};

#[derive(Debug, Default, Deserialize)]
pub struct MenuQuery {
    /// `true` 时只返回可点的菜品
    #[serde(default)]
    pub available: bool,
}

fn not_found(id: i64) -> AppError {
    AppError::new(ErrorCode::MenuItemNotFound).with_detail("menu_item_id", id)
}

fn trim_opt(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string())
}

/// GET /api/menu - 获取菜单
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<MenuQuery>,
) -> AppResult<Json<Vec<MenuItem>>> {
    let items = db::menu_items::list(&state.pool, query.available)
        .await
        .map_err(db_err)?;
    Ok(Json(items))
}

/// GET /api/menu/{id} - 获取单个菜品
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<MenuItem>> {
    let item = db::menu_items::find_by_id(&state.pool, id)
        .await
        .map_err(db_err)?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(item))
}

/// GET /api/menu/{id}/inventory - 菜品关联的库存
pub async fn inventory(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<InventoryItemView>>> {
    if !db::menu_items::exists(&state.pool, id).await.map_err(db_err)? {
        return Err(not_found(id));
    }
    let rows = db::inventory_items::by_menu_item(&state.pool, id)
        .await
        .map_err(db_err)?;
    Ok(Json(rows.into_iter().map(InventoryItemView::from).collect()))
}

/// POST /api/menu - 创建菜品
pub async fn create(
    State(state): State<ServerState>,
    Json(mut payload): Json<MenuItemCreate>,
) -> AppResult<(StatusCode, Json<MenuItem>)> {
    payload.name = payload.name.trim().to_string();
    payload.category = payload.category.trim().to_string();
    payload.description = trim_opt(payload.description);
    payload.image_url = trim_opt(payload.image_url);

    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&payload.category, "category", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    validate_optional_text(&payload.image_url, "image_url", MAX_URL_LEN)?;
    validate_price(payload.price, "price")?;
    payload.price = to_f64(to_decimal(payload.price));

    let item = db::menu_items::create(&state.pool, &payload)
        .await
        .map_err(db_err)?;

    tracing::info!(menu_item_id = item.id, name = %item.name, "Menu item created");
    Ok((StatusCode::CREATED, Json(item)))
}

/// PATCH /api/menu/{id} - 部分更新 (价格、上下架等)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(mut payload): Json<MenuItemUpdate>,
) -> AppResult<Json<MenuItem>> {
    payload.name = trim_opt(payload.name);
    payload.category = trim_opt(payload.category);
    payload.description = trim_opt(payload.description);
    payload.image_url = trim_opt(payload.image_url);

    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(category) = &payload.category {
        validate_required_text(category, "category", MAX_SHORT_TEXT_LEN)?;
    }
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    validate_optional_text(&payload.image_url, "image_url", MAX_URL_LEN)?;
    if let Some(price) = payload.price {
        validate_price(price, "price")?;
        payload.price = Some(to_f64(to_decimal(price)));
    }

    let item = db::menu_items::update(&state.pool, id, &payload)
        .await
        .map_err(db_err)?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(
        menu_item_id = id,
        price = item.price,
        is_available = item.is_available,
        "Menu item updated"
    );
    Ok(Json(item))
}

/// DELETE /api/menu/{id} - 删除未被订单引用的菜品
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    match db::menu_items::delete(&state.pool, id)
        .await
        .map_err(db_err)?
    {
        DeleteOutcome::Deleted => {
            tracing::info!(menu_item_id = id, "Menu item deleted");
            Ok(StatusCode::NO_CONTENT)
        }
        DeleteOutcome::NotFound => Err(not_found(id)),
        DeleteOutcome::InUse => Err(AppError::new(ErrorCode::MenuItemInUse)
            .with_detail("menu_item_id", id)),
    }
}
