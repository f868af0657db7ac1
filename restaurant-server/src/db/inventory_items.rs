use shared::models::{InventoryItem, InventoryItemCreate, InventoryItemUpdate};
use shared::util::now_millis;
use sqlx::{SqliteConnection, SqlitePool};

pub async fn list(pool: &SqlitePool) -> Result<Vec<InventoryItem>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM inventory_items ORDER BY name")
        .fetch_all(pool)
        .await
}

pub async fn low_stock(pool: &SqlitePool) -> Result<Vec<InventoryItem>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM inventory_items WHERE quantity <= min_quantity ORDER BY name")
        .fetch_all(pool)
        .await
}

pub async fn by_menu_item(
    pool: &SqlitePool,
    menu_item_id: i64,
) -> Result<Vec<InventoryItem>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM inventory_items WHERE menu_item_id = ? ORDER BY id")
        .bind(menu_item_id)
        .fetch_all(pool)
        .await
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<InventoryItem>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM inventory_items WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn create(
    pool: &SqlitePool,
    data: &InventoryItemCreate,
) -> Result<InventoryItem, sqlx::Error> {
    let now = now_millis();
    sqlx::query_as(
        "INSERT INTO inventory_items
            (name, description, quantity, unit, min_quantity, usage_per_serving, menu_item_id, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
         RETURNING *",
    )
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.quantity)
    .bind(&data.unit)
    .bind(data.min_quantity)
    .bind(data.usage_per_serving)
    .bind(data.menu_item_id)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
}

/// Partial update; absent fields keep their stored value, `menu_item_id: Some(None)` unlinks
pub async fn update(
    pool: &SqlitePool,
    id: i64,
    data: &InventoryItemUpdate,
) -> Result<Option<InventoryItem>, sqlx::Error> {
    sqlx::query_as(
        "UPDATE inventory_items SET
            name = COALESCE(?, name),
            description = COALESCE(?, description),
            quantity = COALESCE(?, quantity),
            unit = COALESCE(?, unit),
            min_quantity = COALESCE(?, min_quantity),
            usage_per_serving = COALESCE(?, usage_per_serving),
            menu_item_id = CASE WHEN ? THEN ? ELSE menu_item_id END,
            updated_at = ?
         WHERE id = ?
         RETURNING *",
    )
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.quantity)
    .bind(&data.unit)
    .bind(data.min_quantity)
    .bind(data.usage_per_serving)
    .bind(data.menu_item_id.is_some())
    .bind(data.menu_item_id.flatten())
    .bind(now_millis())
    .bind(id)
    .fetch_optional(pool)
    .await
}

// ========== Order transaction helpers ==========

/// Stock rows consumed by a menu item
pub async fn linked_to_menu_item_tx(
    conn: &mut SqliteConnection,
    menu_item_id: i64,
) -> Result<Vec<InventoryItem>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM inventory_items WHERE menu_item_id = ? ORDER BY id")
        .bind(menu_item_id)
        .fetch_all(conn)
        .await
}

/// Compare-and-set on `quantity`; false when the row changed since it was read
pub async fn set_quantity_if_unchanged_tx(
    conn: &mut SqliteConnection,
    id: i64,
    expected: f64,
    new_quantity: f64,
) -> Result<bool, sqlx::Error> {
    let rows = sqlx::query(
        "UPDATE inventory_items SET quantity = ?, updated_at = ? WHERE id = ? AND quantity = ?",
    )
    .bind(new_quantity)
    .bind(now_millis())
    .bind(id)
    .bind(expected)
    .execute(conn)
    .await?
    .rows_affected();
    Ok(rows == 1)
}
