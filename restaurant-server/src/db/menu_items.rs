use shared::models::{MenuItem, MenuItemCreate, MenuItemUpdate};
use shared::util::now_millis;
use sqlx::{SqliteConnection, SqlitePool};

pub async fn list(pool: &SqlitePool, available_only: bool) -> Result<Vec<MenuItem>, sqlx::Error> {
    let sql = if available_only {
        "SELECT * FROM menu_items WHERE is_available = 1 ORDER BY category, name"
    } else {
        "SELECT * FROM menu_items ORDER BY category, name"
    };
    sqlx::query_as(sql).fetch_all(pool).await
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<MenuItem>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM menu_items WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Same lookup inside an order transaction
pub async fn find_by_id_tx(
    conn: &mut SqliteConnection,
    id: i64,
) -> Result<Option<MenuItem>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM menu_items WHERE id = ?")
        .bind(id)
        .fetch_optional(conn)
        .await
}

pub async fn exists(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let found: Option<i64> = sqlx::query_scalar("SELECT id FROM menu_items WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(found.is_some())
}

pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM menu_items")
        .fetch_one(pool)
        .await
}

/// Insert a validated item (price already rounded to cents)
pub async fn create(pool: &SqlitePool, data: &MenuItemCreate) -> Result<MenuItem, sqlx::Error> {
    let now = now_millis();
    sqlx::query_as(
        "INSERT INTO menu_items (name, description, price, category, is_available, image_url, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)
         RETURNING *",
    )
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.price)
    .bind(&data.category)
    .bind(data.is_available.unwrap_or(true))
    .bind(&data.image_url)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
}

/// Partial update; absent fields keep their stored value
pub async fn update(
    pool: &SqlitePool,
    id: i64,
    data: &MenuItemUpdate,
) -> Result<Option<MenuItem>, sqlx::Error> {
    sqlx::query_as(
        "UPDATE menu_items SET
            name = COALESCE(?, name),
            description = COALESCE(?, description),
            price = COALESCE(?, price),
            category = COALESCE(?, category),
            is_available = COALESCE(?, is_available),
            image_url = COALESCE(?, image_url),
            updated_at = ?
         WHERE id = ?
         RETURNING *",
    )
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.price)
    .bind(&data.category)
    .bind(data.is_available)
    .bind(&data.image_url)
    .bind(now_millis())
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Result of a delete attempt
#[derive(Debug, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
    /// Referenced by at least one order line
    InUse,
}

/// Delete an item that no order references, unlinking its inventory rows
pub async fn delete(pool: &SqlitePool, id: i64) -> Result<DeleteOutcome, sqlx::Error> {
    let mut tx = pool.begin_with(super::BEGIN_IMMEDIATE).await?;

    let referenced: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM order_items WHERE menu_item_id = ?")
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;
    if referenced > 0 {
        return Ok(DeleteOutcome::InUse);
    }

    sqlx::query("UPDATE inventory_items SET menu_item_id = NULL, updated_at = ? WHERE menu_item_id = ?")
        .bind(now_millis())
        .bind(id)
        .execute(&mut *tx)
        .await?;

    let rows = sqlx::query("DELETE FROM menu_items WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();
    if rows == 0 {
        return Ok(DeleteOutcome::NotFound);
    }

    tx.commit().await?;
    Ok(DeleteOutcome::Deleted)
}
