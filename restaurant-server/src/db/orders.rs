use shared::models::{Order, OrderItem, OrderStatus};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};
use std::collections::HashMap;

const ITEM_COLUMNS: &str = "SELECT oi.id, oi.order_id, oi.menu_item_id,
        COALESCE(mi.name, '') AS menu_item_name,
        oi.quantity, oi.price, oi.special_requests, oi.created_at
     FROM order_items oi
     LEFT JOIN menu_items mi ON mi.id = oi.menu_item_id";

/// Order header row to insert
pub struct NewOrder<'a> {
    pub customer_id: Option<i64>,
    pub customer_name: &'a str,
    pub customer_phone: &'a str,
    pub customer_email: Option<&'a str>,
    pub customer_address: Option<&'a str>,
    pub table_number: Option<i64>,
    pub is_guest_order: bool,
    pub total_amount: f64,
    pub notes: Option<&'a str>,
    pub now: i64,
}

/// One captured line to insert
pub struct NewOrderItem<'a> {
    pub menu_item_id: i64,
    pub quantity: i64,
    pub price: f64,
    pub special_requests: Option<&'a str>,
}

pub async fn insert_tx(conn: &mut SqliteConnection, order: &NewOrder<'_>) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(
        "INSERT INTO orders
            (customer_id, customer_name, customer_phone, customer_email, customer_address,
             status, table_number, is_guest_order, total_amount, notes, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, 'pending', ?, ?, ?, ?, ?, ?)
         RETURNING id",
    )
    .bind(order.customer_id)
    .bind(order.customer_name)
    .bind(order.customer_phone)
    .bind(order.customer_email)
    .bind(order.customer_address)
    .bind(order.table_number)
    .bind(order.is_guest_order)
    .bind(order.total_amount)
    .bind(order.notes)
    .bind(order.now)
    .bind(order.now)
    .fetch_one(conn)
    .await
}

pub async fn insert_item_tx(
    conn: &mut SqliteConnection,
    order_id: i64,
    item: &NewOrderItem<'_>,
    now: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO order_items (order_id, menu_item_id, quantity, price, special_requests, created_at)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(order_id)
    .bind(item.menu_item_id)
    .bind(item.quantity)
    .bind(item.price)
    .bind(item.special_requests)
    .bind(now)
    .execute(conn)
    .await?;
    Ok(())
}

/// Order with its line items
pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Order>, sqlx::Error> {
    let order: Option<Order> = sqlx::query_as("SELECT * FROM orders WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    match order {
        Some(mut order) => {
            order.items = sqlx::query_as(&format!("{ITEM_COLUMNS} WHERE oi.order_id = ? ORDER BY oi.id"))
                .bind(id)
                .fetch_all(pool)
                .await?;
            Ok(Some(order))
        }
        None => Ok(None),
    }
}

/// Every order, newest first
pub async fn list_all(pool: &SqlitePool) -> Result<Vec<Order>, sqlx::Error> {
    let orders = sqlx::query_as("SELECT * FROM orders ORDER BY created_at DESC, id DESC")
        .fetch_all(pool)
        .await?;
    with_items(pool, orders).await
}

/// A customer's own orders, newest first
pub async fn list_by_customer(pool: &SqlitePool, customer_id: i64) -> Result<Vec<Order>, sqlx::Error> {
    let orders = sqlx::query_as(
        "SELECT * FROM orders WHERE customer_id = ? ORDER BY created_at DESC, id DESC",
    )
    .bind(customer_id)
    .fetch_all(pool)
    .await?;
    with_items(pool, orders).await
}

/// Orders the kitchen still has to act on, oldest first
pub async fn list_active(pool: &SqlitePool) -> Result<Vec<Order>, sqlx::Error> {
    let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT * FROM orders WHERE status IN (");
    let mut separated = qb.separated(", ");
    for status in OrderStatus::ACTIVE {
        separated.push_bind(status);
    }
    qb.push(") ORDER BY created_at ASC, id ASC");

    let orders = qb.build_query_as().fetch_all(pool).await?;
    with_items(pool, orders).await
}

pub async fn count_active(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(
        "SELECT COUNT(*) FROM orders WHERE status IN ('pending', 'confirmed', 'preparing', 'ready')",
    )
    .fetch_one(pool)
    .await
}

/// Most recent orders (headers only)
pub async fn recent(pool: &SqlitePool, limit: i64) -> Result<Vec<Order>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM orders ORDER BY created_at DESC, id DESC LIMIT ?")
        .bind(limit)
        .fetch_all(pool)
        .await
}

/// Sum of completed orders created at or after `since`
pub async fn completed_revenue_since(pool: &SqlitePool, since: i64) -> Result<f64, sqlx::Error> {
    sqlx::query_scalar(
        "SELECT COALESCE(SUM(total_amount), 0.0) FROM orders WHERE status = 'completed' AND created_at >= ?",
    )
    .bind(since)
    .fetch_one(pool)
    .await
}

/// Compare-and-set on `status`; false when the order moved on since it was read
pub async fn update_status(
    pool: &SqlitePool,
    id: i64,
    from: OrderStatus,
    to: OrderStatus,
    now: i64,
) -> Result<bool, sqlx::Error> {
    let rows = sqlx::query("UPDATE orders SET status = ?, updated_at = ? WHERE id = ? AND status = ?")
        .bind(to)
        .bind(now)
        .bind(id)
        .bind(from)
        .execute(pool)
        .await?
        .rows_affected();
    Ok(rows == 1)
}

/// Attach line items to a batch of orders with one query
async fn with_items(pool: &SqlitePool, mut orders: Vec<Order>) -> Result<Vec<Order>, sqlx::Error> {
    if orders.is_empty() {
        return Ok(orders);
    }

    let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(ITEM_COLUMNS);
    qb.push(" WHERE oi.order_id IN (");
    let mut separated = qb.separated(", ");
    for order in &orders {
        separated.push_bind(order.id);
    }
    qb.push(") ORDER BY oi.id");

    let items: Vec<OrderItem> = qb.build_query_as().fetch_all(pool).await?;

    let mut by_order: HashMap<i64, Vec<OrderItem>> = HashMap::new();
    for item in items {
        by_order.entry(item.order_id).or_default().push(item);
    }
    for order in &mut orders {
        order.items = by_order.remove(&order.id).unwrap_or_default();
    }
    Ok(orders)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    async fn seed(pool: &SqlitePool, customer_id: Option<i64>, created_at: i64) -> i64 {
        sqlx::query(
            "INSERT OR IGNORE INTO menu_items (id, name, price, category, created_at, updated_at)
             VALUES (1, 'Pizza', 10.0, 'main', 0, 0)",
        )
        .execute(pool)
        .await
        .unwrap();

        let mut conn = pool.acquire().await.unwrap();
        let id = insert_tx(
            &mut *conn,
            &NewOrder {
                customer_id,
                customer_name: "Ada",
                customer_phone: "555-0100",
                customer_email: None,
                customer_address: None,
                table_number: Some(3),
                is_guest_order: customer_id.is_none(),
                total_amount: 20.0,
                notes: None,
                now: created_at,
            },
        )
        .await
        .unwrap();
        insert_item_tx(
            &mut *conn,
            id,
            &NewOrderItem {
                menu_item_id: 1,
                quantity: 2,
                price: 10.0,
                special_requests: Some("extra cheese"),
            },
            created_at,
        )
        .await
        .unwrap();
        id
    }

    async fn customer(pool: &SqlitePool) -> i64 {
        sqlx::query_scalar(
            "INSERT INTO users (email, name, password_hash, created_at, updated_at)
             VALUES ('c@example.com', 'C', 'x', 0, 0) RETURNING id",
        )
        .fetch_one(pool)
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn order_is_loaded_with_named_items() {
        let pool = db::open_in_memory().await.unwrap();
        let id = seed(&pool, None, 1).await;

        let order = find_by_id(&pool, id).await.unwrap().unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
        assert!(order.is_guest_order);
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.items[0].menu_item_name, "Pizza");
        assert_eq!(order.items[0].special_requests.as_deref(), Some("extra cheese"));

        assert!(find_by_id(&pool, 999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn listing_scopes_and_orders() {
        let pool = db::open_in_memory().await.unwrap();
        let customer_id = customer(&pool).await;
        let first = seed(&pool, Some(customer_id), 1).await;
        let second = seed(&pool, None, 2).await;

        let all = list_all(&pool).await.unwrap();
        assert_eq!(all.iter().map(|o| o.id).collect::<Vec<_>>(), vec![second, first]);
        assert!(all.iter().all(|o| o.items.len() == 1));

        let own = list_by_customer(&pool, customer_id).await.unwrap();
        assert_eq!(own.len(), 1);
        assert_eq!(own[0].id, first);

        let active = list_active(&pool).await.unwrap();
        assert_eq!(active.iter().map(|o| o.id).collect::<Vec<_>>(), vec![first, second]);
    }

    #[tokio::test]
    async fn status_update_is_guarded() {
        let pool = db::open_in_memory().await.unwrap();
        let id = seed(&pool, None, 1).await;

        assert!(
            update_status(&pool, id, OrderStatus::Pending, OrderStatus::Confirmed, 5)
                .await
                .unwrap()
        );
        assert!(
            !update_status(&pool, id, OrderStatus::Pending, OrderStatus::Cancelled, 6)
                .await
                .unwrap()
        );
        let order = find_by_id(&pool, id).await.unwrap().unwrap();
        assert_eq!(order.status, OrderStatus::Confirmed);
        assert_eq!(order.updated_at, 5);
        assert_eq!(count_active(&pool).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn deleting_an_order_cascades_to_items() {
        let pool = db::open_in_memory().await.unwrap();
        let id = seed(&pool, None, 1).await;

        sqlx::query("DELETE FROM orders WHERE id = ?")
            .bind(id)
            .execute(&pool)
            .await
            .unwrap();
        let left: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM order_items")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(left, 0);
    }
}
