use shared::models::{Review, ReviewStats, ReviewStatus};
use shared::util::now_millis;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

const REVIEW_COLUMNS: &str = "SELECT id, user_id, order_id, name, email, rating, comment,
        admin_comment, status, (user_id IS NULL) AS is_guest, created_at, updated_at
     FROM reviews";

pub struct NewReview<'a> {
    pub user_id: Option<i64>,
    pub order_id: Option<i64>,
    pub name: &'a str,
    pub email: &'a str,
    pub rating: i64,
    pub comment: Option<&'a str>,
}

/// Typed list filters
#[derive(Debug, Default)]
pub struct ReviewFilter {
    pub status: Option<ReviewStatus>,
    pub user_id: Option<i64>,
    pub order_id: Option<i64>,
    pub email: Option<String>,
    pub min_rating: Option<i64>,
}

pub async fn create(pool: &SqlitePool, r: &NewReview<'_>) -> Result<Review, sqlx::Error> {
    let now = now_millis();
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO reviews (user_id, order_id, name, email, rating, comment, status, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?, 'pending', ?, ?)
         RETURNING id",
    )
    .bind(r.user_id)
    .bind(r.order_id)
    .bind(r.name)
    .bind(r.email)
    .bind(r.rating)
    .bind(r.comment)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;

    find_by_id(pool, id).await?.ok_or(sqlx::Error::RowNotFound)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Review>, sqlx::Error> {
    sqlx::query_as(&format!("{REVIEW_COLUMNS} WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Whether `user_id` already reviewed `order_id`
pub async fn exists_for_user_order(
    pool: &SqlitePool,
    user_id: i64,
    order_id: i64,
) -> Result<bool, sqlx::Error> {
    let found: Option<i64> =
        sqlx::query_scalar("SELECT id FROM reviews WHERE user_id = ? AND order_id = ?")
            .bind(user_id)
            .bind(order_id)
            .fetch_optional(pool)
            .await?;
    Ok(found.is_some())
}

/// Filtered list, newest first
pub async fn list(pool: &SqlitePool, filter: &ReviewFilter) -> Result<Vec<Review>, sqlx::Error> {
    let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(REVIEW_COLUMNS);
    qb.push(" WHERE 1 = 1");
    if let Some(status) = filter.status {
        qb.push(" AND status = ").push_bind(status);
    }
    if let Some(user_id) = filter.user_id {
        qb.push(" AND user_id = ").push_bind(user_id);
    }
    if let Some(order_id) = filter.order_id {
        qb.push(" AND order_id = ").push_bind(order_id);
    }
    if let Some(email) = &filter.email {
        qb.push(" AND email = ").push_bind(email.clone()).push(" COLLATE NOCASE");
    }
    if let Some(min_rating) = filter.min_rating {
        qb.push(" AND rating >= ").push_bind(min_rating);
    }
    qb.push(" ORDER BY created_at DESC, id DESC");

    qb.build_query_as().fetch_all(pool).await
}

/// Apply moderation; `None` fields are left unchanged
pub async fn moderate(
    pool: &SqlitePool,
    id: i64,
    status: Option<ReviewStatus>,
    admin_comment: Option<&str>,
) -> Result<Option<Review>, sqlx::Error> {
    let rows = sqlx::query(
        "UPDATE reviews SET
            status = COALESCE(?, status),
            admin_comment = COALESCE(?, admin_comment),
            updated_at = ?
         WHERE id = ?",
    )
    .bind(status)
    .bind(admin_comment)
    .bind(now_millis())
    .bind(id)
    .execute(pool)
    .await?
    .rows_affected();

    if rows == 0 {
        return Ok(None);
    }
    find_by_id(pool, id).await
}

#[derive(sqlx::FromRow)]
struct StatusCount {
    status: ReviewStatus,
    count: i64,
}

pub async fn stats(pool: &SqlitePool) -> Result<ReviewStats, sqlx::Error> {
    let counts: Vec<StatusCount> =
        sqlx::query_as("SELECT status, COUNT(*) AS count FROM reviews GROUP BY status")
            .fetch_all(pool)
            .await?;

    let mut stats = ReviewStats {
        total: 0,
        pending: 0,
        approved: 0,
        rejected: 0,
        average_rating: 0.0,
        rating_distribution: [0; 5],
        positive_percentage: 0.0,
    };
    for row in counts {
        stats.total += row.count;
        match row.status {
            ReviewStatus::Pending => stats.pending = row.count,
            ReviewStatus::Approved => stats.approved = row.count,
            ReviewStatus::Rejected => stats.rejected = row.count,
        }
    }

    let distribution: Vec<(i64, i64)> = sqlx::query_as(
        "SELECT rating, COUNT(*) FROM reviews WHERE status = 'approved' GROUP BY rating",
    )
    .fetch_all(pool)
    .await?;

    let mut rating_sum = 0;
    for (rating, count) in distribution {
        if (1..=5).contains(&rating) {
            stats.rating_distribution[(rating - 1) as usize] = count;
            rating_sum += rating * count;
        }
    }

    if stats.approved > 0 {
        let approved = stats.approved as f64;
        stats.average_rating = round_to(rating_sum as f64 / approved, 2);
        let positive = stats.rating_distribution[3] + stats.rating_distribution[4];
        stats.positive_percentage = round_to(positive as f64 * 100.0 / approved, 1);
    }

    Ok(stats)
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
