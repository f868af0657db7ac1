use shared::models::Reservation;
use shared::util::now_millis;
use sqlx::SqlitePool;

/// Validated reservation to insert (date/time already normalised)
pub struct NewReservation<'a> {
    pub user_id: Option<i64>,
    pub name: &'a str,
    pub phone: &'a str,
    pub party_size: i64,
    pub date: &'a str,
    pub time: &'a str,
    pub notes: Option<&'a str>,
}

pub async fn create(pool: &SqlitePool, r: &NewReservation<'_>) -> Result<Reservation, sqlx::Error> {
    sqlx::query_as(
        "INSERT INTO reservations (user_id, name, phone, party_size, date, time, notes, created_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)
         RETURNING *",
    )
    .bind(r.user_id)
    .bind(r.name)
    .bind(r.phone)
    .bind(r.party_size)
    .bind(r.date)
    .bind(r.time)
    .bind(r.notes)
    .bind(now_millis())
    .fetch_one(pool)
    .await
}

/// All reservations by date then time
pub async fn list(pool: &SqlitePool) -> Result<Vec<Reservation>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM reservations ORDER BY date, time, id")
        .fetch_all(pool)
        .await
}

pub async fn count_on(pool: &SqlitePool, date: &str) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM reservations WHERE date = ?")
        .bind(date)
        .fetch_one(pool)
        .await
}
