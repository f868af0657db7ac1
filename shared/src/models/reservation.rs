//! Reservation Model

use serde::{Deserialize, Serialize};

/// Table reservation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Reservation {
    pub id: i64,
    /// Set when the reservation was made by a logged-in user
    pub user_id: Option<i64>,
    pub name: String,
    pub phone: String,
    pub party_size: i64,
    /// YYYY-MM-DD
    pub date: String,
    /// HH:MM (24h)
    pub time: String,
    pub notes: Option<String>,
    pub created_at: i64,
}

/// Create reservation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationCreate {
    pub name: String,
    pub phone: String,
    pub party_size: i64,
    pub date: String,
    pub time: String,
    pub notes: Option<String>,
}
