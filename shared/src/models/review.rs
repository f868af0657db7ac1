//! Review Model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Moderation status of a review
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum ReviewStatus {
    Pending,
    Approved,
    Rejected,
}

impl ReviewStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ReviewStatus::Pending => "pending",
            ReviewStatus::Approved => "approved",
            ReviewStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReviewStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ReviewStatus::Pending),
            "approved" => Ok(ReviewStatus::Approved),
            "rejected" => Ok(ReviewStatus::Rejected),
            other => Err(format!("unknown review status: {other}")),
        }
    }
}

/// Customer review
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Review {
    pub id: i64,
    pub user_id: Option<i64>,
    pub order_id: Option<i64>,
    pub name: String,
    pub email: String,
    /// 1..=5
    pub rating: i64,
    pub comment: Option<String>,
    /// Only serialized for staff and admins
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_comment: Option<String>,
    pub status: ReviewStatus,
    /// Derived in SQL from `user_id IS NULL`
    pub is_guest: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create review payload
///
/// Authenticated callers may omit `name`/`email`; they default from the account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewCreate {
    pub rating: i64,
    pub name: Option<String>,
    pub email: Option<String>,
    pub comment: Option<String>,
    pub order_id: Option<i64>,
}

/// Moderation payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewModerate {
    pub status: Option<String>,
    pub admin_comment: Option<String>,
}

/// List filters for `GET /api/reviews`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewQuery {
    pub status: Option<String>,
    pub user_id: Option<i64>,
    pub order_id: Option<i64>,
    pub email: Option<String>,
    pub min_rating: Option<i64>,
}

/// Aggregated review statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewStats {
    pub total: i64,
    pub pending: i64,
    pub approved: i64,
    pub rejected: i64,
    /// Mean rating of approved reviews, 2 dp (0 when none)
    pub average_rating: f64,
    /// Approved review count per star, index 0 = 1 star
    pub rating_distribution: [i64; 5],
    /// Share of approved reviews rated 4 or 5, percent with 1 dp
    pub positive_percentage: f64,
}
