//! Reviews API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use shared::models::{Review, ReviewCreate, ReviewModerate, ReviewQuery, ReviewStats, ReviewStatus};

use crate::auth::{CurrentUser, STAFF_ROLES};
use crate::core::ServerState;
use crate::db;
use crate::db::reviews::{NewReview, ReviewFilter};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, validate_email, validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode, db_err};

fn parse_review_status(value: &str) -> AppResult<ReviewStatus> {
    value.trim().parse().map_err(|_| {
        AppError::with_message(
            ErrorCode::ReviewInvalidStatus,
            format!("Unknown review status: {value}"),
        )
        .with_detail("status", value)
    })
}

fn is_moderator(user: Option<&CurrentUser>) -> bool {
    user.is_some_and(|u| u.has_any_role(STAFF_ROLES))
}

/// Prefer the submitted value, fall back to the account's
fn pick(submitted: Option<String>, account: Option<&str>) -> String {
    submitted
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .or_else(|| account.map(str::to_string))
        .unwrap_or_default()
}

/// POST /api/reviews - 提交评价 (待审核)
pub async fn create(
    State(state): State<ServerState>,
    user: Option<CurrentUser>,
    Json(payload): Json<ReviewCreate>,
) -> AppResult<(StatusCode, Json<Review>)> {
    if !(1..=5).contains(&payload.rating) {
        return Err(AppError::with_message(
            ErrorCode::ReviewInvalidRating,
            "rating must be between 1 and 5",
        )
        .with_detail("rating", payload.rating));
    }

    let name = pick(payload.name, user.as_ref().map(|u| u.name.as_str()));
    let email = pick(payload.email, user.as_ref().map(|u| u.email.as_str()));
    validate_required_text(&name, "name", MAX_NAME_LEN)?;
    validate_email(&email)?;
    validate_optional_text(&payload.comment, "comment", MAX_NOTE_LEN)?;

    if let Some(order_id) = payload.order_id {
        if db::orders::find_by_id(&state.pool, order_id)
            .await
            .map_err(db_err)?
            .is_none()
        {
            return Err(
                AppError::new(ErrorCode::OrderNotFound).with_detail("order_id", order_id)
            );
        }
        if let Some(user) = &user
            && db::reviews::exists_for_user_order(&state.pool, user.id, order_id)
                .await
                .map_err(db_err)?
        {
            return Err(already_reviewed(order_id));
        }
    }

    let comment = payload
        .comment
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty());

    let review = db::reviews::create(
        &state.pool,
        &NewReview {
            user_id: user.as_ref().map(|u| u.id),
            order_id: payload.order_id,
            name: &name,
            email: &email,
            rating: payload.rating,
            comment,
        },
    )
    .await
    .map_err(|e| match (e, payload.order_id) {
        (sqlx::Error::Database(ref db_error), Some(order_id)) if db_error.is_unique_violation() => {
            already_reviewed(order_id)
        }
        (other, _) => db_err(other),
    })?;

    tracing::info!(review_id = review.id, rating = review.rating, "Review submitted");
    Ok((StatusCode::CREATED, Json(review)))
}

fn already_reviewed(order_id: i64) -> AppError {
    AppError::new(ErrorCode::ReviewAlreadyExists).with_detail("order_id", order_id)
}

/// GET /api/reviews - 评价列表 (非员工仅见 approved, 且不含 admin_comment)
pub async fn list(
    State(state): State<ServerState>,
    user: Option<CurrentUser>,
    Query(query): Query<ReviewQuery>,
) -> AppResult<Json<Vec<Review>>> {
    let moderator = is_moderator(user.as_ref());

    let requested = query
        .status
        .as_deref()
        .map(parse_review_status)
        .transpose()?;
    let status = if moderator {
        requested
    } else {
        match requested {
            None | Some(ReviewStatus::Approved) => Some(ReviewStatus::Approved),
            Some(_) => return Ok(Json(Vec::new())),
        }
    };

    let filter = ReviewFilter {
        status,
        user_id: query.user_id,
        order_id: query.order_id,
        email: query.email.map(|e| e.trim().to_string()).filter(|e| !e.is_empty()),
        min_rating: query.min_rating,
    };
    let mut reviews = db::reviews::list(&state.pool, &filter)
        .await
        .map_err(db_err)?;

    if !moderator {
        for review in &mut reviews {
            review.admin_comment = None;
        }
    }
    Ok(Json(reviews))
}

/// PATCH /api/reviews/{id} - 审核
pub async fn moderate(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<ReviewModerate>,
) -> AppResult<Json<Review>> {
    let status = payload
        .status
        .as_deref()
        .map(parse_review_status)
        .transpose()?;
    validate_optional_text(&payload.admin_comment, "admin_comment", MAX_NOTE_LEN)?;

    let review = db::reviews::moderate(&state.pool, id, status, payload.admin_comment.as_deref())
        .await
        .map_err(db_err)?
        .ok_or_else(|| AppError::new(ErrorCode::ReviewNotFound).with_detail("review_id", id))?;

    tracing::info!(
        review_id = id,
        status = %review.status,
        moderator_id = user.id,
        "Review moderated"
    );
    Ok(Json(review))
}

/// GET /api/reviews/stats - 评价统计
pub async fn stats(State(state): State<ServerState>) -> AppResult<Json<ReviewStats>> {
    let stats = db::reviews::stats(&state.pool).await.map_err(db_err)?;
    Ok(Json(stats))
}
