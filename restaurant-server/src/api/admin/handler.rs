//! Admin API Handlers

use axum::{Json, extract::State, http::StatusCode};
use shared::models::{StaffCreate, UserResponse};

use crate::api::auth::{AccountInput, create_account};
use crate::auth::{ASSIGNABLE_STAFF_ROLES, CurrentUser};
use crate::core::ServerState;
use crate::db;
use crate::db::dashboard::DashboardSummary;
use crate::utils::{AppError, AppResult, db_err};

/// POST /api/admin/staff - 创建内部账号
pub async fn create_staff(
    State(state): State<ServerState>,
    admin: CurrentUser,
    Json(payload): Json<StaffCreate>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    if !ASSIGNABLE_STAFF_ROLES.contains(&payload.role) {
        return Err(AppError::validation(format!(
            "role must be one of staff, kitchen, admin (got {})",
            payload.role
        ))
        .with_detail("field", "role"));
    }

    let user = create_account(
        &state,
        AccountInput {
            email: &payload.email,
            name: &payload.name,
            password: &payload.password,
            phone: payload.phone.clone(),
            role: payload.role,
        },
    )
    .await?;

    tracing::info!(
        user_id = user.id,
        role = %user.role,
        created_by = admin.id,
        "Staff account created"
    );
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// GET /api/admin/dashboard - 今日营收、进行中订单等
pub async fn dashboard(State(state): State<ServerState>) -> AppResult<Json<DashboardSummary>> {
    let summary = db::dashboard::summary(&state.pool).await.map_err(db_err)?;
    Ok(Json(summary))
}
