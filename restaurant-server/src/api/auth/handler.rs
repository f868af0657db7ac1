//! Authentication Handlers
//!
//! Handles registration, login and the current account

use std::time::Duration;

use axum::{Json, extract::State, http::StatusCode};
use shared::models::{AuthResponse, LoginRequest, RegisterRequest, Role, User, UserResponse};

use crate::auth::{CurrentUser, hash_password, verify_password};
use crate::core::ServerState;
use crate::db;
use crate::db::users::NewUser;
use crate::security_log;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_email, validate_optional_text,
    validate_password, validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode, ServiceError, ServiceResult, db_err};

/// Fixed delay before answering a failed login, hides whether the email exists
const AUTH_FIXED_DELAY_MS: u64 = 100;

/// Validated account fields shared by self-registration and staff creation
pub(crate) struct AccountInput<'a> {
    pub email: &'a str,
    pub name: &'a str,
    pub password: &'a str,
    pub phone: Option<String>,
    pub role: Role,
}

/// Validate, hash and insert a new account
///
/// Duplicate emails (case-insensitive) fail with `EmailAlreadyRegistered`.
pub(crate) async fn create_account(
    state: &ServerState,
    input: AccountInput<'_>,
) -> ServiceResult<User> {
    let email = input.email.trim();
    let name = input.name.trim();
    validate_email(email)?;
    validate_required_text(name, "name", MAX_NAME_LEN)?;
    validate_password(input.password)?;
    let phone = input
        .phone
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty());
    validate_optional_text(&phone, "phone", MAX_SHORT_TEXT_LEN)?;

    if db::users::find_by_email(&state.pool, email).await?.is_some() {
        return Err(email_taken(email).into());
    }

    let password_hash = hash_password(input.password).map_err(|e| {
        tracing::error!(error = %e, "Password hashing failed");
        AppError::internal("Failed to hash password")
    })?;

    let user = db::users::create(
        &state.pool,
        NewUser {
            email,
            name,
            phone: phone.as_deref(),
            password_hash: &password_hash,
            role: input.role,
        },
    )
    .await
    .map_err(|e| account_insert_error(e, email))?;

    tracing::info!(user_id = user.id, role = %user.role, "Account created");
    Ok(user)
}

/// 插入账号失败: 唯一约束冲突说明并发注册抢先一步
fn account_insert_error(e: sqlx::Error, email: &str) -> ServiceError {
    match e {
        sqlx::Error::Database(ref db_error) if db_error.is_unique_violation() => {
            ServiceError::from(email_taken(email))
        }
        other => ServiceError::from(other),
    }
}

fn email_taken(email: &str) -> AppError {
    AppError::new(ErrorCode::EmailAlreadyRegistered).with_detail("email", email)
}

fn issue_token(state: &ServerState, user: User) -> AppResult<AuthResponse> {
    let access_token = state.get_jwt_service().generate_token(&user).map_err(|e| {
        tracing::error!(error = %e, "Token generation failed");
        AppError::internal("Failed to generate token")
    })?;

    Ok(AuthResponse {
        access_token,
        token_type: "Bearer".to_string(),
        user: user.into(),
    })
}

/// POST /api/auth/register - 注册顾客账号
pub async fn register(
    State(state): State<ServerState>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    let user = create_account(
        &state,
        AccountInput {
            email: &req.email,
            name: &req.name,
            password: &req.password,
            phone: req.phone,
            role: Role::Customer,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(issue_token(&state, user)?)))
}

/// POST /api/auth/login - 登录并返回令牌
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let email = req.email.trim();
    let user = db::users::find_by_email(&state.pool, email)
        .await
        .map_err(db_err)?;

    // unified error for unknown email and wrong password
    let user = match user {
        Some(user) if verify_password(&req.password, &user.password_hash) => user,
        found => {
            tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;
            security_log!(
                "WARN",
                "login_failed",
                email = email.to_string(),
                reason = if found.is_some() { "invalid_password" } else { "user_not_found" }
            );
            return Err(AppError::invalid_credentials());
        }
    };

    tracing::info!(user_id = user.id, role = %user.role, "User logged in successfully");
    Ok(Json(issue_token(&state, user)?))
}

/// GET /api/auth/me - 当前账号
pub async fn me(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<UserResponse>> {
    let account = db::users::find_by_id(&state.pool, user.id)
        .await
        .map_err(db_err)?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))?;
    Ok(Json(account.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(email: &'static str) -> NewUser<'static> {
        NewUser {
            email,
            name: "Ada",
            phone: None,
            password_hash: "x",
            role: Role::Customer,
        }
    }

    #[tokio::test]
    async fn duplicate_insert_maps_to_email_taken() {
        let pool = db::open_in_memory().await.unwrap();
        db::users::create(&pool, account("ada@example.com"))
            .await
            .unwrap();

        // the pre-check passed, then a concurrent registration won the insert
        let err = db::users::create(&pool, account("ada@example.com"))
            .await
            .unwrap_err();
        let err = AppError::from(account_insert_error(err, "ada@example.com"));
        assert_eq!(err.code, ErrorCode::EmailAlreadyRegistered);
        assert_eq!(err.details.unwrap()["email"], "ada@example.com");
    }

    #[test]
    fn other_storage_errors_stay_internal() {
        let err = AppError::from(account_insert_error(sqlx::Error::PoolTimedOut, "ada@example.com"));
        assert_eq!(err.code, ErrorCode::InternalError);
    }
}
