//! JWT Extractor
//!
//! `CurrentUser` as a handler argument: required (`CurrentUser`) or
//! optional (`Option<CurrentUser>`) for routes open to guests.

use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use axum::http::request::Parts;

use crate::auth::CurrentUser;
use crate::auth::middleware::authenticate_header;
use crate::core::ServerState;
use crate::security_log;
use crate::utils::AppError;

/// Resolve the caller, reusing what the `authenticate` middleware stored
fn resolve(parts: &mut Parts, state: &ServerState) -> Result<Option<CurrentUser>, AppError> {
    if let Some(user) = parts.extensions.get::<CurrentUser>() {
        return Ok(Some(user.clone()));
    }

    let Some(header) = parts
        .headers
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
    else {
        return Ok(None);
    };

    let user = authenticate_header(state.get_jwt_service(), header, &parts.uri)?;
    parts.extensions.insert(user.clone());
    Ok(Some(user))
}

impl FromRequestParts<ServerState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        match resolve(parts, state)? {
            Some(user) => Ok(user),
            None => {
                security_log!("WARN", "auth_missing", uri = parts.uri.path().to_string());
                Err(AppError::unauthorized())
            }
        }
    }
}

impl OptionalFromRequestParts<ServerState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Option<Self>, Self::Rejection> {
        resolve(parts, state)
    }
}
