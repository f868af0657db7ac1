//! Service-layer error type
//!
//! `ServiceError` bridges storage errors (`sqlx::Error`) and the API-layer
//! error (`AppError`), so handlers and services can use `?` on both.

use axum::response::IntoResponse;

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Service-layer error
///
/// - `Db`: storage/infrastructure errors (logged here, mapped to a generic 500)
/// - `App`: business-rule errors (passed through to the client unchanged)
#[derive(Debug)]
pub enum ServiceError {
    Db(BoxError),
    App(AppError),
}

impl From<sqlx::Error> for ServiceError {
    fn from(e: sqlx::Error) -> Self {
        ServiceError::Db(e.into())
    }
}

impl From<AppError> for ServiceError {
    fn from(e: AppError) -> Self {
        ServiceError::App(e)
    }
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::App(app_err) => app_err,
            ServiceError::Db(db_err) => {
                tracing::error!(error = %db_err, "Service database error");
                AppError::new(ErrorCode::InternalError)
            }
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> axum::response::Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Map a storage error for handlers returning `AppResult` (logged, rendered as a generic 500)
pub fn db_err(e: sqlx::Error) -> AppError {
    ServiceError::from(e).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn db_errors_do_not_leak_details() {
        let err: AppError = ServiceError::from(sqlx::Error::RowNotFound).into();
        assert_eq!(err.code, ErrorCode::InternalError);
        assert_eq!(err.message, "Internal server error");
    }

    #[test]
    fn app_errors_pass_through() {
        let err: AppError = ServiceError::from(AppError::new(ErrorCode::OrderNotFound)).into();
        assert_eq!(err.code, ErrorCode::OrderNotFound);
    }
}
