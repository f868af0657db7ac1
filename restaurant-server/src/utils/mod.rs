//! 工具模块
//!
//! - [`AppError`] / [`ServiceError`] - 错误类型
//! - [`logger`] - 日志初始化
//! - [`validation`] - 输入校验

pub mod error;
pub mod logger;
pub mod validation;

pub use error::{
    ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode, ServiceError, ServiceResult, db_err,
};
