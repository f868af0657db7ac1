//! Shared types for the restaurant backend
//!
//! Types used by the server and by any Rust client of its API:
//! the unified error system, domain models and the real-time event envelope.

pub mod error;
pub mod live;
pub mod models;
pub mod util;

// Re-exports
pub use axum::Json;
pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use http;
pub use live::LiveEvent;
pub use serde::{Deserialize, Serialize};
