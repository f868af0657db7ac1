//! Data models
//!
//! Shared between the server and API clients.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY), timestamps are Unix millis.

pub mod inventory_item;
pub mod menu_item;
pub mod order;
pub mod reservation;
pub mod review;
pub mod user;

// Re-exports
pub use inventory_item::*;
pub use menu_item::*;
pub use order::*;
pub use reservation::*;
pub use review::*;
pub use user::*;
