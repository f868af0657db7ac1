//! Restaurant Server - 餐厅订单、库存与预订服务
//!
//! # 架构概述
//!
//! - **数据库** (`db`): SQLite (sqlx), 启动时执行迁移
//! - **认证** (`auth`): JWT + Argon2, 基于角色的路由授权
//! - **订单** (`orders`): 下单事务、状态流转、库存扣减
//! - **实时推送** (`live`): 按主题分发订单事件到 WebSocket 连接
//! - **HTTP API** (`api`): RESTful 接口
//!
//! # 模块结构
//!
//! ```text
//! restaurant-server/src/
//! ├── core/          # 配置、状态、错误、服务器
//! ├── auth/          # JWT 认证、角色、限流
//! ├── api/           # HTTP 路由和处理器
//! ├── db/            # 存储层
//! ├── live/          # 实时订单推送注册表
//! ├── orders/        # 订单业务
//! └── utils/         # 错误、日志、校验
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod live;
pub mod orders;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState, build_app};
pub use live::LiveOrderHub;
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ApiResponse, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - 认证失败、权限拒绝等事件写入 `security` target
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}
