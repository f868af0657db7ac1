use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::{JwtService, RateLimiter};
use crate::core::{Config, Result};
use crate::db;
use crate::live::LiveOrderHub;

/// 服务器状态 - 显式构造的应用上下文
///
/// 启动时初始化一次, 通过 axum `State` 传入所有处理器。
/// 克隆成本很低 (内部均为 `Arc` / 连接池句柄)。
#[derive(Clone)]
pub struct ServerState {
    pub config: Arc<Config>,
    /// SQLite 连接池
    pub pool: SqlitePool,
    pub jwt_service: Arc<JwtService>,
    /// 实时订单推送注册表
    pub hub: LiveOrderHub,
    /// 登录限流
    pub rate_limiter: RateLimiter,
}

impl ServerState {
    /// 打开数据库、执行迁移、创建初始管理员
    pub async fn initialize(config: &Config) -> Result<Self> {
        let pool = db::connect(&config.database_url).await?;
        db::migrate(&pool).await?;

        if let Some(admin) = &config.bootstrap_admin {
            db::users::ensure_admin(&pool, admin).await?;
        }

        Ok(Self::with_pool(config.clone(), pool))
    }

    /// 使用已有连接池构造 (测试使用内存库)
    pub fn with_pool(config: Config, pool: SqlitePool) -> Self {
        Self {
            jwt_service: Arc::new(JwtService::with_config(config.jwt.clone())),
            config: Arc::new(config),
            pool,
            hub: LiveOrderHub::new(),
            rate_limiter: RateLimiter::new(),
        }
    }

    pub fn get_jwt_service(&self) -> &JwtService {
        &self.jwt_service
    }
}
