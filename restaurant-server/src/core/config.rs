use crate::auth::JwtConfig;
use crate::core::{Result, ServerError};

const DEV_JWT_SECRET: &str = "dev-jwt-secret-not-for-production-use-only";

/// 服务器配置
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | ENVIRONMENT | development | 运行环境 |
/// | DATABASE_URL | sqlite://restaurant.db?mode=rwc | SQLite 连接串 |
/// | HTTP_PORT | 5000 | HTTP 服务端口 |
/// | JWT_SECRET | (开发环境占位) | 非开发环境必填, 至少 32 字符 |
/// | JWT_EXPIRATION_MINUTES | 1440 | 令牌有效期 |
/// | JWT_ISSUER / JWT_AUDIENCE | restaurant-server / restaurant-clients | 令牌声明 |
/// | LOG_LEVEL | info | 默认日志级别 (RUST_LOG 优先) |
/// | LOG_JSON | false | JSON 日志 |
/// | LOG_DIR | - | 按天滚动的日志目录 |
/// | ADMIN_EMAIL / ADMIN_PASSWORD / ADMIN_NAME | - | 启动时创建的初始管理员 |
/// | SHUTDOWN_TIMEOUT_MS | 10000 | 优雅关闭等待时间 |
#[derive(Debug, Clone)]
pub struct Config {
    /// 运行环境: development | staging | production
    pub environment: String,
    pub database_url: String,
    pub http_port: u16,
    pub jwt: JwtConfig,
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<String>,
    /// 初始管理员 (仅当库中没有管理员时创建)
    pub bootstrap_admin: Option<BootstrapAdmin>,
    pub shutdown_timeout_ms: u64,
}

#[derive(Debug, Clone)]
pub struct BootstrapAdmin {
    pub email: String,
    pub password: String,
    pub name: String,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 缺失的可选项使用默认值; 非开发环境缺少 JWT_SECRET 时返回错误
    pub fn from_env() -> Result<Self> {
        let environment = env_or("ENVIRONMENT", "development");

        let jwt = JwtConfig {
            secret: Self::require_secret("JWT_SECRET", &environment)?,
            expiration_minutes: env_parse("JWT_EXPIRATION_MINUTES", 1440),
            issuer: env_or("JWT_ISSUER", "restaurant-server"),
            audience: env_or("JWT_AUDIENCE", "restaurant-clients"),
        };

        let bootstrap_admin = match (env_opt("ADMIN_EMAIL"), env_opt("ADMIN_PASSWORD")) {
            (Some(email), Some(password)) => Some(BootstrapAdmin {
                email,
                password,
                name: env_or("ADMIN_NAME", "Administrator"),
            }),
            _ => None,
        };

        Ok(Self {
            database_url: env_or("DATABASE_URL", "sqlite://restaurant.db?mode=rwc"),
            http_port: env_parse("HTTP_PORT", 5000),
            jwt,
            log_level: env_or("LOG_LEVEL", "info"),
            log_json: env_parse("LOG_JSON", false),
            log_dir: env_opt("LOG_DIR"),
            bootstrap_admin,
            shutdown_timeout_ms: env_parse("SHUTDOWN_TIMEOUT_MS", 10_000),
            environment,
        })
    }

    /// 开发环境允许缺省密钥, 其他环境必须显式设置且不少于 32 字符
    fn require_secret(name: &str, environment: &str) -> Result<String> {
        match std::env::var(name) {
            Ok(val) if val.len() >= 32 => Ok(val),
            Ok(_) if environment == "development" => {
                tracing::warn!("{name} is shorter than 32 characters");
                Ok(DEV_JWT_SECRET.to_string())
            }
            Ok(_) => Err(ServerError::Config(format!(
                "{name} must be at least 32 characters long"
            ))),
            Err(_) if environment == "development" => Ok(DEV_JWT_SECRET.to_string()),
            Err(_) => Err(ServerError::Config(format!(
                "{name} must be set in {environment} environment"
            ))),
        }
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// 测试用配置: 内存数据库, 固定密钥
    pub fn for_tests() -> Self {
        Self {
            environment: "test".to_string(),
            database_url: "sqlite::memory:".to_string(),
            http_port: 0,
            jwt: JwtConfig {
                secret: "test-secret-key-that-is-at-least-32-chars".to_string(),
                expiration_minutes: 60,
                issuer: "restaurant-server".to_string(),
                audience: "restaurant-clients".to_string(),
            },
            log_level: "debug".to_string(),
            log_json: false,
            log_dir: None,
            bootstrap_admin: None,
            shutdown_timeout_ms: 1_000,
        }
    }
}

fn env_opt(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn env_or(name: &str, default: &str) -> String {
    env_opt(name).unwrap_or_else(|| default.to_string())
}

fn env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
