//! 认证授权模块
//!
//! 提供 JWT 认证、密码哈希、角色检查和登录限流：
//! - [`JwtService`] - JWT 令牌服务
//! - [`CurrentUser`] - 当前用户上下文
//! - [`authenticate`] - 全局认证中间件
//! - [`require_auth`] / [`require_role`] - 路由级访问控制
//! - [`RateLimiter`] - 登录限流

pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod password;
pub mod permissions;
pub mod rate_limit;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{authenticate, authenticate_token, require_auth, require_role};
pub use password::{hash_password, verify_password};
pub use permissions::{ADMIN_ONLY, ASSIGNABLE_STAFF_ROLES, KITCHEN_ROLES, STAFF_ROLES};
pub use rate_limit::{RateLimiter, login_rate_limit};
