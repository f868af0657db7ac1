//! 认证中间件
//!
//! 为 JWT 认证和基于角色的授权提供 Axum 中间件

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use shared::models::Role;

use crate::auth::permissions::ADMIN_ONLY;
use crate::auth::{CurrentUser, JwtError, JwtService};
use crate::core::ServerState;
use crate::security_log;
use crate::utils::{AppError, ErrorCode};

/// 全局认证中间件 - 解析可选的调用者身份
///
/// 存在 `Authorization` 头时必须是有效的 `Bearer <token>`,
/// 验证成功后将 [`CurrentUser`] 注入请求扩展; 没有该头的请求以匿名身份继续。
///
/// | 情况 | 结果 |
/// |------|------|
/// | 无 Authorization 头 | 匿名继续 |
/// | 头格式错误 / 令牌无效 | 401 TokenInvalid |
/// | 令牌过期 | 401 TokenExpired |
pub async fn authenticate(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    // CORS 预检
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    let header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    if let Some(header) = header {
        let user = authenticate_header(state.get_jwt_service(), header, req.uri())?;
        req.extensions_mut().insert(user);
    }

    Ok(next.run(req).await)
}

/// 解析 `Authorization` 头并验证其中的令牌
pub fn authenticate_header(
    jwt_service: &JwtService,
    header: &str,
    uri: &http::Uri,
) -> Result<CurrentUser, AppError> {
    let token = JwtService::extract_from_header(header)
        .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?;
    authenticate_token(jwt_service, token, uri)
}

/// 验证裸令牌 (WebSocket 通过查询参数传入)
pub fn authenticate_token(
    jwt_service: &JwtService,
    token: &str,
    uri: &http::Uri,
) -> Result<CurrentUser, AppError> {
    let claims = jwt_service.validate_token(token).map_err(|e| {
        security_log!(
            "WARN",
            "auth_failed",
            error = format!("{}", e),
            uri = uri.path().to_string()
        );
        match e {
            JwtError::ExpiredToken => AppError::token_expired(),
            _ => AppError::invalid_token("Invalid token"),
        }
    })?;

    CurrentUser::try_from(claims)
        .map_err(|e| AppError::invalid_token(format!("Malformed JWT claims: {}", e)))
}

/// 认证中间件 - 要求用户登录
///
/// 依赖全局 [`authenticate`] 已注入的 [`CurrentUser`], 匿名请求返回 401
pub async fn require_auth(req: Request, next: Next) -> Result<Response, AppError> {
    if req.extensions().get::<CurrentUser>().is_none() {
        security_log!("WARN", "auth_missing", uri = req.uri().path().to_string());
        return Err(AppError::unauthorized());
    }
    Ok(next.run(req).await)
}

/// 角色检查中间件 - 调用者角色必须属于给定集合
///
/// # 用法
///
/// ```ignore
/// use axum::middleware;
/// Router::new()
///     .route("/api/inventory", get(handler::list))
///     .route_layer(middleware::from_fn(require_role(STAFF_ROLES)));
/// ```
///
/// # 错误
///
/// 匿名返回 401, 角色不符返回 403 (仅含 admin 的集合返回 AdminRequired)
pub fn require_role(
    roles: &'static [Role],
) -> impl Fn(
    Request,
    Next,
) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Response, AppError>> + Send>>
+ Clone {
    move |req: Request, next: Next| {
        Box::pin(async move {
            let user = req
                .extensions()
                .get::<CurrentUser>()
                .ok_or(AppError::unauthorized())?;

            if !user.has_any_role(roles) {
                security_log!(
                    "WARN",
                    "permission_denied",
                    user_id = user.id,
                    email = user.email.clone(),
                    user_role = user.role.as_str(),
                    uri = req.uri().path().to_string()
                );
                if roles == ADMIN_ONLY {
                    return Err(AppError::new(ErrorCode::AdminRequired));
                }
                let allowed = roles
                    .iter()
                    .map(Role::as_str)
                    .collect::<Vec<_>>()
                    .join(", ");
                return Err(AppError::with_message(
                    ErrorCode::RoleRequired,
                    format!("Requires one of roles: {allowed}"),
                ));
            }

            Ok(next.run(req).await)
        })
    }
}
