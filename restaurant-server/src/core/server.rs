//! Server Implementation
//!
//! HTTP 服务器启动、中间件装配和优雅关闭

use std::net::SocketAddr;
use std::time::Duration;

use axum::{Router, middleware};
use http::HeaderName;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::api;
use crate::auth::authenticate;
use crate::core::{Config, Result, ServerError, ServerState};

/// 限流记录清理间隔
const RATE_LIMIT_CLEANUP_INTERVAL: Duration = Duration::from_secs(300);

const REQUEST_ID_HEADER: &str = "x-request-id";

/// HTTP 请求日志中间件
async fn log_request(
    request: http::Request<axum::body::Body>,
    next: middleware::Next,
) -> http::Response<axum::body::Body> {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;

    let status = response.status();

    tracing::info!(target: "http_access", "{} {} {}", method, uri, status);

    response
}

/// Build a fully configured application with all middleware and state
///
/// Used by the HTTP server and by in-process router tests
pub fn build_app(state: &ServerState) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    api::routes(state)
        // REST 响应压缩; WebSocket 升级响应不经过该层
        .layer(CompressionLayer::new())
        .merge(api::ws::router())
        // 解析可选的 Bearer 令牌, 注入 CurrentUser
        .layer(middleware::from_fn_with_state(state.clone(), authenticate))
        .with_state(state.clone())
        // ========== Tower HTTP Middleware ==========
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn(log_request))
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
}

/// HTTP Server
pub struct Server {
    config: Config,
    state: ServerState,
}

impl Server {
    /// Create server with existing state
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self { config, state }
    }

    /// 监听端口直到收到关闭信号
    ///
    /// 收到信号后先关闭实时推送 (各会话发送 Close 帧), 再在
    /// `shutdown_timeout_ms` 内等待 HTTP 连接排空
    pub async fn run(self) -> Result<()> {
        let addr = SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Restaurant server listening on {}", addr);

        self.spawn_background_tasks();

        let app = build_app(&self.state);
        let hub = self.state.hub.clone();
        let (signalled_tx, mut signalled_rx) = tokio::sync::watch::channel(false);

        let serve = axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            hub.shutdown();
            let _ = signalled_tx.send(true);
        });
        let mut server = tokio::spawn(async move { serve.await });

        tokio::select! {
            finished = &mut server => {
                return finished
                    .map_err(|e| ServerError::Internal(e.into()))?
                    .map_err(ServerError::from);
            }
            _ = signalled_rx.changed() => {}
        }

        let grace = Duration::from_millis(self.config.shutdown_timeout_ms);
        match tokio::time::timeout(grace, server).await {
            Ok(finished) => {
                finished.map_err(|e| ServerError::Internal(e.into()))??;
                tracing::info!("Server stopped");
            }
            Err(_) => {
                tracing::warn!(
                    timeout_ms = self.config.shutdown_timeout_ms,
                    "Connections still open after shutdown timeout, exiting"
                );
            }
        }
        Ok(())
    }

    fn spawn_background_tasks(&self) {
        let rate_limiter = self.state.rate_limiter.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(RATE_LIMIT_CLEANUP_INTERVAL);
            interval.tick().await; // skip immediate
            loop {
                interval.tick().await;
                rate_limiter.cleanup().await;
            }
        });
    }
}

/// Graceful shutdown handler
///
/// Listens for SIGTERM and Ctrl+C signals
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, shutting down gracefully...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, shutting down gracefully...");
        },
    }
}
