//! WebSocket session
//!
//! 协议 (Server → Client, JSON text):
//! - `{"event":"ready","data":{"topics":[...]}}` 握手完成
//! - `{"event":"order:created","data":<order>}`
//! - `{"event":"order:updated","data":{"order":<order>,"previous_status":"..."}}`
//!
//! 客户端发来的文本帧被忽略; 关闭帧或错误结束会话。

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade, rejection::WebSocketUpgradeRejection};
use axum::extract::{OriginalUri, Query, State};
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use shared::LiveEvent;
use tokio::time::Duration;

use crate::auth::{CurrentUser, authenticate_token};
use crate::core::ServerState;
use crate::live::Topic;
use crate::utils::{AppError, AppResult};

const PING_INTERVAL: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
pub struct WsAuthQuery {
    token: Option<String>,
}

/// GET /api/ws?token=<JWT> - 认证后升级为 WebSocket
///
/// 令牌缺失或无效时直接返回 401, 不进行升级
pub async fn upgrade(
    State(state): State<ServerState>,
    OriginalUri(uri): OriginalUri,
    Query(query): Query<WsAuthQuery>,
    ws: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
) -> AppResult<Response> {
    let token = query
        .token
        .filter(|t| !t.is_empty())
        .ok_or_else(AppError::unauthorized)?;
    let user = authenticate_token(state.get_jwt_service(), &token, &uri)?;

    let ws = ws.map_err(|e| AppError::invalid(e.body_text()))?;
    Ok(ws.on_upgrade(move |socket| session(socket, state, user)))
}

async fn session(socket: WebSocket, state: ServerState, user: CurrentUser) {
    let (mut sink, mut stream) = socket.split();

    let mut subscription = state.hub.subscribe(Topic::for_user(&user));
    let mut topics: Vec<String> = subscription.topics.iter().map(Topic::label).collect();
    topics.sort();

    tracing::info!(
        user_id = user.id,
        role = %user.role,
        connection_id = subscription.id,
        "Live order connection opened"
    );

    let ready = LiveEvent::Ready { topics };
    if send_message(&mut sink, &ready).await.is_ok() {
        let mut ping_interval = tokio::time::interval(PING_INTERVAL);
        ping_interval.tick().await; // skip immediate

        loop {
            tokio::select! {
                _ = ping_interval.tick() => {
                    if sink.send(Message::Ping(Vec::new().into())).await.is_err() {
                        break;
                    }
                }

                event = subscription.rx.recv() => {
                    match event {
                        Some(event) => {
                            if send_message(&mut sink, &event).await.is_err() {
                                break;
                            }
                        }
                        // hub shut down
                        None => {
                            let _ = sink.send(Message::Close(None)).await;
                            break;
                        }
                    }
                }

                msg = stream.next() => {
                    match msg {
                        Some(Ok(Message::Close(_))) | None => break,
                        Some(Err(e)) => {
                            tracing::debug!(connection_id = subscription.id, error = %e, "Live order connection error");
                            break;
                        }
                        _ => {}
                    }
                }
            }
        }
    }

    state.hub.unsubscribe(subscription.id);
    tracing::info!(
        user_id = user.id,
        connection_id = subscription.id,
        "Live order connection closed"
    );
}

async fn send_message<S>(sink: &mut S, event: &LiveEvent) -> Result<(), ()>
where
    S: futures::Sink<Message, Error = axum::Error> + Unpin,
{
    let json = serde_json::to_string(event).map_err(|e| {
        tracing::error!(event = event.name(), error = %e, "Failed to serialize live event");
    })?;
    sink.send(Message::Text(json.into())).await.map_err(|_| ())
}
