//! Authentication Routes

mod handler;

pub(crate) use handler::{AccountInput, create_account};

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::{login_rate_limit, require_auth};
use crate::core::ServerState;

/// Build authentication router
/// - /api/auth/register: public
/// - /api/auth/login: public, rate limited per client IP
/// - /api/auth/me: requires authentication
pub fn router(state: &ServerState) -> Router<ServerState> {
    let login = Router::new()
        .route("/api/auth/login", post(handler::login))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            login_rate_limit,
        ));

    let me = Router::new()
        .route("/api/auth/me", get(handler::me))
        .route_layer(middleware::from_fn(require_auth));

    Router::new()
        .route("/api/auth/register", post(handler::register))
        .merge(login)
        .merge(me)
}
