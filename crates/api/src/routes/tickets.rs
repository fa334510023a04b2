use axum::middleware::from_fn_with_state;
use axum::routing::post;
use axum::Router;

use crate::handlers::tickets;
use crate::middleware::rate_limit::limit_anonymous;
use crate::state::AppState;

/// Ticket routes mounted at `/tickets`.
///
/// ```text
/// POST /approve   -> approve_ticket (anonymous rate limit)
/// ```
pub fn router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/approve", post(tickets::approve_ticket))
        .route_layer(from_fn_with_state(state.clone(), limit_anonymous))
}
