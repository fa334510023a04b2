use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn_with_state;
use axum::routing::post;
use axum::Router;

use crate::handlers::uploads;
use crate::middleware::rate_limit::limit_authenticated;
use crate::state::AppState;

/// Upload routes mounted at `/uploads`.
///
/// ```text
/// POST /     -> create_upload (authenticated rate limit, body size cap)
/// ```
pub fn router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/", post(uploads::create_upload))
        .route_layer(from_fn_with_state(state.clone(), limit_authenticated))
        .layer(DefaultBodyLimit::max(state.config.max_upload_bytes))
}
