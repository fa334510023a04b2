use axum::routing::get;
use axum::Router;

use crate::handlers::cities;
use crate::state::AppState;

/// City routes mounted at `/cities`.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(cities::list_cities))
}
