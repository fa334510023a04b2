pub mod categories;
pub mod cities;
pub mod health;
pub mod tickets;
pub mod uploads;

use axum::Router;

use crate::state::AppState;

/// Build the public route tree.
///
/// Route hierarchy:
///
/// ```text
/// /categories                          list with subcategories (cached)
/// /categories/{id}/subcategories       subcategories of one category
///
/// /cities                              list (cached)
///
/// /uploads                             multipart upload (admin, organizer;
///                                      per-user rate limit)
///
/// /tickets/approve                     signed verification approval
///                                      (anonymous rate limit)
/// ```
///
/// Rate-limit middleware is bound to `state` here because it needs the
/// shared limiter before the router is given its state.
pub fn app_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .nest("/categories", categories::router())
        .nest("/cities", cities::router())
        .nest("/uploads", uploads::router(state))
        .nest("/tickets", tickets::router(state))
}
