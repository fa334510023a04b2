use axum::extract::State;
use axum::Json;
use ticketing_cache::{get_list, LIST_CITIES_KEY};
use ticketing_db::models::city::CitySummary;
use ticketing_db::repositories::CityRepo;

use crate::error::AppResult;
use crate::state::AppState;

/// GET /cities
///
/// All cities as `{idCity, name}` sorted by name, cached under `ListCities`.
pub async fn list_cities(State(state): State<AppState>) -> AppResult<Json<Vec<CitySummary>>> {
    let pool = &state.pool;
    let cities = get_list(state.cache.as_ref(), LIST_CITIES_KEY, || CityRepo::list(pool)).await?;
    Ok(Json(cities))
}
