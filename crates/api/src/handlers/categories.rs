//! Handlers for the category listings.

use axum::extract::{Path, State};
use axum::Json;
use ticketing_cache::{get_list, LIST_CATEGORIES_KEY};
use ticketing_core::error::CoreError;
use ticketing_core::types::DbId;
use ticketing_db::models::category::{CategoryWithSubcategories, SubcategorySummary};
use ticketing_db::repositories::{CategoryRepo, SubcategoryRepo};

use crate::error::AppResult;
use crate::state::AppState;

/// GET /categories
///
/// All categories with their subcategories, both sorted by name. Served
/// from the `ListCategories` cache entry when present.
pub async fn list_categories(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<CategoryWithSubcategories>>> {
    let pool = &state.pool;
    let categories = get_list(state.cache.as_ref(), LIST_CATEGORIES_KEY, || {
        CategoryRepo::list_with_subcategories(pool)
    })
    .await?;
    Ok(Json(categories))
}

/// GET /categories/{id}/subcategories
pub async fn list_subcategories(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<SubcategorySummary>>> {
    CategoryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Category",
            id,
        })?;

    let subcategories = SubcategoryRepo::find_subcategories_by_category(&state.pool, id).await?;
    Ok(Json(subcategories))
}
