//! Repository for the `subcategories` table.

use sqlx::PgPool;
use ticketing_core::types::DbId;

use crate::models::category::{CreateSubcategory, Subcategory, SubcategorySummary};

const COLUMNS: &str = "id_subcategory, id_category, name";

pub struct SubcategoryRepo;

impl SubcategoryRepo {
    /// Subcategories belonging to `id_category`, sorted by name ascending.
    pub async fn find_subcategories_by_category(
        pool: &PgPool,
        id_category: DbId,
    ) -> Result<Vec<SubcategorySummary>, sqlx::Error> {
        sqlx::query_as::<_, SubcategorySummary>(
            "SELECT id_subcategory, name FROM subcategories \
             WHERE id_category = $1 \
             ORDER BY name ASC",
        )
        .bind(id_category)
        .fetch_all(pool)
        .await
    }

    pub async fn create(
        pool: &PgPool,
        input: &CreateSubcategory,
    ) -> Result<Subcategory, sqlx::Error> {
        let query = format!(
            "INSERT INTO subcategories (id_category, name) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Subcategory>(&query)
            .bind(input.id_category)
            .bind(&input.name)
            .fetch_one(pool)
            .await
    }
}
