//! Repository for the `categories` table.

use sqlx::PgPool;
use ticketing_core::types::DbId;

use crate::models::category::{
    group_rows, Category, CategorySubcategoryRow, CategoryWithSubcategories, CreateCategory,
};

/// Column list for `categories` queries.
const COLUMNS: &str = "id_category, name";

/// Provides read and create operations for categories.
pub struct CategoryRepo;

impl CategoryRepo {
    /// List every category with its subcategories in a single query.
    ///
    /// Categories are sorted by name ascending, and so are the
    /// subcategories within each category.
    pub async fn list_with_subcategories(
        pool: &PgPool,
    ) -> Result<Vec<CategoryWithSubcategories>, sqlx::Error> {
        let rows = sqlx::query_as::<_, CategorySubcategoryRow>(
            "SELECT c.id_category, c.name, \
                    s.id_subcategory, s.name AS subcategory_name \
             FROM categories c \
             LEFT JOIN subcategories s ON s.id_category = c.id_category \
             ORDER BY c.name ASC, c.id_category ASC, s.name ASC",
        )
        .fetch_all(pool)
        .await?;
        Ok(group_rows(rows))
    }

    /// Find a category by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE id_category = $1");
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(pool: &PgPool, input: &CreateCategory) -> Result<Category, sqlx::Error> {
        let query = format!("INSERT INTO categories (name) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Category>(&query)
            .bind(&input.name)
            .fetch_one(pool)
            .await
    }
}
