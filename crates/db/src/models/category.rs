//! Category and subcategory models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ticketing_core::types::DbId;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `categories` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id_category: DbId,
    pub name: String,
}

/// A row from the `subcategories` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subcategory {
    pub id_subcategory: DbId,
    pub id_category: DbId,
    pub name: String,
}

/// Subcategory as embedded in a category listing.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubcategorySummary {
    pub id_subcategory: DbId,
    pub name: String,
}

/// A category together with its subcategories, both sorted by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryWithSubcategories {
    pub id_category: DbId,
    pub name: String,
    pub subcategories: Vec<SubcategorySummary>,
}

/// One row of the category/subcategory left join.
#[derive(Debug, Clone, FromRow)]
pub(crate) struct CategorySubcategoryRow {
    pub id_category: DbId,
    pub name: String,
    pub id_subcategory: Option<DbId>,
    pub subcategory_name: Option<String>,
}

/// Fold join rows, already ordered by category then subcategory, into
/// nested listings.
pub(crate) fn group_rows(rows: Vec<CategorySubcategoryRow>) -> Vec<CategoryWithSubcategories> {
    let mut out: Vec<CategoryWithSubcategories> = Vec::new();
    for row in rows {
        let start_new = out
            .last()
            .map_or(true, |current| current.id_category != row.id_category);
        if start_new {
            out.push(CategoryWithSubcategories {
                id_category: row.id_category,
                name: row.name,
                subcategories: Vec::new(),
            });
        }
        if let (Some(id_subcategory), Some(name), Some(current)) =
            (row.id_subcategory, row.subcategory_name, out.last_mut())
        {
            current
                .subcategories
                .push(SubcategorySummary { id_subcategory, name });
        }
    }
    out
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCategory {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateSubcategory {
    pub id_category: DbId,
    pub name: String,
}
