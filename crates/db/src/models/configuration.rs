//! Database-stored application settings.

use serde::Serialize;
use sqlx::FromRow;
use ticketing_core::types::DbId;

/// A row from the `configurations` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    pub id_configuration: DbId,
    pub name: String,
    pub value: String,
}
