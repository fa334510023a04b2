//! City models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ticketing_core::types::DbId;

/// A row from the `cities` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct City {
    pub id_city: DbId,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// City as returned by the public listing (no coordinates).
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CitySummary {
    pub id_city: DbId,
    pub name: String,
}

/// WGS84 point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCity {
    pub name: String,
    pub coordinates: Coordinates,
}
