//! Upload model.

use serde::Serialize;
use sqlx::FromRow;
use ticketing_core::types::{DbId, Timestamp};
use ticketing_core::upload::UploadType;

/// A row from the `uploads` table. Uploads are never modified after insert.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Upload {
    pub id_upload: DbId,
    pub url: String,
    /// `FILE` or `IMAGE`.
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub upload_type: String,
    #[serde(skip_serializing)]
    pub created_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct CreateUpload {
    pub url: String,
    pub upload_type: UploadType,
}
