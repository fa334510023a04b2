//! Repository for the `uploads` table. Insert-only.

use sqlx::PgPool;
use ticketing_core::types::DbId;

use crate::models::upload::{CreateUpload, Upload};

const COLUMNS: &str = "id_upload, url, type, created_at";

pub struct UploadRepo;

impl UploadRepo {
    pub async fn create(pool: &PgPool, input: &CreateUpload) -> Result<Upload, sqlx::Error> {
        let query = format!("INSERT INTO uploads (url, type) VALUES ($1, $2) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Upload>(&query)
            .bind(&input.url)
            .bind(input.upload_type.as_str())
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Upload>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM uploads WHERE id_upload = $1");
        sqlx::query_as::<_, Upload>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
