//! Repository for the `configurations` key/value table.

use sqlx::PgPool;

use crate::models::configuration::Configuration;

const COLUMNS: &str = "id_configuration, name, value";

pub struct ConfigurationRepo;

impl ConfigurationRepo {
    pub async fn find_by_name(
        pool: &PgPool,
        name: &str,
    ) -> Result<Option<Configuration>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM configurations WHERE name = $1");
        sqlx::query_as::<_, Configuration>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Insert a setting or overwrite the value of an existing one.
    pub async fn upsert(
        pool: &PgPool,
        name: &str,
        value: &str,
    ) -> Result<Configuration, sqlx::Error> {
        let query = format!(
            "INSERT INTO configurations (name, value) VALUES ($1, $2) \
             ON CONFLICT (name) DO UPDATE SET value = EXCLUDED.value \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Configuration>(&query)
            .bind(name)
            .bind(value)
            .fetch_one(pool)
            .await
    }
}
