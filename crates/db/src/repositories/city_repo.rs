//! Repository for the `cities` and `category_cities` tables.

use sqlx::PgPool;
use ticketing_core::types::DbId;

use crate::models::city::{City, CitySummary, CreateCity};

/// Column list for `cities` queries.
const COLUMNS: &str = "id_city, name, latitude, longitude";

pub struct CityRepo;

impl CityRepo {
    /// All cities as `{id_city, name}`, sorted by name ascending.
    pub async fn list(pool: &PgPool) -> Result<Vec<CitySummary>, sqlx::Error> {
        sqlx::query_as::<_, CitySummary>(
            "SELECT id_city, name FROM cities ORDER BY name ASC, id_city ASC",
        )
        .fetch_all(pool)
        .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<City>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cities WHERE id_city = $1");
        sqlx::query_as::<_, City>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(pool: &PgPool, input: &CreateCity) -> Result<City, sqlx::Error> {
        let query = format!(
            "INSERT INTO cities (name, latitude, longitude) VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, City>(&query)
            .bind(&input.name)
            .bind(input.coordinates.latitude)
            .bind(input.coordinates.longitude)
            .fetch_one(pool)
            .await
    }

    /// Cities in which `id_category` is offered, sorted by name.
    pub async fn find_cities_by_category(
        pool: &PgPool,
        id_category: DbId,
    ) -> Result<Vec<CitySummary>, sqlx::Error> {
        sqlx::query_as::<_, CitySummary>(
            "SELECT c.id_city, c.name FROM cities c \
             JOIN category_cities cc ON cc.id_city = c.id_city \
             WHERE cc.id_category = $1 \
             ORDER BY c.name ASC",
        )
        .bind(id_category)
        .fetch_all(pool)
        .await
    }

    /// Link a city to a category. Linking twice is a no-op.
    pub async fn attach_to_category(
        pool: &PgPool,
        id_category: DbId,
        id_city: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO category_cities (id_category, id_city) VALUES ($1, $2) \
             ON CONFLICT DO NOTHING",
        )
        .bind(id_category)
        .bind(id_city)
        .execute(pool)
        .await?;
        Ok(())
    }
}
