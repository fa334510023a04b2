//! HTTP-level tests for the cached reference lists.
//!
//! - `GET /categories` and `GET /cities` shape and ordering
//! - Cold requests populate `ListCategories` / `ListCities`
//! - Warm requests are served from the cache without touching the database
//! - `GET /categories/{id}/subcategories`

mod common;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;
use ticketing_cache::{CacheStore, LIST_CATEGORIES_KEY, LIST_CITIES_KEY};
use ticketing_db::models::category::{CreateCategory, CreateSubcategory};
use ticketing_db::models::city::{Coordinates, CreateCity};
use ticketing_db::repositories::{CategoryRepo, CityRepo, SubcategoryRepo};

use common::{body_bytes, body_json, build_test_app, get};

async fn seed_category(pool: &PgPool, name: &str, subcategories: &[&str]) -> i64 {
    let id_category = CategoryRepo::create(pool, &CreateCategory { name: name.into() })
        .await
        .unwrap()
        .id_category;
    for sub in subcategories {
        SubcategoryRepo::create(
            pool,
            &CreateSubcategory {
                id_category,
                name: (*sub).into(),
            },
        )
        .await
        .unwrap();
    }
    id_category
}

async fn seed_city(pool: &PgPool, name: &str) -> i64 {
    CityRepo::create(
        pool,
        &CreateCity {
            name: name.into(),
            coordinates: Coordinates {
                latitude: 52.0,
                longitude: 19.0,
            },
        },
    )
    .await
    .unwrap()
    .id_city
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn categories_are_sorted_with_nested_subcategories(pool: PgPool) {
    seed_category(&pool, "Sport", &["Siatkówka", "Piłka nożna"]).await;
    seed_category(&pool, "Koncerty", &["Rock", "Jazz"]).await;
    let test = build_test_app(pool);

    let response = get(test.app(), "/categories").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let categories = json.as_array().unwrap();
    assert_eq!(categories.len(), 2);
    assert_eq!(categories[0]["name"], "Koncerty");
    assert!(categories[0]["idCategory"].is_i64());
    assert_eq!(categories[0]["subcategories"][0]["name"], "Jazz");
    assert_eq!(categories[0]["subcategories"][1]["name"], "Rock");
    assert!(categories[0]["subcategories"][0]["idSubcategory"].is_i64());
    assert_eq!(categories[1]["name"], "Sport");
    assert_eq!(categories[1]["subcategories"][0]["name"], "Piłka nożna");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn empty_categories_table_returns_empty_array(pool: PgPool) {
    let test = build_test_app(pool);

    let response = get(test.app(), "/categories").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn cold_request_populates_category_cache(pool: PgPool) {
    seed_category(&pool, "Teatr", &[]).await;
    let test = build_test_app(pool);

    assert_eq!(test.cache.get(LIST_CATEGORIES_KEY).await.unwrap(), None);

    let response = get(test.app(), "/categories").await;
    let body = body_json(response).await;

    let cached = test.cache.get(LIST_CATEGORIES_KEY).await.unwrap().unwrap();
    let cached: serde_json::Value = serde_json::from_str(&cached).unwrap();
    assert_eq!(cached, body);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn warm_category_cache_ignores_new_rows(pool: PgPool) {
    seed_category(&pool, "Teatr", &["Opera"]).await;
    let test = build_test_app(pool.clone());

    let first = body_bytes(get(test.app(), "/categories").await).await;
    seed_category(&pool, "Kabaret", &[]).await;
    let second = body_bytes(get(test.app(), "/categories").await).await;

    assert_eq!(first, second);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn stored_category_list_is_served_as_is(pool: PgPool) {
    let test = build_test_app(pool);
    let stored = concat!(
        r#"[{"idCategory":7,"name":"Festiwale","#,
        r#""subcategories":[{"idSubcategory":3,"name":"Letnie"}]}]"#,
    );
    test.cache.set(LIST_CATEGORIES_KEY, stored).await.unwrap();

    let response = get(test.app(), "/categories").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, stored.as_bytes());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn subcategories_of_category_are_sorted(pool: PgPool) {
    let id = seed_category(&pool, "Sport", &["Tenis", "Boks"]).await;
    let test = build_test_app(pool);

    let response = get(test.app(), &format!("/categories/{id}/subcategories")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json[0]["name"], "Boks");
    assert_eq!(json[1]["name"], "Tenis");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn subcategories_of_unknown_category_is_404(pool: PgPool) {
    let test = build_test_app(pool);

    let response = get(test.app(), "/categories/999999/subcategories").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_json(response).await["message"].is_string());
}

// ---------------------------------------------------------------------------
// Cities
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn cities_are_sorted_by_name(pool: PgPool) {
    seed_city(&pool, "Wrocław").await;
    seed_city(&pool, "Gdańsk").await;
    seed_city(&pool, "Kraków").await;
    let test = build_test_app(pool);

    let response = get(test.app(), "/cities").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let names: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Gdańsk", "Kraków", "Wrocław"]);
    assert!(json[0]["idCity"].is_i64());
    assert!(json[0].get("latitude").is_none());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn stored_city_list_is_served_without_querying(pool: PgPool) {
    seed_city(&pool, "Poznań").await;
    let test = build_test_app(pool);
    let stored = r#"[{"idCity":1,"name":"Łódź"}]"#;
    test.cache.set(LIST_CITIES_KEY, stored).await.unwrap();

    let response = get(test.app(), "/cities").await;
    assert_eq!(body_bytes(response).await, stored.as_bytes());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn stored_null_city_list_is_recomputed(pool: PgPool) {
    seed_city(&pool, "Poznań").await;
    let test = build_test_app(pool);
    test.cache.set(LIST_CITIES_KEY, "null").await.unwrap();

    let json = body_json(get(test.app(), "/cities").await).await;
    assert_eq!(json[0]["name"], "Poznań");

    let cached = test.cache.get(LIST_CITIES_KEY).await.unwrap().unwrap();
    assert_ne!(cached, "null");
}
