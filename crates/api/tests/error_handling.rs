//! Mapping of `AppError` variants to HTTP responses.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use ticketing_api::error::AppError;
use ticketing_api::storage::StorageError;
use ticketing_api::tickets::ApprovalError;
use ticketing_cache::CacheError;
use ticketing_core::error::CoreError;

async fn render(error: AppError) -> (StatusCode, serde_json::Value) {
    let response = error.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn validation_error_is_400_with_message() {
    let (status, body) = render(CoreError::Validation("Brak pliku".into()).into()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, serde_json::json!({ "message": "Brak pliku" }));
}

#[tokio::test]
async fn not_found_is_404() {
    let (status, body) = render(
        CoreError::NotFound {
            entity: "Category",
            id: 3,
        }
        .into(),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Category with id 3 not found");
}

#[tokio::test]
async fn auth_errors_map_to_401_and_403() {
    let (status, _) = render(CoreError::Unauthorized("x".into()).into()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = render(CoreError::Forbidden("x".into()).into()).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn rate_limited_is_429() {
    let (status, body) = render(CoreError::RateLimited("slow down".into()).into()).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["message"], "slow down");
}

#[tokio::test]
async fn approval_rejection_is_400_invalid_body() {
    let (status, body) = render(ApprovalError::Rejected.into()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Nieprawidłowa treść żądania");
}

#[tokio::test]
async fn infrastructure_errors_are_sanitized_500() {
    let errors: Vec<AppError> = vec![
        ApprovalError::Upstream("gateway exploded at 10.0.0.3".into()).into(),
        StorageError::Backend("bucket secret-bucket missing".into()).into(),
        CacheError::NotACounter {
            key: "ListCities".into(),
        }
        .into(),
        sqlx::Error::PoolTimedOut.into(),
        AppError::InternalError("boom".into()),
        CoreError::Internal("boom".into()).into(),
    ];

    for error in errors {
        let (status, body) = render(error).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Wystąpił błąd wewnętrzny serwera");
    }
}

#[tokio::test]
async fn missing_row_is_404() {
    let (status, _) = render(sqlx::Error::RowNotFound.into()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn payload_too_large_is_413() {
    let error = AppError::PayloadTooLarge("Przesłany plik jest zbyt duży".into());
    let (status, body) = render(error).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["message"], "Przesłany plik jest zbyt duży");
}
