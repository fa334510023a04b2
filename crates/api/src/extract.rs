//! Custom request extractors.

use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;
use serde_json::Value;
use ticketing_core::text::trim_strings;
use validator::Validate;

use crate::error::{AppError, MSG_INVALID_BODY};

/// JSON body whose strings are trimmed at every depth before it is
/// deserialized into `T` and validated.
///
/// Every failure (wrong content type, malformed JSON, missing fields,
/// failed validation) is a 400 with the generic invalid-body message.
#[derive(Debug)]
pub struct TrimmedJson<T>(pub T);

impl<S, T> FromRequest<S> for TrimmedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(mut value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| {
                tracing::debug!(%rejection, "Rejected JSON body");
                invalid_body()
            })?;

        trim_strings(&mut value);

        let payload: T = serde_json::from_value(value).map_err(|error| {
            tracing::debug!(%error, "Body does not match the expected shape");
            invalid_body()
        })?;
        payload.validate().map_err(|errors| {
            tracing::debug!(%errors, "Body failed validation");
            invalid_body()
        })?;

        Ok(Self(payload))
    }
}

fn invalid_body() -> AppError {
    AppError::BadRequest(MSG_INVALID_BODY.into())
}
