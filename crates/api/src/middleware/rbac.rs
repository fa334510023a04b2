//! Role gates layered on [`AuthUser`].

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use ticketing_core::error::CoreError;
use ticketing_core::roles::can_upload;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// An [`AuthUser`] allowed to upload files (`admin` or `organizer`).
///
/// Rejects with 401 without a valid token and 403 for any other role.
pub struct RequireUploader(pub AuthUser);

impl FromRequestParts<AppState> for RequireUploader {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if can_upload(&user.role) {
            Ok(Self(user))
        } else {
            tracing::debug!(user_id = user.user_id, role = %user.role, "Upload denied");
            Err(CoreError::Forbidden("Brak uprawnień do przesyłania plików".into()).into())
        }
    }
}
