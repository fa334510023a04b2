//! Bearer-token authentication.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use ticketing_core::error::CoreError;
use ticketing_core::types::DbId;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Caller identity taken from a verified access token.
///
/// The first successful extraction caches the user in the request
/// extensions, so the rate limiter and the handler decode the token once.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: DbId,
    pub role: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<AuthUser>() {
            return Ok(user.clone());
        }

        let token = bearer_token(&parts.headers)?;
        let claims = validate_token(token, &state.config.jwt).map_err(|error| {
            tracing::debug!(%error, "Rejected access token");
            unauthorized("Nieprawidłowy lub wygasły token")
        })?;

        let user = AuthUser {
            user_id: claims.sub,
            role: claims.role,
        };
        parts.extensions.insert(user.clone());
        Ok(user)
    }
}

/// The token of an `Authorization: Bearer <token>` header.
fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| unauthorized("Wymagane uwierzytelnienie"))?;

    value
        .to_str()
        .ok()
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| unauthorized("Nieprawidłowy format nagłówka Authorization"))
}

fn unauthorized(message: &str) -> AppError {
    CoreError::Unauthorized(message.to_owned()).into()
}
