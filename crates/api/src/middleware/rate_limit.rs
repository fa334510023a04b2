//! Rate-limiting middleware.
//!
//! Each request is counted against a fingerprint bucket in the shared
//! store; over the limit the request is answered with 429 and never
//! reaches the handler.

use std::net::SocketAddr;

use axum::extract::{ConnectInfo, FromRequestParts, MatchedPath, OriginalUri, Request, State};
use axum::http::header::USER_AGENT;
use axum::http::{Extensions, HeaderMap, HeaderName, HeaderValue, Uri};
use axum::middleware::Next;
use axum::response::Response;
use ticketing_cache::LimitDecision;
use ticketing_core::error::CoreError;
use ticketing_core::rate_limit::{
    anonymous_fingerprint, authenticated_fingerprint, RATE_LIMIT_MESSAGE,
};

use super::auth::AuthUser;
use crate::error::AppResult;
use crate::state::AppState;

const RATELIMIT_LIMIT: HeaderName = HeaderName::from_static("ratelimit-limit");
const RATELIMIT_REMAINING: HeaderName = HeaderName::from_static("ratelimit-remaining");
const RATELIMIT_POLICY: HeaderName = HeaderName::from_static("ratelimit-policy");

/// Limit unauthenticated requests by method, path, client IP and user agent.
pub async fn limit_anonymous(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> AppResult<Response> {
    let socket = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let ip = client_ip(request.headers(), socket, state.config.trust_proxy);
    let user_agent = request
        .headers()
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    let path = route_path(request.extensions(), request.uri());
    let fingerprint = anonymous_fingerprint(request.method().as_str(), &path, &ip, user_agent);
    let remaining = enforce(&state, &fingerprint).await?;
    Ok(with_limit_headers(&state, remaining, next.run(request).await))
}

/// Limit authenticated requests by method, path and user id.
///
/// Rejects with 401 before counting when the request carries no valid token.
pub async fn limit_authenticated(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> AppResult<Response> {
    let (mut parts, body) = request.into_parts();
    let user = AuthUser::from_request_parts(&mut parts, &state).await?;

    let path = route_path(&parts.extensions, &parts.uri);
    let fingerprint = authenticated_fingerprint(parts.method.as_str(), &path, user.user_id);
    let remaining = enforce(&state, &fingerprint).await?;
    let response = next.run(Request::from_parts(parts, body)).await;
    Ok(with_limit_headers(&state, remaining, response))
}

/// Count the request; the remaining quota on success.
async fn enforce(state: &AppState, fingerprint: &str) -> AppResult<u64> {
    match state.limiter.check(fingerprint).await? {
        LimitDecision::Allowed { remaining } => Ok(remaining),
        LimitDecision::Exceeded => {
            tracing::warn!(fingerprint, limit = state.limiter.limit(), "Rate limit exceeded");
            Err(CoreError::RateLimited(RATE_LIMIT_MESSAGE.into()).into())
        }
    }
}

/// Add `RateLimit-Limit`, `RateLimit-Remaining` and `RateLimit-Policy`.
fn with_limit_headers(state: &AppState, remaining: u64, mut response: Response) -> Response {
    let limiter = &state.limiter;
    let policy = format!("{};w={}", limiter.limit(), limiter.window().as_secs());
    let headers = response.headers_mut();
    headers.insert(RATELIMIT_LIMIT, HeaderValue::from(limiter.limit()));
    headers.insert(RATELIMIT_REMAINING, HeaderValue::from(remaining));
    if let Ok(policy) = HeaderValue::from_str(&policy) {
        headers.insert(RATELIMIT_POLICY, policy);
    }
    response
}

/// The matched route template, e.g. `/tickets/approve`.
///
/// Falls back to the request path before any `nest` prefix was stripped
/// when the layer runs outside a matched route.
fn route_path(extensions: &Extensions, uri: &Uri) -> String {
    if let Some(matched) = extensions.get::<MatchedPath>() {
        return matched.as_str().to_string();
    }
    extensions
        .get::<OriginalUri>()
        .map_or(uri.path(), |OriginalUri(original)| original.path())
        .to_string()
}

/// Resolve the client IP.
///
/// Behind a trusted proxy the left-most `X-Forwarded-For` entry wins;
/// otherwise the socket peer address is used.
fn client_ip(headers: &HeaderMap, socket: Option<SocketAddr>, trust_proxy: bool) -> String {
    let forwarded = trust_proxy
        .then(|| headers.get("x-forwarded-for"))
        .flatten()
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty());

    match (forwarded, socket) {
        (Some(ip), _) => ip.to_string(),
        (None, Some(addr)) => addr.ip().to_string(),
        (None, None) => "unknown".to_string(),
    }
}
