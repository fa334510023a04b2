//! Rate-limit fingerprints and window constants.
//!
//! A fingerprint identifies one counter bucket. Anonymous requests are
//! bucketed by route, client IP and user agent; authenticated requests by
//! route and user id. Both are hashed so counter keys have a fixed length
//! and carry no raw client data.

use std::time::Duration;

use sha2::{Digest, Sha256};

use crate::types::DbId;

/// Length of one counting window.
pub const WINDOW: Duration = Duration::from_secs(60);

/// Default number of requests allowed per fingerprint and window.
pub const DEFAULT_LIMIT_PER_WINDOW: u64 = 100;

/// Limit used in test mode, high enough to never trigger.
pub const TEST_LIMIT_PER_WINDOW: u64 = 1_000_000;

/// Prefix of counter keys in the shared store.
pub const KEY_PREFIX: &str = "rl:";

/// Body message returned with `429 Too Many Requests`.
pub const RATE_LIMIT_MESSAGE: &str = "Zbyt wiele żądań, spróbuj ponownie później";

/// Fingerprint of an unauthenticated request.
pub fn anonymous_fingerprint(method: &str, path: &str, ip: &str, user_agent: &str) -> String {
    digest(&format!("{method}::{path}::{ip}::{user_agent}"))
}

/// Fingerprint of an authenticated request.
pub fn authenticated_fingerprint(method: &str, path: &str, user_id: DbId) -> String {
    digest(&format!("{method}::{path}::{user_id}"))
}

fn digest(input: &str) -> String {
    format!("{:x}", Sha256::digest(input.as_bytes()))
}

/// Store key holding the counter for `fingerprint`.
pub fn counter_key(fingerprint: &str) -> String {
    format!("{KEY_PREFIX}{fingerprint}")
}
