//! Authentication, authorization and rate-limiting middleware.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a JWT Bearer token.
//! - [`rbac::RequireUploader`] -- Requires the `admin` or `organizer` role.
//! - [`rate_limit`] -- Fixed-window limits keyed by request fingerprint.

pub mod auth;
pub mod rate_limit;
pub mod rbac;
