//! Well-known role name constants.
//!
//! These must match the `role` claim issued by the identity service.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_ORGANIZER: &str = "organizer";
pub const ROLE_USER: &str = "user";

/// Roles allowed to upload files and images.
pub const UPLOADER_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_ORGANIZER];

/// Whether `role` may use the upload endpoint.
pub fn can_upload(role: &str) -> bool {
    UPLOADER_ROLES.contains(&role)
}
