//! Upload validation: logical upload types, MIME allow-lists and content
//! sniffing.
//!
//! The declared type sent by the client only selects an allow-list. The
//! real MIME type is always derived from the file bytes; client-supplied
//! `Content-Type` headers are never consulted.

use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

use crate::error::CoreError;
use crate::text::encode_uri_component;

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

/// Returned when the declared `type` field is not a known logical type.
pub const MSG_INVALID_TYPE: &str = "Nieprawidłowy typ pliku";

/// Returned when the multipart body carried no file payload.
pub const MSG_MISSING_FILE: &str = "Brak pliku";

/// Returned when the sniffed MIME type is unknown or not allow-listed.
pub const MSG_FORBIDDEN_FORMAT: &str = "Niedozwolony format pliku";

// ---------------------------------------------------------------------------
// Logical upload type
// ---------------------------------------------------------------------------

/// Application-level category of an upload, independent of its MIME type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UploadType {
    File,
    Image,
}

/// MIME types accepted for [`UploadType::File`].
const FILE_MIME_TYPES: &[&str] = &["application/pdf"];

/// MIME types accepted for [`UploadType::Image`].
const IMAGE_MIME_TYPES: &[&str] = &[
    "image/avif",
    "image/gif",
    "image/jpeg",
    "image/png",
    "image/webp",
];

impl UploadType {
    /// Wire and database representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::File => "FILE",
            Self::Image => "IMAGE",
        }
    }

    /// Real MIME types a file of this logical type may have.
    pub fn allowed_mime_types(self) -> &'static [&'static str] {
        match self {
            Self::File => FILE_MIME_TYPES,
            Self::Image => IMAGE_MIME_TYPES,
        }
    }

    pub fn allows(self, mime: &str) -> bool {
        self.allowed_mime_types().contains(&mime)
    }
}

impl fmt::Display for UploadType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UploadType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FILE" => Ok(Self::File),
            "IMAGE" => Ok(Self::Image),
            _ => Err(CoreError::Validation(MSG_INVALID_TYPE.into())),
        }
    }
}

// ---------------------------------------------------------------------------
// Sniffing and validation
// ---------------------------------------------------------------------------

/// Detect the MIME type from the leading bytes of a file.
///
/// Returns `None` when no known signature matches.
pub fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
    infer::get(bytes).map(|kind| kind.mime_type())
}

/// An upload that passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedUpload {
    pub upload_type: UploadType,
    /// MIME type sniffed from the content.
    pub mime_type: &'static str,
}

/// Validate a declared upload type against the actual file content.
///
/// Checks run in a fixed order: the declared type first (no bytes are
/// inspected for an unknown type), then presence of the payload, then the
/// sniffed MIME type against the allow-list.
pub fn validate_upload(
    declared: &str,
    file: Option<&[u8]>,
) -> Result<ValidatedUpload, CoreError> {
    let upload_type: UploadType = declared.parse()?;

    let bytes = file.ok_or_else(|| CoreError::Validation(MSG_MISSING_FILE.into()))?;

    let mime_type = sniff_mime(bytes)
        .filter(|mime| upload_type.allows(mime))
        .ok_or_else(|| CoreError::Validation(MSG_FORBIDDEN_FORMAT.into()))?;

    Ok(ValidatedUpload {
        upload_type,
        mime_type,
    })
}

/// Build the object-storage name for an uploaded file:
/// `{uuid}/{percent-encoded original name}`.
pub fn object_name(id: Uuid, original_file_name: &str) -> String {
    format!("{id}/{}", encode_uri_component(original_file_name))
}

/// [`object_name`] with a fresh random UUID v4.
pub fn new_object_name(original_file_name: &str) -> String {
    object_name(Uuid::new_v4(), original_file_name)
}
