//! Handler for file and image uploads.
//!
//! The declared logical type only selects an allow-list; the accepted MIME
//! type is sniffed from the bytes. Accepted files are written to object
//! storage under `{uuid}/{encoded name}` and recorded in `uploads`.

use axum::body::Bytes;
use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use ticketing_core::upload::{new_object_name, validate_upload};
use ticketing_db::models::upload::{CreateUpload, Upload};
use ticketing_db::repositories::UploadRepo;

use crate::error::{AppError, AppResult, MSG_INVALID_FORM, MSG_PAYLOAD_TOO_LARGE};
use crate::middleware::rbac::RequireUploader;
use crate::state::AppState;

/// Multipart field carrying the logical type.
const FIELD_TYPE: &str = "type";

/// Multipart field carrying the file.
const FIELD_FILE: &str = "file";

/// Fallback name for file parts sent without a filename.
const DEFAULT_FILE_NAME: &str = "file";

/// The first file part of the form.
struct FilePart {
    name: String,
    bytes: Bytes,
}

/// POST /uploads
///
/// Multipart form with `type` (`FILE` or `IMAGE`) and `file`. When several
/// `file` parts are sent, only the first one is considered.
pub async fn create_upload(
    State(state): State<AppState>,
    RequireUploader(user): RequireUploader,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<Upload>)> {
    let mut declared_type: Option<String> = None;
    let mut file: Option<FilePart> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(form_error)?
    {
        let field_name = field.name().map(str::to_owned);
        match field_name.as_deref() {
            Some(FIELD_TYPE) if declared_type.is_none() => {
                let text = field
                    .text()
                    .await
                    .map_err(form_error)?;
                declared_type = Some(text);
            }
            Some(FIELD_FILE) if file.is_none() => {
                let name = field.file_name().unwrap_or(DEFAULT_FILE_NAME).to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(form_error)?;
                file = Some(FilePart { name, bytes });
            }
            _ => {}
        }
    }

    let validated = validate_upload(
        declared_type.as_deref().unwrap_or_default(),
        file.as_ref().map(|f| f.bytes.as_ref()),
    )?;
    let FilePart { name, bytes } =
        file.ok_or_else(|| AppError::InternalError("validated upload without a file".into()))?;

    let object_name = new_object_name(&name);
    let size = bytes.len();
    let url = state
        .storage
        .put(&object_name, bytes, validated.mime_type)
        .await?;

    let upload = UploadRepo::create(
        &state.pool,
        &CreateUpload {
            url,
            upload_type: validated.upload_type,
        },
    )
    .await?;

    tracing::info!(
        id_upload = upload.id_upload,
        user_id = user.user_id,
        upload_type = %validated.upload_type,
        mime_type = validated.mime_type,
        size,
        "Upload stored"
    );

    Ok((StatusCode::CREATED, Json(upload)))
}

/// Map a multipart read failure, keeping the size-limit status.
fn form_error(error: MultipartError) -> AppError {
    tracing::debug!(%error, "Unreadable multipart form");
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(MSG_PAYLOAD_TOO_LARGE.into())
    } else {
        AppError::BadRequest(MSG_INVALID_FORM.into())
    }
}
