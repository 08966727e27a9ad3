use bytes::Bytes;
use chrono::Utc;
use tracing::info;

use crate::api_client::{fetch, ApiRequest, Transport};
use crate::errors::AppError;
use crate::models::resources::{Curriculum, NewCurriculum};

const PDF_CONTENT_TYPE: &str = "application/pdf";
/// Sent by clients that cannot tell the file type.
const UNKNOWN_CONTENT_TYPE: &str = "application/octet-stream";
const PDF_MAGIC: &[u8] = b"%PDF-";
/// Upload limit enforced before touching the object store.
pub const MAX_CURRICULUM_BYTES: usize = 5 * 1024 * 1024;

/// GET /curricula?candidateId=…
pub async fn list_curricula(
    transport: &dyn Transport,
    candidate_id: &str,
) -> Result<Vec<Curriculum>, AppError> {
    fetch(
        transport,
        ApiRequest::get("/curricula").with_query("candidateId", candidate_id),
    )
    .await
}

/// Uploads a CV to the object store, then registers its public URL.
///
/// 1. POST the bytes to /storage/v1/object/{bucket}/{candidate}/{stamp}-{name}
/// 2. Derive the public URL from the transport
/// 3. POST /curricula with the URL
pub async fn upload_curriculum(
    transport: &dyn Transport,
    bucket: &str,
    candidate_id: &str,
    file_name: &str,
    content_type: &str,
    data: Bytes,
) -> Result<Curriculum, AppError> {
    validate_upload(file_name, content_type, &data)?;

    let object_path = format!(
        "{candidate_id}/{}-{}",
        Utc::now().timestamp_millis(),
        sanitize_file_name(file_name)
    );

    let stored = transport
        .send(ApiRequest::upload(
            format!("/storage/v1/object/{bucket}/{object_path}"),
            PDF_CONTENT_TYPE,
            data,
        ))
        .await?;
    if !stored.is_success() {
        return Err(AppError::Backend {
            status: stored.status,
            message: "The file could not be uploaded.".to_string(),
        });
    }

    let url = transport.public_object_url(bucket, &object_path);
    let curriculum: Curriculum = fetch(
        transport,
        ApiRequest::post(
            "/curricula",
            &NewCurriculum {
                candidate_id,
                file_name,
                url: &url,
            },
        )?,
    )
    .await?;

    info!("candidate {candidate_id} uploaded curriculum {}", curriculum.id);
    Ok(curriculum)
}

/// A CV must be named `*.pdf`, must not be declared as another type, and must
/// start with the PDF header.
fn validate_upload(file_name: &str, content_type: &str, data: &[u8]) -> Result<(), AppError> {
    let not_pdf = || AppError::Validation("Only PDF files are accepted.".to_string());
    let declared_ok = content_type == PDF_CONTENT_TYPE || content_type == UNKNOWN_CONTENT_TYPE;
    if !file_name.to_lowercase().ends_with(".pdf") || !declared_ok {
        return Err(not_pdf());
    }
    if data.is_empty() {
        return Err(AppError::Validation("The file is empty.".to_string()));
    }
    if data.len() > MAX_CURRICULUM_BYTES {
        return Err(AppError::Validation("The file exceeds 5 MB.".to_string()));
    }
    if !data.starts_with(PDF_MAGIC) {
        return Err(not_pdf());
    }
    Ok(())
}

/// Keeps object keys URL-safe: ASCII alphanumerics, dot, dash and underscore.
fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect()
}
