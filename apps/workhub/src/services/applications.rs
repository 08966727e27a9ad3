use serde::Serialize;
use tracing::info;

use crate::api_client::{execute, fetch, ApiRequest, Transport};
use crate::errors::AppError;
use crate::models::job::AppliedJob;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NewApplication<'a> {
    job_id: &'a str,
    candidate_id: &'a str,
}

/// GET /applications?candidateId=…
pub async fn list_applied_jobs(
    transport: &dyn Transport,
    candidate_id: &str,
) -> Result<Vec<AppliedJob>, AppError> {
    fetch(
        transport,
        ApiRequest::get("/applications").with_query("candidateId", candidate_id),
    )
    .await
}

/// POST /applications
pub async fn apply_to_job(
    transport: &dyn Transport,
    job_id: &str,
    candidate_id: &str,
) -> Result<(), AppError> {
    execute(
        transport,
        ApiRequest::post(
            "/applications",
            &NewApplication {
                job_id,
                candidate_id,
            },
        )?,
    )
    .await?;
    info!("candidate {candidate_id} applied to job {job_id}");
    Ok(())
}
