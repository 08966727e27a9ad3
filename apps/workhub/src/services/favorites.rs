use serde::Serialize;
use tracing::info;

use crate::api_client::{execute, fetch, ApiRequest, Transport};
use crate::errors::AppError;
use crate::models::job::FavoriteJob;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NewFavorite<'a> {
    job_id: &'a str,
    candidate_id: &'a str,
}

/// GET /favorites?candidateId=…
pub async fn list_favorites(
    transport: &dyn Transport,
    candidate_id: &str,
) -> Result<Vec<FavoriteJob>, AppError> {
    fetch(
        transport,
        ApiRequest::get("/favorites").with_query("candidateId", candidate_id),
    )
    .await
}

/// POST /favorites
///
/// No removal call exists: removing a favorite only drops it
/// from the in-memory list (see `job_lists`).
pub async fn add_favorite(
    transport: &dyn Transport,
    job_id: &str,
    candidate_id: &str,
) -> Result<(), AppError> {
    execute(
        transport,
        ApiRequest::post(
            "/favorites",
            &NewFavorite {
                job_id,
                candidate_id,
            },
        )?,
    )
    .await?;
    info!("candidate {candidate_id} saved job {job_id}");
    Ok(())
}
