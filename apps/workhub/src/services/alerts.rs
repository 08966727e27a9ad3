use serde::Serialize;
use tracing::{debug, info};

use crate::api_client::{execute, fetch, ApiRequest, Transport};
use crate::errors::AppError;
use crate::models::alert::JobAlert;

#[derive(Serialize)]
struct ReadToggle {
    read: bool,
}

/// GET /alerts?candidateId=…
///
/// The backend returns unread alerts first; callers must keep that order.
pub async fn list_alerts(
    transport: &dyn Transport,
    candidate_id: &str,
) -> Result<Vec<JobAlert>, AppError> {
    let alerts: Vec<JobAlert> = fetch(
        transport,
        ApiRequest::get("/alerts").with_query("candidateId", candidate_id),
    )
    .await?;
    debug!("fetched {} alerts for candidate {candidate_id}", alerts.len());
    Ok(alerts)
}

/// PUT /alerts/:id/read
pub async fn set_alert_read(
    transport: &dyn Transport,
    alert_id: &str,
    read: bool,
) -> Result<(), AppError> {
    execute(
        transport,
        ApiRequest::put(format!("/alerts/{alert_id}/read"), &ReadToggle { read })?,
    )
    .await?;
    info!("alert {alert_id} marked read={read}");
    Ok(())
}
