// Job alerts: list controller, read-state workflow and rendering.
// The backend orders alerts unread-first; the default sort keeps that order.

pub mod handlers;
pub mod read_state;
pub mod view;

use tokio::sync::Mutex;

use crate::api_client::Transport;
use crate::errors::AppError;
use crate::listing::filters::{ListCriteria, SortOrder};
use crate::listing::state::ListState;
use crate::models::alert::JobAlert;
use crate::services;

pub type AlertList = ListState<JobAlert>;

pub fn new_alert_list(page_size: usize) -> AlertList {
    ListState::new(ListCriteria::sorted_by(SortOrder::Server), page_size)
}

/// Replaces the canonical alert list with the backend's current one.
///
/// The list lock is only taken after the fetch resolves.
pub async fn reload(
    transport: &dyn Transport,
    list: &Mutex<AlertList>,
    candidate_id: &str,
) -> Result<(), AppError> {
    let alerts = services::alerts::list_alerts(transport, candidate_id).await?;
    list.lock().await.replace_all(alerts);
    Ok(())
}

/// Fetches the list only if it has never been loaded, e.g. when an action
/// arrives before any page load.
pub async fn ensure_loaded(
    transport: &dyn Transport,
    list: &Mutex<AlertList>,
    candidate_id: &str,
) -> Result<(), AppError> {
    if list.lock().await.is_loaded() {
        return Ok(());
    }
    reload(transport, list, candidate_id).await
}
