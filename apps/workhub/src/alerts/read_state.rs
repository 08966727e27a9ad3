//! Read/unread toggling for alerts.
//!
//! Every mutation ends with a full re-fetch, success or not, so the rendered
//! list never diverges from the backend for more than one round trip. Local
//! records are never re-sorted by date here.

use futures::future::join_all;
use tokio::sync::Mutex;
use tracing::{error, warn};

use crate::alerts::{reload, AlertList};
use crate::api_client::Transport;
use crate::errors::AppError;
use crate::notice::Notice;
use crate::services;

/// Result of a read-state mutation, ready to be shown as a toast.
#[derive(Debug, Clone)]
pub struct ReadOutcome {
    pub notice: Notice,
    pub succeeded: bool,
    /// Ids whose PUT failed.
    pub failed: Vec<String>,
}

/// Persists `new_status` for one alert.
///
/// The alert is marked pending (its control renders disabled) while the call
/// is in flight. On success the local record is updated; either way the list
/// is then re-fetched.
pub async fn toggle_read_status(
    transport: &dyn Transport,
    list: &Mutex<AlertList>,
    candidate_id: &str,
    alert_id: &str,
    new_status: bool,
) -> ReadOutcome {
    {
        let mut state = list.lock().await;
        if state.find(alert_id).is_none() {
            let err = AppError::MissingData(format!("Alert {alert_id}"));
            warn!("toggle on unknown alert {alert_id}");
            return ReadOutcome {
                notice: Notice::from(&err),
                succeeded: false,
                failed: vec![alert_id.to_string()],
            };
        }
        state.mark_pending(alert_id);
    }

    let result = services::alerts::set_alert_read(transport, alert_id, new_status).await;

    let mut outcome = {
        let mut state = list.lock().await;
        state.clear_pending(alert_id);
        match &result {
            Ok(()) => {
                state.update(alert_id, |alert| alert.read = new_status);
                ReadOutcome {
                    notice: Notice::success(if new_status {
                        "Alert marked as read."
                    } else {
                        "Alert marked as unread."
                    }),
                    succeeded: true,
                    failed: Vec::new(),
                }
            }
            Err(e) => {
                error!("toggling alert {alert_id} failed: {e}");
                ReadOutcome {
                    notice: Notice::from(e),
                    succeeded: false,
                    failed: vec![alert_id.to_string()],
                }
            }
        }
    };

    resync(transport, list, candidate_id, &mut outcome).await;
    outcome
}

/// Marks every id as read with one PUT each, all in flight at once.
///
/// Succeeds only if every call does. Calls that succeeded stay applied even
/// when others fail; nothing is rolled back.
pub async fn mark_all_as_read(
    transport: &dyn Transport,
    list: &Mutex<AlertList>,
    candidate_id: &str,
    ids: &[String],
) -> ReadOutcome {
    if ids.is_empty() {
        return ReadOutcome {
            notice: Notice::info("There are no unread alerts."),
            succeeded: true,
            failed: Vec::new(),
        };
    }

    {
        let mut state = list.lock().await;
        for id in ids {
            state.mark_pending(id);
        }
    }

    let results = join_all(
        ids.iter()
            .map(|id| services::alerts::set_alert_read(transport, id, true)),
    )
    .await;

    let mut failed = Vec::new();
    {
        let mut state = list.lock().await;
        for (id, result) in ids.iter().zip(results) {
            state.clear_pending(id);
            match result {
                Ok(()) => {
                    state.update(id, |alert| alert.read = true);
                }
                Err(e) => {
                    error!("marking alert {id} as read failed: {e}");
                    failed.push(id.clone());
                }
            }
        }
    }

    let mut outcome = if failed.is_empty() {
        ReadOutcome {
            notice: Notice::success("All alerts marked as read."),
            succeeded: true,
            failed,
        }
    } else {
        ReadOutcome {
            notice: Notice::error(format!(
                "Could not mark {} of {} alerts as read.",
                failed.len(),
                ids.len()
            )),
            succeeded: false,
            failed,
        }
    };

    resync(transport, list, candidate_id, &mut outcome).await;
    outcome
}

/// Unconditional re-fetch after a mutation.
async fn resync(
    transport: &dyn Transport,
    list: &Mutex<AlertList>,
    candidate_id: &str,
    outcome: &mut ReadOutcome,
) {
    if let Err(e) = reload(transport, list, candidate_id).await {
        warn!("re-fetching alerts failed: {e}");
        if outcome.succeeded {
            outcome.notice = Notice::error("Saved, but the alert list could not be refreshed.");
        }
    }
}
