// Applied jobs and favorites: two read-only snapshot lists sharing one controller.
// Newest first by default; favorites can be dropped locally.

pub mod handlers;
pub mod view;

use tokio::sync::Mutex;

use crate::api_client::Transport;
use crate::errors::AppError;
use crate::listing::filters::{ListCriteria, SortOrder};
use crate::listing::state::ListState;
use crate::models::job::JobSnapshot;
use crate::services;
use crate::state::Lists;

pub type JobList = ListState<JobSnapshot>;

pub fn new_job_list(page_size: usize) -> JobList {
    ListState::new(ListCriteria::sorted_by(SortOrder::DateDesc), page_size)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobListKind {
    Applied,
    Favorites,
}

impl JobListKind {
    pub fn key(&self) -> &'static str {
        match self {
            JobListKind::Applied => "applications",
            JobListKind::Favorites => "favorites",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            JobListKind::Applied => "My applications",
            JobListKind::Favorites => "Saved jobs",
        }
    }

    pub fn list<'a>(&self, lists: &'a Lists) -> &'a Mutex<JobList> {
        match self {
            JobListKind::Applied => &lists.applied,
            JobListKind::Favorites => &lists.favorites,
        }
    }
}

/// Replaces the canonical list with the backend's current one.
pub async fn reload(
    transport: &dyn Transport,
    kind: JobListKind,
    list: &Mutex<JobList>,
    candidate_id: &str,
) -> Result<(), AppError> {
    let jobs = match kind {
        JobListKind::Applied => services::applications::list_applied_jobs(transport, candidate_id).await?,
        JobListKind::Favorites => services::favorites::list_favorites(transport, candidate_id).await?,
    };
    list.lock().await.replace_all(jobs);
    Ok(())
}

/// Fetches the list only if it has never been loaded.
pub async fn ensure_loaded(
    transport: &dyn Transport,
    kind: JobListKind,
    list: &Mutex<JobList>,
    candidate_id: &str,
) -> Result<(), AppError> {
    if list.lock().await.is_loaded() {
        return Ok(());
    }
    reload(transport, kind, list, candidate_id).await
}
