use std::sync::Arc;

use tokio::sync::Mutex;

use crate::alerts::{new_alert_list, AlertList};
use crate::api_client::Transport;
use crate::board::{new_board_list, BoardList};
use crate::community::ThreadMap;
use crate::config::Config;
use crate::errors::AppError;
use crate::job_lists::{new_job_list, JobList};
use crate::models::profile::{SessionUser, UserRole};
use crate::session::SessionStore;

/// Controller state for every list the shell renders.
///
/// Each list owns exactly one canonical collection; locks are never held
/// across a backend call.
pub struct Lists {
    pub alerts: Mutex<AlertList>,
    pub applied: Mutex<JobList>,
    pub favorites: Mutex<JobList>,
    pub board: Mutex<BoardList>,
    pub threads: Mutex<ThreadMap>,
}

impl Lists {
    pub fn new(page_size: usize) -> Self {
        Self {
            alerts: Mutex::new(new_alert_list(page_size)),
            applied: Mutex::new(new_job_list(page_size)),
            favorites: Mutex::new(new_job_list(page_size)),
            board: Mutex::new(new_board_list(page_size)),
            threads: Mutex::new(ThreadMap::new()),
        }
    }

    /// Drops every loaded list, as on sign-out.
    pub async fn reset(&self, page_size: usize) {
        *self.alerts.lock().await = new_alert_list(page_size);
        *self.applied.lock().await = new_job_list(page_size);
        *self.favorites.lock().await = new_job_list(page_size);
        *self.board.lock().await = new_board_list(page_size);
        self.threads.lock().await.clear();
    }
}

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub transport: Arc<dyn Transport>,
    pub session: Arc<SessionStore>,
    pub lists: Arc<Lists>,
    pub config: Config,
}

impl AppState {
    pub fn new(transport: Arc<dyn Transport>, config: Config) -> Self {
        Self {
            transport,
            session: Arc::new(SessionStore::new(config.session_cache_path.clone())),
            lists: Arc::new(Lists::new(config.page_size)),
            config,
        }
    }

    pub async fn current_user(&self) -> Result<SessionUser, AppError> {
        self.session.current_user(self.transport.as_ref()).await
    }

    /// The signed-in user, who must hold `role`.
    pub async fn require_role(&self, role: UserRole) -> Result<SessionUser, AppError> {
        let user = self.current_user().await?;
        if user.role != role {
            return Err(AppError::Validation(format!(
                "This section is only available to {role} accounts."
            )));
        }
        Ok(user)
    }
}
