use askama::Template;
use axum::{
    extract::{Query, State},
    response::Html,
    Extension, Form,
};
use tracing::info;

use crate::errors::AppError;
use crate::job_lists::view::JobListView;
use crate::job_lists::{ensure_loaded, reload, JobList, JobListKind};
use crate::listing::actions::{ActionForm, UiAction};
use crate::listing::view::CriteriaForm;
use crate::models::profile::UserRole;
use crate::notice::Notice;
use crate::state::AppState;

fn render(kind: JobListKind, list: &JobList, notice: Option<Notice>) -> Result<Html<String>, AppError> {
    Ok(Html(JobListView::build(kind, list, notice).render()?))
}

/// GET /applications | /favorites
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    Extension(kind): Extension<JobListKind>,
    Query(form): Query<CriteriaForm>,
) -> Result<Html<String>, AppError> {
    let user = state.require_role(UserRole::Candidate).await?;
    let list = kind.list(&state.lists);
    reload(state.transport.as_ref(), kind, list, &user.id).await?;

    let mut list = list.lock().await;
    form.apply_to(&mut list);
    render(kind, &list, None)
}

/// POST /applications/filters | /favorites/filters
pub async fn handle_filter_jobs(
    State(state): State<AppState>,
    Extension(kind): Extension<JobListKind>,
    Form(form): Form<CriteriaForm>,
) -> Result<Html<String>, AppError> {
    let user = state.require_role(UserRole::Candidate).await?;
    let list = kind.list(&state.lists);
    ensure_loaded(state.transport.as_ref(), kind, list, &user.id).await?;

    let mut list = list.lock().await;
    form.apply_to(&mut list);
    render(kind, &list, None)
}

/// POST /applications/actions | /favorites/actions
pub async fn handle_job_action(
    State(state): State<AppState>,
    Extension(kind): Extension<JobListKind>,
    Form(form): Form<ActionForm>,
) -> Result<Html<String>, AppError> {
    let action = UiAction::try_from(form)?;
    let user = state.require_role(UserRole::Candidate).await?;
    let list = kind.list(&state.lists);
    ensure_loaded(state.transport.as_ref(), kind, list, &user.id).await?;
    let mut list = list.lock().await;

    let notice = match action {
        UiAction::ClearFilters => {
            list.clear_filters();
            None
        }
        UiAction::Paginate { page } => {
            list.set_page(page);
            None
        }
        // local only: the backend offers no way to delete a favorite
        UiAction::RemoveFavorite { id } if kind == JobListKind::Favorites => {
            match list.remove_local(&id) {
                Some(job) => {
                    info!("favorite {} dropped from the local list", job.job_id);
                    Some(Notice::success("Removed from favorites."))
                }
                None => Some(Notice::from(&AppError::MissingData(format!("Favorite {id}")))),
            }
        }
        other => return Err(other.unsupported(kind.key())),
    };

    render(kind, &list, notice)
}
