use askama::Template;
use axum::{
    extract::{Path, Query, State},
    response::Html,
    Form,
};
use tracing::debug;

use crate::board::view::{BoardView, JobDetailView};
use crate::board::{ensure_loaded, reload, BoardList, PostingForm};
use crate::errors::AppError;
use crate::listing::actions::{ActionForm, UiAction};
use crate::listing::view::CriteriaForm;
use crate::models::job::NewJobPosting;
use crate::models::profile::UserRole;
use crate::notice::Notice;
use crate::services;
use crate::state::AppState;

/// The board is readable without a session; the role only decides which controls show.
async fn viewer_role(state: &AppState) -> Option<UserRole> {
    match state.current_user().await {
        Ok(user) => Some(user.role),
        Err(e) => {
            debug!("browsing the board anonymously: {e}");
            None
        }
    }
}

fn render_board(
    list: &BoardList,
    notice: Option<Notice>,
    role: Option<UserRole>,
) -> Result<Html<String>, AppError> {
    let can_publish = role == Some(UserRole::Enterprise);
    Ok(Html(BoardView::build(list, notice, can_publish).render()?))
}

/// GET /jobs
pub async fn handle_list_board(
    State(state): State<AppState>,
    Query(form): Query<CriteriaForm>,
) -> Result<Html<String>, AppError> {
    reload(state.transport.as_ref(), &state.lists.board).await?;
    let role = viewer_role(&state).await;

    let mut list = state.lists.board.lock().await;
    form.apply_to(&mut list);
    render_board(&list, None, role)
}

/// POST /jobs/filters
pub async fn handle_filter_board(
    State(state): State<AppState>,
    Form(form): Form<CriteriaForm>,
) -> Result<Html<String>, AppError> {
    ensure_loaded(state.transport.as_ref(), &state.lists.board).await?;
    let role = viewer_role(&state).await;
    let mut list = state.lists.board.lock().await;
    form.apply_to(&mut list);
    render_board(&list, None, role)
}

/// POST /jobs/actions
pub async fn handle_board_action(
    State(state): State<AppState>,
    Form(form): Form<ActionForm>,
) -> Result<Html<String>, AppError> {
    let action = UiAction::try_from(form)?;
    ensure_loaded(state.transport.as_ref(), &state.lists.board).await?;
    let role = viewer_role(&state).await;
    let mut list = state.lists.board.lock().await;

    match action {
        UiAction::ClearFilters => list.clear_filters(),
        UiAction::Paginate { page } => list.set_page(page),
        other => return Err(other.unsupported("jobs")),
    }
    render_board(&list, None, role)
}

/// POST /jobs
/// Enterprise only. On success the board is re-fetched so the new offer shows.
pub async fn handle_publish_job(
    State(state): State<AppState>,
    Form(form): Form<PostingForm>,
) -> Result<Html<String>, AppError> {
    let user = state.require_role(UserRole::Enterprise).await?;
    let transport = state.transport.as_ref();

    let published = match NewJobPosting::try_from(form) {
        Ok(posting) => services::jobs::create_job(transport, &user.id, &posting).await,
        Err(e) => Err(e),
    };

    let notice = match published {
        Ok(job) => {
            if let Err(e) = reload(transport, &state.lists.board).await {
                debug!("board refresh after publishing {} failed: {e}", job.id);
            }
            Notice::success(format!("\"{}\" is now published.", job.title))
        }
        Err(e) => Notice::from(&e),
    };

    let list = state.lists.board.lock().await;
    render_board(&list, Some(notice), Some(user.role))
}

async fn render_detail(
    state: &AppState,
    job_id: &str,
    notice: Option<Notice>,
) -> Result<Html<String>, AppError> {
    let job = services::jobs::get_job(state.transport.as_ref(), job_id).await?;
    let can_apply = viewer_role(state).await == Some(UserRole::Candidate);
    Ok(Html(JobDetailView::new(&job, notice, can_apply).render()?))
}

/// GET /jobs/:id
pub async fn handle_job_detail(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Result<Html<String>, AppError> {
    render_detail(&state, &job_id, None).await
}

/// POST /jobs/:id/apply
pub async fn handle_apply(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Result<Html<String>, AppError> {
    let user = state.require_role(UserRole::Candidate).await?;
    let notice =
        match services::applications::apply_to_job(state.transport.as_ref(), &job_id, &user.id).await {
            Ok(()) => Notice::success("Application sent."),
            Err(e) => Notice::from(&e),
        };
    render_detail(&state, &job_id, Some(notice)).await
}

/// POST /jobs/:id/favorite
pub async fn handle_add_favorite(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Result<Html<String>, AppError> {
    let user = state.require_role(UserRole::Candidate).await?;
    let notice =
        match services::favorites::add_favorite(state.transport.as_ref(), &job_id, &user.id).await {
            Ok(()) => Notice::success("Saved to favorites."),
            Err(e) => Notice::from(&e),
        };
    render_detail(&state, &job_id, Some(notice)).await
}
