use askama::Template;
use axum::{
    extract::{Query, State},
    response::Html,
    Form,
};

use crate::alerts::read_state::{mark_all_as_read, toggle_read_status};
use crate::alerts::view::AlertListView;
use crate::alerts::{ensure_loaded, reload, AlertList};
use crate::errors::AppError;
use crate::listing::actions::{ActionForm, UiAction};
use crate::listing::view::CriteriaForm;
use crate::models::profile::UserRole;
use crate::notice::Notice;
use crate::state::AppState;

fn render(list: &AlertList, notice: Option<Notice>) -> Result<Html<String>, AppError> {
    Ok(Html(AlertListView::build(list, notice).render()?))
}

/// GET /alerts
/// Page load: fetches the candidate's alerts, then renders with any filters in the query.
pub async fn handle_list_alerts(
    State(state): State<AppState>,
    Query(form): Query<CriteriaForm>,
) -> Result<Html<String>, AppError> {
    let user = state.require_role(UserRole::Candidate).await?;
    reload(state.transport.as_ref(), &state.lists.alerts, &user.id).await?;

    let mut list = state.lists.alerts.lock().await;
    form.apply_to(&mut list);
    render(&list, None)
}

/// POST /alerts/filters
/// Re-derives the filtered view from the alerts already loaded. Only fetches
/// when nothing has been loaded yet.
pub async fn handle_filter_alerts(
    State(state): State<AppState>,
    Form(form): Form<CriteriaForm>,
) -> Result<Html<String>, AppError> {
    let user = state.require_role(UserRole::Candidate).await?;
    ensure_loaded(state.transport.as_ref(), &state.lists.alerts, &user.id).await?;

    let mut list = state.lists.alerts.lock().await;
    form.apply_to(&mut list);
    render(&list, None)
}

/// POST /alerts/actions
pub async fn handle_alert_action(
    State(state): State<AppState>,
    Form(form): Form<ActionForm>,
) -> Result<Html<String>, AppError> {
    let action = UiAction::try_from(form)?;
    let user = state.require_role(UserRole::Candidate).await?;
    let transport = state.transport.as_ref();
    let alerts = &state.lists.alerts;
    ensure_loaded(transport, alerts, &user.id).await?;

    let notice = match action {
        UiAction::ToggleRead { id, read } => {
            Some(toggle_read_status(transport, alerts, &user.id, &id, read).await.notice)
        }
        UiAction::MarkAllRead => {
            let unread: Vec<String> = alerts
                .lock()
                .await
                .all()
                .iter()
                .filter(|a| !a.read)
                .map(|a| a.id.clone())
                .collect();
            Some(mark_all_as_read(transport, alerts, &user.id, &unread).await.notice)
        }
        UiAction::ClearFilters => {
            alerts.lock().await.clear_filters();
            None
        }
        UiAction::Paginate { page } => {
            alerts.lock().await.set_page(page);
            None
        }
        other => return Err(other.unsupported("alerts")),
    };

    let list = alerts.lock().await;
    render(&list, notice)
}
