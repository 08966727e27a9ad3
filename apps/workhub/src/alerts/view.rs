use askama::Template;

use crate::alerts::AlertList;
use crate::listing::state::ListBody;
use crate::listing::view::{CriteriaView, PagerView};
use crate::models::alert::JobAlert;
use crate::models::salary_label;
use crate::notice::Notice;

/// Counters recomputed on every render, never maintained incrementally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertCounters {
    /// Alerts in the filtered view.
    pub total: usize,
    /// Unread alerts in the filtered view.
    pub unread: usize,
    /// Unread alerts overall (navigation badge).
    pub badge: usize,
}

#[derive(Debug, Clone)]
pub struct AlertItemView {
    pub id: String,
    pub type_key: &'static str,
    pub type_label: &'static str,
    pub message: String,
    pub read: bool,
    /// Read state the toggle button requests.
    pub toggle_to: bool,
    pub toggle_label: &'static str,
    pub sent_at: String,
    pub job_id: String,
    pub job_title: String,
    pub company_name: String,
    pub company_logo: Option<String>,
    pub location: String,
    pub modality: String,
    pub salary: String,
    pub job_active: bool,
    pub pending: bool,
}

impl AlertItemView {
    fn new(alert: &JobAlert, pending: bool) -> Self {
        Self {
            id: alert.id.clone(),
            type_key: alert.alert_type.as_str(),
            type_label: alert.alert_type.label(),
            message: alert.message.clone(),
            read: alert.read,
            toggle_to: !alert.read,
            toggle_label: if alert.read {
                "Mark as unread"
            } else {
                "Mark as read"
            },
            sent_at: alert.sent_at.clone(),
            job_id: alert.job_id.clone(),
            job_title: alert.job_title.clone(),
            company_name: alert.company_name.clone(),
            company_logo: alert.company_logo.clone(),
            location: alert.location.clone().unwrap_or_default(),
            modality: alert.modality.clone().unwrap_or_default(),
            salary: salary_label(alert.salary_min, alert.salary_max),
            job_active: alert.job_active,
            pending,
        }
    }
}

#[derive(Template)]
#[template(path = "alerts.html")]
pub struct AlertListView {
    pub notice: Option<Notice>,
    pub nothing_yet: bool,
    pub no_results: bool,
    pub items: Vec<AlertItemView>,
    pub counters: AlertCounters,
    pub criteria: CriteriaView,
    pub pager: PagerView,
    pub can_mark_all: bool,
}

impl AlertListView {
    pub fn build(state: &AlertList, notice: Option<Notice>) -> Self {
        let filtered = state.filtered();
        let page = state.page_view();
        let body = state.body(page.filtered_total);
        let badge = state.all().iter().filter(|a| !a.read).count();

        Self {
            notice,
            nothing_yet: body == ListBody::NothingYet,
            no_results: body == ListBody::NoResults,
            items: page
                .items
                .iter()
                .map(|alert| AlertItemView::new(alert, state.is_pending(&alert.id)))
                .collect(),
            counters: AlertCounters {
                total: filtered.len(),
                unread: filtered.iter().filter(|a| !a.read).count(),
                badge,
            },
            criteria: CriteriaView::from(state.criteria()),
            pager: PagerView::from_page(&page),
            can_mark_all: badge > 0,
        }
    }
}
