use askama::Template;

use crate::job_lists::{JobList, JobListKind};
use crate::listing::state::ListBody;
use crate::listing::view::{CriteriaView, PagerView};
use crate::models::job::JobSnapshot;
use crate::models::salary_label;
use crate::notice::Notice;

#[derive(Debug, Clone)]
pub struct SnapshotItemView {
    pub id: String,
    pub job_id: String,
    pub job_title: String,
    pub company_name: String,
    pub company_logo: Option<String>,
    pub location: String,
    pub modality: String,
    pub salary: String,
    pub status: &'static str,
    pub expiration_date: String,
    pub job_active: bool,
}

impl From<&JobSnapshot> for SnapshotItemView {
    fn from(job: &JobSnapshot) -> Self {
        Self {
            id: job.application_id.clone(),
            job_id: job.job_id.clone(),
            job_title: job.job_title.clone(),
            company_name: job.company_name.clone(),
            company_logo: job.company_logo.clone(),
            location: job.location.clone().unwrap_or_default(),
            modality: job.modality.clone().unwrap_or_default(),
            salary: salary_label(job.salary_min, job.salary_max),
            status: job.application_status.as_str(),
            expiration_date: job.expiration_date.clone().unwrap_or_default(),
            job_active: job.job_active,
        }
    }
}

#[derive(Template)]
#[template(path = "job_snapshots.html")]
pub struct JobListView {
    pub list_key: &'static str,
    pub title: &'static str,
    pub notice: Option<Notice>,
    pub nothing_yet: bool,
    pub no_results: bool,
    pub items: Vec<SnapshotItemView>,
    pub total: usize,
    pub criteria: CriteriaView,
    pub pager: PagerView,
    /// Favorites can be removed; applications cannot.
    pub removable: bool,
}

impl JobListView {
    pub fn build(kind: JobListKind, state: &JobList, notice: Option<Notice>) -> Self {
        let page = state.page_view();
        let body = state.body(page.filtered_total);

        Self {
            list_key: kind.key(),
            title: kind.title(),
            notice,
            nothing_yet: body == ListBody::NothingYet,
            no_results: body == ListBody::NoResults,
            items: page.items.iter().map(SnapshotItemView::from).collect(),
            total: page.filtered_total,
            criteria: CriteriaView::from(state.criteria()),
            pager: PagerView::from_page(&page),
            removable: kind == JobListKind::Favorites,
        }
    }
}
