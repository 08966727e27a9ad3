use askama::Template;

use crate::board::BoardList;
use crate::listing::state::ListBody;
use crate::listing::view::{CriteriaView, PagerView};
use crate::models::job::JobPosting;
use crate::models::salary_label;
use crate::notice::Notice;

#[derive(Debug, Clone)]
pub struct PostingItemView {
    pub id: String,
    pub title: String,
    pub company_name: String,
    pub company_logo: Option<String>,
    pub location: String,
    pub modality: String,
    pub salary: String,
    pub active: bool,
    pub expiration_date: String,
}

impl From<&JobPosting> for PostingItemView {
    fn from(job: &JobPosting) -> Self {
        Self {
            id: job.id.clone(),
            title: job.title.clone(),
            company_name: job.company_name.clone(),
            company_logo: job.company_logo.clone(),
            location: job.location.clone().unwrap_or_default(),
            modality: job.modality.clone().unwrap_or_default(),
            salary: salary_label(job.salary_min, job.salary_max),
            active: job.active,
            expiration_date: job.expiration_date.clone().unwrap_or_default(),
        }
    }
}

#[derive(Template)]
#[template(path = "job_board.html")]
pub struct BoardView {
    pub notice: Option<Notice>,
    pub nothing_yet: bool,
    pub no_results: bool,
    pub items: Vec<PostingItemView>,
    pub total: usize,
    pub criteria: CriteriaView,
    pub pager: PagerView,
    /// Enterprises get the "post a job" form.
    pub can_publish: bool,
}

impl BoardView {
    pub fn build(state: &BoardList, notice: Option<Notice>, can_publish: bool) -> Self {
        let page = state.page_view();
        let body = state.body(page.filtered_total);

        Self {
            notice,
            nothing_yet: body == ListBody::NothingYet,
            no_results: body == ListBody::NoResults,
            items: page.items.iter().map(PostingItemView::from).collect(),
            total: page.filtered_total,
            criteria: CriteriaView::from(state.criteria()),
            pager: PagerView::from_page(&page),
            can_publish,
        }
    }
}

#[derive(Template)]
#[template(path = "job_detail.html")]
pub struct JobDetailView {
    pub notice: Option<Notice>,
    pub job: PostingItemView,
    pub description: String,
    /// Candidates get the apply and save controls.
    pub can_apply: bool,
}

impl JobDetailView {
    pub fn new(job: &JobPosting, notice: Option<Notice>, can_apply: bool) -> Self {
        Self {
            notice,
            job: PostingItemView::from(job),
            description: job.description.clone(),
            can_apply: can_apply && job.active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::new_board_list;

    fn posting(id: &str, active: bool, created_at: &str) -> JobPosting {
        JobPosting {
            id: id.to_string(),
            title: format!("Role {id}"),
            description: "<b>Great</b> team".to_string(),
            modality: Some("hybrid".to_string()),
            location: Some("Santiago".to_string()),
            salary_min: None,
            salary_max: Some(3000.0),
            expiration_date: None,
            active,
            company_id: "co-9".to_string(),
            company_name: "Umbrella".to_string(),
            company_logo: None,
            created_at: Some(created_at.to_string()),
        }
    }

    #[test]
    fn test_status_filter_separates_closed_offers() {
        let mut list = new_board_list(10);
        list.replace_all(vec![
            posting("p1", true, "2024-02-01"),
            posting("p2", false, "2024-02-02"),
        ]);
        let mut criteria = list.criteria().clone();
        criteria.status = "closed".to_string();
        list.set_criteria(criteria);

        let view = BoardView::build(&list, None, false);
        assert_eq!(view.items.len(), 1);
        assert_eq!(view.items[0].id, "p2");
    }

    #[test]
    fn test_publish_form_only_for_enterprises() {
        let list = new_board_list(10);
        let html = BoardView::build(&list, None, true).render().unwrap();
        assert!(html.contains(r#"data-form="publish-job""#));
        let html = BoardView::build(&list, None, false).render().unwrap();
        assert!(!html.contains(r#"data-form="publish-job""#));
    }

    #[test]
    fn test_detail_escapes_description_and_hides_apply_on_closed() {
        let html = JobDetailView::new(&posting("p1", false, "2024-02-01"), None, true)
            .render()
            .unwrap();
        assert!(html.contains("&lt;b&gt;Great"));
        assert!(!html.contains(r#"data-form="apply""#));
        assert!(html.contains("Up to $3000"));
    }
}
