use serde::Deserialize;

use crate::listing::filters::{ListCriteria, SortOrder};
use crate::listing::state::{ListState, PageView};
use crate::listing::Listable;

/// Pagination controls shared by every list template (`partials/pager.html`).
#[derive(Debug, Clone)]
pub struct PagerView {
    pub page: usize,
    pub total_pages: usize,
    pub has_prev: bool,
    pub has_next: bool,
    pub prev: usize,
    pub next: usize,
}

impl PagerView {
    pub fn from_page<T>(view: &PageView<T>) -> Self {
        Self {
            page: view.page,
            total_pages: view.total_pages,
            has_prev: view.page > 1,
            has_next: view.page < view.total_pages,
            prev: view.page.saturating_sub(1).max(1),
            next: (view.page + 1).min(view.total_pages),
        }
    }
}

/// Current filter selections echoed back into the filter controls.
#[derive(Debug, Clone)]
pub struct CriteriaView {
    pub read: String,
    pub status: String,
    pub modality: String,
    pub sort: &'static str,
    pub filtering: bool,
}

impl From<&ListCriteria> for CriteriaView {
    fn from(criteria: &ListCriteria) -> Self {
        Self {
            read: criteria.read.to_lowercase(),
            status: criteria.status.to_lowercase(),
            modality: criteria.modality.to_lowercase(),
            sort: criteria.sort.as_str(),
            filtering: criteria.is_filtering(),
        }
    }
}

/// Filter controls as submitted by the browser (query string or form body).
/// Absent fields keep their current value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CriteriaForm {
    #[serde(default)]
    pub read: Option<String>,
    #[serde(default, alias = "type")]
    pub status: Option<String>,
    #[serde(default)]
    pub modality: Option<String>,
    #[serde(default)]
    pub sort: Option<SortOrder>,
    #[serde(default)]
    pub page: Option<usize>,
}

impl CriteriaForm {
    pub fn touches_filters(&self) -> bool {
        self.read.is_some() || self.status.is_some() || self.modality.is_some() || self.sort.is_some()
    }

    /// Applies the submitted filters (resetting to page 1), then the page.
    pub fn apply_to<T: Listable>(&self, state: &mut ListState<T>) {
        if self.touches_filters() {
            let merged = self.merge_into(state.criteria());
            state.set_criteria(merged);
        }
        if let Some(page) = self.page {
            state.set_page(page);
        }
    }

    pub fn merge_into(&self, current: &ListCriteria) -> ListCriteria {
        let pick = |value: &Option<String>, fallback: &String| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| fallback.clone())
        };

        ListCriteria {
            read: pick(&self.read, &current.read),
            status: pick(&self.status, &current.status),
            modality: pick(&self.modality, &current.modality),
            sort: self.sort.unwrap_or(current.sort),
        }
    }
}
