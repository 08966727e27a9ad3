use std::collections::HashMap;

use crate::listing::filters::{apply_criteria, ListCriteria};
use crate::listing::Listable;

/// Which body a list fragment should render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListBody {
    /// The canonical list itself is empty.
    NothingYet,
    /// Records exist but the active filters exclude all of them.
    NoResults,
    Items,
}

/// One page of the filtered view.
#[derive(Debug, Clone)]
pub struct PageView<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub total_pages: usize,
    pub filtered_total: usize,
}

/// Per-list controller state.
///
/// `all` is the only stored collection. The filtered view is recomputed from
/// it on every read and is never written back.
#[derive(Debug, Clone)]
pub struct ListState<T> {
    all: Vec<T>,
    criteria: ListCriteria,
    default_criteria: ListCriteria,
    page: usize,
    page_size: usize,
    /// In-flight calls per id. Only the call that marked an id clears it.
    pending: HashMap<String, usize>,
    loaded: bool,
}

impl<T: Listable> ListState<T> {
    pub fn new(default_criteria: ListCriteria, page_size: usize) -> Self {
        Self {
            all: Vec::new(),
            criteria: default_criteria.clone(),
            default_criteria,
            page: 1,
            page_size: page_size.max(1),
            pending: HashMap::new(),
            loaded: false,
        }
    }

    /// Replaces the canonical list with a fresh fetch. Filters and in-flight
    /// markers are kept.
    pub fn replace_all(&mut self, items: Vec<T>) {
        self.all = items;
        self.loaded = true;
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn all(&self) -> &[T] {
        &self.all
    }

    pub fn criteria(&self) -> &ListCriteria {
        &self.criteria
    }

    /// Always derived from `all`, never from a previous filtered view.
    pub fn filtered(&self) -> Vec<T> {
        apply_criteria(&self.all, &self.criteria)
    }

    pub fn set_criteria(&mut self, criteria: ListCriteria) {
        self.criteria = criteria;
        self.page = 1;
    }

    pub fn clear_filters(&mut self) {
        self.criteria = self.default_criteria.clone();
        self.page = 1;
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    pub fn page_view(&self) -> PageView<T> {
        let filtered = self.filtered();
        let filtered_total = filtered.len();
        let total_pages = filtered_total.div_ceil(self.page_size).max(1);
        let page = self.page.min(total_pages);

        let items = filtered
            .into_iter()
            .skip((page - 1) * self.page_size)
            .take(self.page_size)
            .collect();

        PageView {
            items,
            page,
            total_pages,
            filtered_total,
        }
    }

    pub fn body(&self, filtered_total: usize) -> ListBody {
        if self.all.is_empty() {
            ListBody::NothingYet
        } else if filtered_total == 0 {
            ListBody::NoResults
        } else {
            ListBody::Items
        }
    }

    pub fn find(&self, id: &str) -> Option<&T> {
        self.all.iter().find(|item| item.record_id() == id)
    }

    /// Applies `update` to the record with `id`. Returns false if absent.
    pub fn update(&mut self, id: &str, update: impl FnOnce(&mut T)) -> bool {
        match self.all.iter_mut().find(|item| item.record_id() == id) {
            Some(item) => {
                update(item);
                true
            }
            None => false,
        }
    }

    /// Drops a record from the canonical list only; no backend call is made.
    pub fn remove_local(&mut self, id: &str) -> Option<T> {
        let index = self.all.iter().position(|item| item.record_id() == id)?;
        Some(self.all.remove(index))
    }

    pub fn mark_pending(&mut self, id: &str) {
        *self.pending.entry(id.to_string()).or_insert(0) += 1;
    }

    pub fn clear_pending(&mut self, id: &str) {
        if let Some(count) = self.pending.get_mut(id) {
            *count -= 1;
            if *count == 0 {
                self.pending.remove(id);
            }
        }
    }

    pub fn is_pending(&self, id: &str) -> bool {
        self.pending.contains_key(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api_client::testing::sample_snapshot;
    use crate::listing::filters::SortOrder;
    use crate::models::job::{ApplicationStatus, JobSnapshot};

    fn jobs() -> Vec<JobSnapshot> {
        vec![
            sample_snapshot("j1", ApplicationStatus::Pending, "remote", (1000.0, 2000.0), "2024-01-01"),
            sample_snapshot("j2", ApplicationStatus::Accepted, "hybrid", (3000.0, 4000.0), "2024-01-02"),
            sample_snapshot("j3", ApplicationStatus::Rejected, "remote", (5000.0, 6000.0), "2024-01-03"),
        ]
    }

    fn state(page_size: usize) -> ListState<JobSnapshot> {
        let mut state = ListState::new(ListCriteria::sorted_by(SortOrder::DateDesc), page_size);
        state.replace_all(jobs());
        state
    }

    #[test]
    fn test_empty_list_is_nothing_yet() {
        let state: ListState<JobSnapshot> =
            ListState::new(ListCriteria::sorted_by(SortOrder::DateDesc), 10);
        let view = state.page_view();
        assert_eq!(state.body(view.filtered_total), ListBody::NothingYet);
        assert_eq!(view.total_pages, 1);
    }

    #[test]
    fn test_filtered_out_is_no_results_and_clear_restores() {
        let mut state = state(10);
        let mut criteria = state.criteria().clone();
        criteria.status = "reviewing".to_string();
        state.set_criteria(criteria);

        let view = state.page_view();
        assert_eq!(view.filtered_total, 0);
        assert_eq!(state.body(view.filtered_total), ListBody::NoResults);

        state.clear_filters();
        let view = state.page_view();
        assert_eq!(view.filtered_total, 3);
        assert_eq!(state.body(view.filtered_total), ListBody::Items);
    }

    #[test]
    fn test_refiltering_starts_from_all() {
        let mut state = state(10);
        let mut narrow = state.criteria().clone();
        narrow.modality = "hybrid".to_string();
        state.set_criteria(narrow);
        assert_eq!(state.filtered().len(), 1);

        let mut other = state.criteria().clone();
        other.modality = "remote".to_string();
        state.set_criteria(other);
        assert_eq!(state.filtered().len(), 2);
        assert_eq!(state.all().len(), 3);
    }

    #[test]
    fn test_pagination_clamps_to_last_page() {
        let mut state = state(2);
        state.set_page(9);
        let view = state.page_view();
        assert_eq!(view.total_pages, 2);
        assert_eq!(view.page, 2);
        assert_eq!(view.items.len(), 1);
        assert_eq!(view.items[0].application_id, "j1");
    }

    #[test]
    fn test_changing_filters_resets_page() {
        let mut state = state(1);
        state.set_page(3);
        state.set_criteria(state.criteria().clone());
        assert_eq!(state.page_view().page, 1);
    }

    #[test]
    fn test_remove_local_only_touches_all() {
        let mut state = state(10);
        let removed = state.remove_local("j2").unwrap();
        assert_eq!(removed.job_id, "job-j2");
        assert_eq!(state.all().len(), 2);
        assert!(state.remove_local("missing").is_none());
    }

    #[test]
    fn test_update_and_pending() {
        let mut state = state(10);
        assert!(state.update("j1", |j| j.job_active = false));
        assert!(!state.find("j1").unwrap().job_active);
        assert!(!state.update("nope", |_| {}));

        state.mark_pending("j1");
        assert!(state.is_pending("j1"));
        state.clear_pending("j1");
        assert!(!state.is_pending("j1"));
    }

    #[test]
    fn test_reload_keeps_in_flight_ids_pending() {
        let mut state = state(10);
        state.mark_pending("j1");
        state.mark_pending("j2");

        // j2's call resolves and its refresh lands while j1 is still in flight.
        state.clear_pending("j2");
        state.replace_all(jobs());
        assert!(state.is_pending("j1"));
        assert!(!state.is_pending("j2"));
    }

    #[test]
    fn test_overlapping_calls_on_one_id() {
        let mut state = state(10);
        state.mark_pending("j1");
        state.mark_pending("j1");
        state.clear_pending("j1");
        assert!(state.is_pending("j1"));
        state.clear_pending("j1");
        assert!(!state.is_pending("j1"));
        state.clear_pending("j1");
        assert!(!state.is_pending("j1"));
    }
}
