// Client-side list engine shared by alerts, applied jobs, favorites and the job board.
// Implements: filter/sort predicates, per-list state with derived filtered view,
// pagination, and the delegated UI action vocabulary.

pub mod actions;
pub mod filters;
pub mod state;
pub mod view;

use crate::models::alert::JobAlert;
use crate::models::job::{JobPosting, JobSnapshot};

/// What the filter/sort engine needs to know about a record.
pub trait Listable: Clone {
    fn record_id(&self) -> &str;
    /// Value matched by the status/type filter.
    fn status_key(&self) -> &str;
    fn modality(&self) -> Option<&str>;
    /// `None` when the record has no read/unread notion.
    fn read_flag(&self) -> Option<bool> {
        None
    }
    /// Designated date for `sort_by_date`, as sent by the backend.
    fn sort_date(&self) -> Option<&str>;
    fn salary_range(&self) -> (Option<f64>, Option<f64>);
}

impl Listable for JobAlert {
    fn record_id(&self) -> &str {
        &self.id
    }

    fn status_key(&self) -> &str {
        self.alert_type.as_str()
    }

    fn modality(&self) -> Option<&str> {
        self.modality.as_deref()
    }

    fn read_flag(&self) -> Option<bool> {
        Some(self.read)
    }

    fn sort_date(&self) -> Option<&str> {
        Some(&self.sent_at)
    }

    fn salary_range(&self) -> (Option<f64>, Option<f64>) {
        (self.salary_min, self.salary_max)
    }
}

impl Listable for JobSnapshot {
    fn record_id(&self) -> &str {
        &self.application_id
    }

    fn status_key(&self) -> &str {
        self.application_status.as_str()
    }

    fn modality(&self) -> Option<&str> {
        self.modality.as_deref()
    }

    fn sort_date(&self) -> Option<&str> {
        self.created_at
            .as_deref()
            .or(self.expiration_date.as_deref())
    }

    fn salary_range(&self) -> (Option<f64>, Option<f64>) {
        (self.salary_min, self.salary_max)
    }
}

impl Listable for JobPosting {
    fn record_id(&self) -> &str {
        &self.id
    }

    fn status_key(&self) -> &str {
        if self.active {
            "active"
        } else {
            "closed"
        }
    }

    fn modality(&self) -> Option<&str> {
        self.modality.as_deref()
    }

    fn sort_date(&self) -> Option<&str> {
        self.created_at.as_deref()
    }

    fn salary_range(&self) -> (Option<f64>, Option<f64>) {
        (self.salary_min, self.salary_max)
    }
}
