//! Filter/sort predicates over in-memory records.
//!
//! Every function borrows its input and returns a new vector; the source slice
//! is never mutated. Unknown filter values yield an empty result rather than
//! an error.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::listing::Listable;
use crate::models::parse_timestamp_millis;

pub const ALL: &str = "all";

fn is_all(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case(ALL)
}

/// `"all"` is identity; otherwise case-insensitive exact match on `status_key`.
pub fn filter_by_status<T: Listable>(items: &[T], status: &str) -> Vec<T> {
    if is_all(status) {
        return items.to_vec();
    }
    let wanted = status.trim();
    items
        .iter()
        .filter(|item| item.status_key().eq_ignore_ascii_case(wanted))
        .cloned()
        .collect()
}

/// Same contract as `filter_by_status`, on modality. Records without a modality
/// only survive the `"all"` filter.
pub fn filter_by_modality<T: Listable>(items: &[T], modality: &str) -> Vec<T> {
    if is_all(modality) {
        return items.to_vec();
    }
    let wanted = modality.trim();
    items
        .iter()
        .filter(|item| {
            item.modality()
                .map(|m| m.trim().eq_ignore_ascii_case(wanted))
                .unwrap_or(false)
        })
        .cloned()
        .collect()
}

/// `"unread"` keeps records whose read flag is false, `"read"` keeps true,
/// `"all"` is identity.
pub fn filter_by_read_status<T: Listable>(items: &[T], status: &str) -> Vec<T> {
    let keep_read = match status.trim().to_ascii_lowercase().as_str() {
        ALL => return items.to_vec(),
        "read" => true,
        "unread" => false,
        _ => return Vec::new(),
    };
    items
        .iter()
        .filter(|item| item.read_flag() == Some(keep_read))
        .cloned()
        .collect()
}

/// Sorts by the designated date, most recent first when `descending`.
///
/// Records whose date does not parse sort after every dated record; their
/// relative order is unspecified.
pub fn sort_by_date<T: Listable>(items: &[T], descending: bool) -> Vec<T> {
    let mut sorted = items.to_vec();
    sorted.sort_by(|a, b| {
        let ta = a.sort_date().and_then(parse_timestamp_millis);
        let tb = b.sort_date().and_then(parse_timestamp_millis);
        compare_missing_last(ta, tb, descending, |x, y| x.cmp(&y))
    });
    sorted
}

/// Sorts by the mean of (min, max) salary. A one-sided range uses its only bound.
pub fn sort_by_salary<T: Listable>(items: &[T], descending: bool) -> Vec<T> {
    let mut sorted = items.to_vec();
    sorted.sort_by(|a, b| {
        compare_missing_last(mean_salary(a), mean_salary(b), descending, |x, y| {
            x.total_cmp(&y)
        })
    });
    sorted
}

pub fn mean_salary<T: Listable>(item: &T) -> Option<f64> {
    match item.salary_range() {
        (Some(min), Some(max)) => Some((min + max) / 2.0),
        (Some(only), None) | (None, Some(only)) => Some(only),
        (None, None) => None,
    }
}

/// Total order with `None` after every `Some`, whatever the direction.
fn compare_missing_last<K: Copy>(
    a: Option<K>,
    b: Option<K>,
    descending: bool,
    cmp: impl Fn(K, K) -> Ordering,
) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) if descending => cmp(y, x),
        (Some(x), Some(y)) => cmp(x, y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Keep the order the backend returned.
    #[default]
    Server,
    DateDesc,
    DateAsc,
    SalaryDesc,
    SalaryAsc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Server => "server",
            SortOrder::DateDesc => "date_desc",
            SortOrder::DateAsc => "date_asc",
            SortOrder::SalaryDesc => "salary_desc",
            SortOrder::SalaryAsc => "salary_asc",
        }
    }
}

/// The UI-selected predicates for one list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListCriteria {
    pub read: String,
    pub status: String,
    pub modality: String,
    pub sort: SortOrder,
}

impl ListCriteria {
    pub fn sorted_by(sort: SortOrder) -> Self {
        Self {
            read: ALL.to_string(),
            status: ALL.to_string(),
            modality: ALL.to_string(),
            sort,
        }
    }

    /// True when any filter (not the sort) narrows the list.
    pub fn is_filtering(&self) -> bool {
        !(is_all(&self.read) && is_all(&self.status) && is_all(&self.modality))
    }
}

/// Applies read-status → status/type → modality, then the sort.
pub fn apply_criteria<T: Listable>(all: &[T], criteria: &ListCriteria) -> Vec<T> {
    let items = filter_by_read_status(all, &criteria.read);
    let items = filter_by_status(&items, &criteria.status);
    let items = filter_by_modality(&items, &criteria.modality);

    match criteria.sort {
        SortOrder::Server => items,
        SortOrder::DateDesc => sort_by_date(&items, true),
        SortOrder::DateAsc => sort_by_date(&items, false),
        SortOrder::SalaryDesc => sort_by_salary(&items, true),
        SortOrder::SalaryAsc => sort_by_salary(&items, false),
    }
}
