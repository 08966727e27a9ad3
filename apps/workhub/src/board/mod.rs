// Public job board: every published offer, plus the detail page where
// candidates apply or save and enterprises publish new offers.

pub mod handlers;
pub mod view;

use serde::Deserialize;
use tokio::sync::Mutex;

use crate::api_client::Transport;
use crate::errors::AppError;
use crate::listing::filters::{ListCriteria, SortOrder};
use crate::listing::state::ListState;
use crate::models::job::{JobPosting, NewJobPosting};
use crate::services;

pub type BoardList = ListState<JobPosting>;

pub fn new_board_list(page_size: usize) -> BoardList {
    ListState::new(ListCriteria::sorted_by(SortOrder::DateDesc), page_size)
}

pub async fn reload(transport: &dyn Transport, list: &Mutex<BoardList>) -> Result<(), AppError> {
    let jobs = services::jobs::list_jobs(transport).await?;
    list.lock().await.replace_all(jobs);
    Ok(())
}

/// Fetches the board only if it has never been loaded.
pub async fn ensure_loaded(transport: &dyn Transport, list: &Mutex<BoardList>) -> Result<(), AppError> {
    if list.lock().await.is_loaded() {
        return Ok(());
    }
    reload(transport, list).await
}

/// "Post a job" form as submitted. Every field arrives as text.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostingForm {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub modality: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub salary_min: String,
    #[serde(default)]
    pub salary_max: String,
    #[serde(default)]
    pub expiration_date: String,
}

fn optional_text(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn optional_amount(value: &str, field: &str) -> Result<Option<f64>, AppError> {
    match value.trim() {
        "" => Ok(None),
        raw => raw
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(Some)
            .ok_or_else(|| AppError::Validation(format!("{field} must be a number."))),
    }
}

impl TryFrom<PostingForm> for NewJobPosting {
    type Error = AppError;

    fn try_from(form: PostingForm) -> Result<Self, Self::Error> {
        Ok(NewJobPosting {
            title: form.title.trim().to_string(),
            description: form.description.trim().to_string(),
            modality: form.modality.trim().to_lowercase(),
            location: form.location.trim().to_string(),
            salary_min: optional_amount(&form.salary_min, "Minimum salary")?,
            salary_max: optional_amount(&form.salary_max, "Maximum salary")?,
            expiration_date: optional_text(&form.expiration_date),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_posting_form_blank_salaries_are_open() {
        let posting = NewJobPosting::try_from(PostingForm {
            title: " Backend Dev ".to_string(),
            modality: "Remote".to_string(),
            salary_min: "1500".to_string(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(posting.title, "Backend Dev");
        assert_eq!(posting.modality, "remote");
        assert_eq!(posting.salary_min, Some(1500.0));
        assert_eq!(posting.salary_max, None);
        assert_eq!(posting.expiration_date, None);
    }

    #[test]
    fn test_posting_form_rejects_non_numeric_salary() {
        let err = NewJobPosting::try_from(PostingForm {
            title: "Dev".to_string(),
            salary_max: "a lot".to_string(),
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(err.user_message(), "Maximum salary must be a number.");
    }
}
