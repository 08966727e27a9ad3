use serde::Serialize;
use tracing::info;

use crate::api_client::{fetch, ApiRequest, Transport};
use crate::errors::AppError;
use crate::models::job::{JobPosting, NewJobPosting};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateJobBody<'a> {
    company_id: &'a str,
    #[serde(flatten)]
    posting: &'a NewJobPosting,
}

/// GET /jobs
pub async fn list_jobs(transport: &dyn Transport) -> Result<Vec<JobPosting>, AppError> {
    fetch(transport, ApiRequest::get("/jobs")).await
}

/// GET /jobs/:id
pub async fn get_job(transport: &dyn Transport, job_id: &str) -> Result<JobPosting, AppError> {
    fetch(transport, ApiRequest::get(format!("/jobs/{job_id}"))).await
}

/// POST /jobs
///
/// Validates locally before calling the backend: a title is required and the
/// salary range must not be inverted.
pub async fn create_job(
    transport: &dyn Transport,
    company_id: &str,
    posting: &NewJobPosting,
) -> Result<JobPosting, AppError> {
    validate_posting(posting)?;

    let created: JobPosting = fetch(
        transport,
        ApiRequest::post(
            "/jobs",
            &CreateJobBody {
                company_id,
                posting,
            },
        )?,
    )
    .await?;
    info!("company {company_id} published job {}", created.id);
    Ok(created)
}

pub fn validate_posting(posting: &NewJobPosting) -> Result<(), AppError> {
    if posting.title.trim().is_empty() {
        return Err(AppError::Validation("A job title is required.".to_string()));
    }
    if let (Some(min), Some(max)) = (posting.salary_min, posting.salary_max) {
        if min < 0.0 || max < 0.0 {
            return Err(AppError::Validation(
                "Salaries cannot be negative.".to_string(),
            ));
        }
        if min > max {
            return Err(AppError::Validation(
                "Minimum salary cannot exceed the maximum.".to_string(),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api_client::testing::FakeBackend;
    use crate::api_client::RequestBody;
    use reqwest::Method;
    use serde_json::json;

    fn posting(title: &str, min: Option<f64>, max: Option<f64>) -> NewJobPosting {
        NewJobPosting {
            title: title.to_string(),
            description: "Build things".to_string(),
            modality: "remote".to_string(),
            location: "Bogotá".to_string(),
            salary_min: min,
            salary_max: max,
            expiration_date: Some("2030-01-31".to_string()),
        }
    }

    #[test]
    fn test_validate_rejects_blank_title() {
        let err = validate_posting(&posting("  ", None, None)).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_validate_rejects_inverted_salary() {
        let err = validate_posting(&posting("Dev", Some(5000.0), Some(1000.0))).unwrap_err();
        assert!(err.user_message().contains("Minimum salary"));
    }

    #[test]
    fn test_validate_accepts_open_range() {
        assert!(validate_posting(&posting("Dev", Some(5000.0), None)).is_ok());
    }

    #[tokio::test]
    async fn test_create_job_flattens_posting_with_company() {
        let backend = FakeBackend::new();
        backend.respond_ok(
            Method::POST,
            "/jobs",
            json!({
                "id": "job-77", "title": "Dev", "active": true,
                "companyId": "co-1", "companyName": "Acme"
            }),
        );

        let created = create_job(&backend, "co-1", &posting("Dev", Some(1.0), Some(2.0)))
            .await
            .unwrap();
        assert_eq!(created.id, "job-77");

        let sent = backend.requests_to(Method::POST, "/jobs");
        match &sent[0].body {
            RequestBody::Json(body) => {
                assert_eq!(body["companyId"], "co-1");
                assert_eq!(body["title"], "Dev");
                assert_eq!(body["salaryMax"], 2.0);
            }
            other => panic!("unexpected body {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_invalid_posting_never_reaches_backend() {
        let backend = FakeBackend::new();
        let _ = create_job(&backend, "co-1", &posting("", None, None)).await;
        assert!(backend.requests().is_empty());
    }
}
