//! In-memory backend used by service, workflow and router tests.
//!
//! Alerts are modelled statefully (list + read toggles, unread-first ordering
//! like the real backend); every other route answers from canned envelopes.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::Method;
use serde_json::{json, Value};

use crate::api_client::{ApiRequest, RawResponse, RequestBody, Transport};
use crate::errors::AppError;
use crate::models::alert::{AlertType, JobAlert};
use crate::models::job::{ApplicationStatus, JobSnapshot};
use crate::models::parse_timestamp_millis;

#[derive(Default)]
struct FakeState {
    alerts: Vec<JobAlert>,
    failing_alerts: HashSet<String>,
    offline: bool,
    canned: HashMap<(Method, String), RawResponse>,
    requests: Vec<ApiRequest>,
}

#[derive(Default)]
pub struct FakeBackend {
    state: Mutex<FakeState>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_alerts(alerts: Vec<JobAlert>) -> Self {
        let backend = Self::new();
        backend.state.lock().unwrap().alerts = alerts;
        backend
    }

    /// Makes every read toggle for `id` answer 500.
    pub fn fail_alert(&self, id: &str) {
        self.state
            .lock()
            .unwrap()
            .failing_alerts
            .insert(id.to_string());
    }

    /// Makes every call fail at the transport level.
    pub fn go_offline(&self) {
        self.state.lock().unwrap().offline = true;
    }

    pub fn respond(&self, method: Method, path: &str, status: u16, body: Value) {
        self.state.lock().unwrap().canned.insert(
            (method, path.to_string()),
            RawResponse {
                status,
                body: body.to_string(),
            },
        );
    }

    pub fn respond_ok(&self, method: Method, path: &str, data: Value) {
        self.respond(method, path, 200, json!({ "success": true, "data": data }));
    }

    pub fn alert(&self, id: &str) -> Option<JobAlert> {
        self.state
            .lock()
            .unwrap()
            .alerts
            .iter()
            .find(|a| a.id == id)
            .cloned()
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn requests_to(&self, method: Method, path: &str) -> Vec<ApiRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }
}

/// Unread first, then most recent first. Mirrors the backend's list order.
fn server_order(alerts: &[JobAlert]) -> Vec<JobAlert> {
    let mut ordered = alerts.to_vec();
    ordered.sort_by(|a, b| {
        a.read.cmp(&b.read).then_with(|| {
            let ta = parse_timestamp_millis(&a.sent_at).unwrap_or(0);
            let tb = parse_timestamp_millis(&b.sent_at).unwrap_or(0);
            tb.cmp(&ta)
        })
    });
    ordered
}

fn ok(data: Value) -> RawResponse {
    RawResponse {
        status: 200,
        body: json!({ "success": true, "data": data }).to_string(),
    }
}

fn failure(status: u16, message: &str) -> RawResponse {
    RawResponse {
        status,
        body: json!({ "success": false, "message": message }).to_string(),
    }
}

#[async_trait]
impl Transport for FakeBackend {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, AppError> {
        let mut state = self.state.lock().unwrap();
        state.requests.push(request.clone());

        if state.offline {
            return Err(AppError::Internal(anyhow::anyhow!("connection refused")));
        }

        if request.method == Method::GET && request.path == "/alerts" {
            let ordered = server_order(&state.alerts);
            return Ok(ok(serde_json::to_value(ordered).unwrap()));
        }

        let segments: Vec<&str> = request.path.trim_matches('/').split('/').collect();
        if request.method == Method::PUT
            && segments.len() == 3
            && segments[0] == "alerts"
            && segments[2] == "read"
        {
            let id = segments[1];
            if state.failing_alerts.contains(id) {
                return Ok(failure(500, "Could not update alert"));
            }
            let read = match &request.body {
                RequestBody::Json(body) => body["read"].as_bool().unwrap_or(true),
                _ => true,
            };
            return Ok(match state.alerts.iter_mut().find(|a| a.id == id) {
                Some(alert) => {
                    alert.read = read;
                    ok(Value::Null)
                }
                None => failure(404, "Alert not found"),
            });
        }

        Ok(state
            .canned
            .get(&(request.method.clone(), request.path.clone()))
            .cloned()
            .unwrap_or_else(|| failure(404, "No such route")))
    }

    fn public_object_url(&self, bucket: &str, path: &str) -> String {
        format!("https://storage.test/public/{bucket}/{path}")
    }
}

pub fn sample_alert(id: &str, alert_type: AlertType, read: bool, sent_at: &str) -> JobAlert {
    JobAlert {
        id: id.to_string(),
        alert_type,
        message: format!("Alert {id}"),
        read,
        sent_at: sent_at.to_string(),
        job_id: format!("job-{id}"),
        job_title: format!("Job {id}"),
        modality: Some("remote".to_string()),
        location: Some("Lima".to_string()),
        salary_min: Some(1000.0),
        salary_max: Some(2000.0),
        expiration_date: Some("2030-01-01".to_string()),
        job_active: true,
        company_id: "co-1".to_string(),
        company_name: "Acme".to_string(),
        company_logo: None,
    }
}

pub fn sample_snapshot(
    id: &str,
    status: ApplicationStatus,
    modality: &str,
    salary: (f64, f64),
    created_at: &str,
) -> JobSnapshot {
    JobSnapshot {
        application_id: id.to_string(),
        job_id: format!("job-{id}"),
        job_title: format!("Job {id}"),
        modality: Some(modality.to_string()),
        location: Some("Quito".to_string()),
        salary_min: Some(salary.0),
        salary_max: Some(salary.1),
        expiration_date: Some("2030-06-30".to_string()),
        application_status: status,
        company_name: "Globex".to_string(),
        company_logo: None,
        job_active: true,
        created_at: Some(created_at.to_string()),
    }
}
