use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AlertType {
    Application,
    Update,
    Expiration,
    Accepted,
    Rejected,
}

impl AlertType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertType::Application => "application",
            AlertType::Update => "update",
            AlertType::Expiration => "expiration",
            AlertType::Accepted => "accepted",
            AlertType::Rejected => "rejected",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AlertType::Application => "New application",
            AlertType::Update => "Job updated",
            AlertType::Expiration => "Expiring soon",
            AlertType::Accepted => "Accepted",
            AlertType::Rejected => "Not selected",
        }
    }
}

impl fmt::Display for AlertType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Server-generated notification about an application or a listing change.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JobAlert {
    pub id: String,
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    pub message: String,
    pub read: bool,
    pub sent_at: String,
    pub job_id: String,
    pub job_title: String,
    #[serde(default)]
    pub modality: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub salary_min: Option<f64>,
    #[serde(default)]
    pub salary_max: Option<f64>,
    #[serde(default)]
    pub expiration_date: Option<String>,
    pub job_active: bool,
    pub company_id: String,
    pub company_name: String,
    #[serde(default)]
    pub company_logo: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_backend_payload() {
        let alert: JobAlert = serde_json::from_value(serde_json::json!({
            "id": "al-1",
            "type": "accepted",
            "message": "Your application was accepted",
            "read": false,
            "sentAt": "2024-03-01T12:00:00Z",
            "jobId": "job-9",
            "jobTitle": "Backend Engineer",
            "modality": "remote",
            "salaryMin": 3000,
            "salaryMax": 4000,
            "jobActive": true,
            "companyId": "co-1",
            "companyName": "Acme"
        }))
        .unwrap();
        assert_eq!(alert.alert_type, AlertType::Accepted);
        assert_eq!(alert.salary_max, Some(4000.0));
        assert!(alert.company_logo.is_none());
    }

    #[test]
    fn test_unknown_type_fails_to_decode() {
        let result = serde_json::from_value::<JobAlert>(serde_json::json!({
            "id": "al-1", "type": "promotion", "message": "", "read": false,
            "sentAt": "", "jobId": "", "jobTitle": "", "jobActive": true,
            "companyId": "", "companyName": ""
        }));
        assert!(result.is_err());
    }
}
