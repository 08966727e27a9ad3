use tracing::info;

use crate::api_client::{fetch, ApiRequest, Transport};
use crate::errors::AppError;
use crate::models::profile::{Profile, ProfileUpdate, UserRole};

/// GET /candidates/:id | /enterprises/:id
pub async fn get_profile(
    transport: &dyn Transport,
    role: UserRole,
    user_id: &str,
) -> Result<Profile, AppError> {
    fetch(
        transport,
        ApiRequest::get(format!("/{}/{user_id}", role.collection())),
    )
    .await
}

/// PUT /candidates/:id | /enterprises/:id
pub async fn update_profile(
    transport: &dyn Transport,
    role: UserRole,
    user_id: &str,
    update: &ProfileUpdate,
) -> Result<Profile, AppError> {
    if let Some(name) = &update.display_name {
        if name.trim().is_empty() {
            return Err(AppError::Validation("Name cannot be empty.".to_string()));
        }
    }

    let profile: Profile = fetch(
        transport,
        ApiRequest::put(format!("/{}/{user_id}", role.collection()), update)?,
    )
    .await?;
    info!("{role} profile {user_id} updated");
    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api_client::testing::FakeBackend;
    use crate::api_client::RequestBody;
    use reqwest::Method;
    use serde_json::json;

    fn profile_json() -> serde_json::Value {
        json!({
            "id": "e1", "role": "enterprise", "displayName": "Acme",
            "email": "jobs@acme.test", "website": "https://acme.test"
        })
    }

    #[tokio::test]
    async fn test_enterprise_profile_uses_enterprise_collection() {
        let backend = FakeBackend::new();
        backend.respond_ok(Method::GET, "/enterprises/e1", profile_json());

        let profile = get_profile(&backend, UserRole::Enterprise, "e1").await.unwrap();
        assert_eq!(profile.display_name, "Acme");
    }

    #[tokio::test]
    async fn test_update_only_sends_changed_fields() {
        let backend = FakeBackend::new();
        backend.respond_ok(Method::PUT, "/enterprises/e1", profile_json());

        let update = ProfileUpdate {
            headline: Some("Hiring Rust devs".to_string()),
            ..Default::default()
        };
        update_profile(&backend, UserRole::Enterprise, "e1", &update)
            .await
            .unwrap();

        let sent = backend.requests_to(Method::PUT, "/enterprises/e1");
        match &sent[0].body {
            RequestBody::Json(body) => {
                assert_eq!(body["headline"], "Hiring Rust devs");
                assert!(body.get("displayName").is_none());
            }
            other => panic!("unexpected body {other:?}"),
        }
    }
}
