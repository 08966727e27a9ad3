use std::path::PathBuf;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::api_client::{envelope, ApiRequest, Transport};
use crate::errors::AppError;
use crate::models::profile::SessionUser;

const IDENTITY_PATH: &str = "/auth/v1/user";

/// Cached accessor for the signed-in user.
///
/// Lookup order: memory, then the JSON cache file, then the identity call.
/// A successful identity call refreshes both caches.
pub struct SessionStore {
    path: PathBuf,
    cached: RwLock<Option<SessionUser>>,
}

impl SessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            cached: RwLock::new(None),
        }
    }

    pub async fn current_user(&self, transport: &dyn Transport) -> Result<SessionUser, AppError> {
        if let Some(user) = self.cached.read().await.clone() {
            return Ok(user);
        }

        if let Some(user) = self.read_cache_file().await {
            debug!("session restored from {}", self.path.display());
            *self.cached.write().await = Some(user.clone());
            return Ok(user);
        }

        let user = self.identify(transport).await?;
        self.write_cache_file(&user).await;
        *self.cached.write().await = Some(user.clone());
        info!("identified {} user {}", user.role, user.id);
        Ok(user)
    }

    /// Forgets the user in memory and on disk.
    pub async fn clear(&self) -> Result<(), AppError> {
        *self.cached.write().await = None;
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::Internal(e.into())),
        }
    }

    async fn identify(&self, transport: &dyn Transport) -> Result<SessionUser, AppError> {
        let response = transport.send(ApiRequest::get(IDENTITY_PATH)).await?;
        envelope::decode_optional::<SessionUser>(&response)
            .map_err(|e| match e {
                AppError::Backend { status: 401 | 403, .. } => AppError::NotIdentified,
                other => other,
            })?
            .ok_or(AppError::NotIdentified)
    }

    /// A corrupt or unreadable cache is treated as absent.
    async fn read_cache_file(&self) -> Option<SessionUser> {
        let raw = tokio::fs::read_to_string(&self.path).await.ok()?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!("ignoring unreadable session cache {}: {e}", self.path.display());
                None
            }
        }
    }

    async fn write_cache_file(&self, user: &SessionUser) {
        if let Some(parent) = self.path.parent() {
            if let Err(e) = tokio::fs::create_dir_all(parent).await {
                warn!("cannot create session cache dir: {e}");
                return;
            }
        }
        let body = match serde_json::to_string(user) {
            Ok(body) => body,
            Err(e) => {
                warn!("cannot serialize session cache: {e}");
                return;
            }
        };
        if let Err(e) = tokio::fs::write(&self.path, body).await {
            warn!("cannot write session cache {}: {e}", self.path.display());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api_client::testing::FakeBackend;
    use crate::models::profile::UserRole;
    use reqwest::Method;
    use serde_json::json;

    fn identity_json() -> serde_json::Value {
        json!({ "id": "cand-1", "email": "ana@mail.test", "role": "candidate" })
    }

    #[tokio::test]
    async fn test_identity_call_happens_once() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FakeBackend::new();
        backend.respond_ok(Method::GET, IDENTITY_PATH, identity_json());

        let store = SessionStore::new(dir.path().join("session.json"));
        let first = store.current_user(&backend).await.unwrap();
        let second = store.current_user(&backend).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first.role, UserRole::Candidate);
        assert_eq!(backend.requests_to(Method::GET, IDENTITY_PATH).len(), 1);
    }

    #[tokio::test]
    async fn test_cache_file_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");
        let backend = FakeBackend::new();
        backend.respond_ok(Method::GET, IDENTITY_PATH, identity_json());

        SessionStore::new(path.clone())
            .current_user(&backend)
            .await
            .unwrap();

        let offline = FakeBackend::new();
        offline.go_offline();
        let restored = SessionStore::new(path).current_user(&offline).await.unwrap();
        assert_eq!(restored.id, "cand-1");
        assert!(offline.requests().is_empty());
    }

    #[tokio::test]
    async fn test_no_user_is_not_identified() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FakeBackend::new();
        backend.respond_ok(Method::GET, IDENTITY_PATH, json!(null));

        let store = SessionStore::new(dir.path().join("session.json"));
        let err = store.current_user(&backend).await.unwrap_err();
        assert!(matches!(err, AppError::NotIdentified));
    }

    #[tokio::test]
    async fn test_unauthorized_is_not_identified() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FakeBackend::new();
        backend.respond(
            Method::GET,
            IDENTITY_PATH,
            401,
            json!({ "success": false, "message": "JWT expired" }),
        );

        let store = SessionStore::new(dir.path().join("session.json"));
        assert!(matches!(
            store.current_user(&backend).await.unwrap_err(),
            AppError::NotIdentified
        ));
    }

    #[tokio::test]
    async fn test_corrupt_cache_falls_back_to_identity() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{not json").unwrap();

        let backend = FakeBackend::new();
        backend.respond_ok(Method::GET, IDENTITY_PATH, identity_json());

        let user = SessionStore::new(path).current_user(&backend).await.unwrap();
        assert_eq!(user.email, "ana@mail.test");
    }

    #[tokio::test]
    async fn test_clear_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let backend = FakeBackend::new();
        backend.respond_ok(Method::GET, IDENTITY_PATH, identity_json());

        let store = SessionStore::new(path.clone());
        store.current_user(&backend).await.unwrap();
        assert!(path.exists());

        store.clear().await.unwrap();
        assert!(!path.exists());
        store.clear().await.unwrap();
    }
}
