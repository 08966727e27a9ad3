/// API client: the single point of entry for every call to the WorkHub backend.
///
/// Services never touch `reqwest` directly. They build an `ApiRequest`, hand it
/// to a `Transport`, and decode the `{success, data, message}` envelope through
/// `envelope::decode_data` / `envelope::decode_ack`.
///
/// No retries: a failed call is surfaced to the caller, which re-fetches.
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, Method};
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::errors::AppError;

pub mod envelope;
#[cfg(test)]
pub mod testing;

#[derive(Debug, Clone)]
pub enum RequestBody {
    Empty,
    Json(serde_json::Value),
    Bytes { content_type: String, data: Bytes },
}

/// A backend call, independent of the HTTP library that performs it.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            query: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn post<B: Serialize>(path: impl Into<String>, body: &B) -> Result<Self, AppError> {
        Ok(Self {
            method: Method::POST,
            path: path.into(),
            query: Vec::new(),
            body: RequestBody::Json(to_json(body)?),
        })
    }

    pub fn put<B: Serialize>(path: impl Into<String>, body: &B) -> Result<Self, AppError> {
        Ok(Self {
            method: Method::PUT,
            path: path.into(),
            query: Vec::new(),
            body: RequestBody::Json(to_json(body)?),
        })
    }

    pub fn with_query(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.push((key.to_string(), value.into()));
        self
    }

    /// Value of a query parameter, if set.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn upload(path: impl Into<String>, content_type: impl Into<String>, data: Bytes) -> Self {
        Self {
            method: Method::POST,
            path: path.into(),
            query: Vec::new(),
            body: RequestBody::Bytes {
                content_type: content_type.into(),
                data,
            },
        }
    }
}

fn to_json<B: Serialize>(body: &B) -> Result<serde_json::Value, AppError> {
    serde_json::to_value(body).map_err(|e| AppError::Internal(e.into()))
}

/// Status and body text of a completed call. Decoding happens in `envelope`.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The transport seam. `ApiClient` talks HTTP; tests substitute an in-memory backend.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, AppError>;

    /// Public URL under which the object store serves an uploaded file.
    fn public_object_url(&self, bucket: &str, path: &str) -> String;
}

/// Sends a request and decodes the envelope's `data` as `T`.
pub async fn fetch<T: DeserializeOwned>(
    transport: &dyn Transport,
    request: ApiRequest,
) -> Result<T, AppError> {
    let response = transport.send(request).await?;
    envelope::decode_data(&response)
}

/// Sends a mutation whose payload is irrelevant; only the envelope outcome matters.
pub async fn execute(transport: &dyn Transport, request: ApiRequest) -> Result<(), AppError> {
    let response = transport.send(request).await?;
    envelope::decode_ack(&response)
}

/// HTTP transport for the hosted backend.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    api_key: String,
    access_token: Option<String>,
}

impl ApiClient {
    pub fn new(
        base_url: String,
        api_key: String,
        access_token: Option<String>,
        timeout_secs: u64,
    ) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            access_token,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl Transport for ApiClient {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, AppError> {
        let url = self.url(&request.path);
        debug!("{} {}", request.method, url);

        let bearer = self.access_token.as_deref().unwrap_or(&self.api_key);
        let builder = self
            .client
            .request(request.method.clone(), &url)
            .query(&request.query)
            .header("apikey", &self.api_key)
            .bearer_auth(bearer);

        let builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Bytes { content_type, data } => builder
                .header("content-type", content_type)
                .header("x-upsert", "true")
                .body(data),
        };

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        debug!("{} {} -> {}", request.method, url, status);
        Ok(RawResponse { status, body })
    }

    fn public_object_url(&self, bucket: &str, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{bucket}/{}",
            self.base_url,
            path.trim_start_matches('/')
        )
    }
}
