//! The `{success, data, message}` response envelope every backend call returns.
//!
//! Decoding is strict: a body that is not an envelope, or an envelope whose
//! `data` does not match the expected shape, is an `AppError::Decode`. A
//! non-2xx status or `success: false` is an `AppError::Backend`.

use serde::{de::DeserializeOwned, Deserialize};

use crate::api_client::RawResponse;
use crate::errors::AppError;

#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Decodes the envelope and returns its `data`, which must be present.
pub fn decode_data<T: DeserializeOwned>(response: &RawResponse) -> Result<T, AppError> {
    let envelope = checked_envelope(response)?;
    let data = envelope
        .data
        .ok_or_else(|| AppError::Decode("envelope has no data".to_string()))?;

    serde_json::from_value(data).map_err(|e| AppError::Decode(e.to_string()))
}

/// Like `decode_data`, but a missing or null `data` is `Ok(None)`.
pub fn decode_optional<T: DeserializeOwned>(response: &RawResponse) -> Result<Option<T>, AppError> {
    match checked_envelope(response)?.data {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(data) => serde_json::from_value(data)
            .map(Some)
            .map_err(|e| AppError::Decode(e.to_string())),
    }
}

/// Decodes the envelope and only checks that the call succeeded.
pub fn decode_ack(response: &RawResponse) -> Result<(), AppError> {
    checked_envelope(response).map(|_| ())
}

fn checked_envelope(response: &RawResponse) -> Result<Envelope<serde_json::Value>, AppError> {
    let parsed = serde_json::from_str::<Envelope<serde_json::Value>>(&response.body);

    if !response.is_success() {
        let message = match parsed {
            Ok(envelope) => envelope.message.unwrap_or_default(),
            Err(_) => response.body.trim().to_string(),
        };
        return Err(AppError::Backend {
            status: response.status,
            message,
        });
    }

    let envelope = parsed.map_err(|e| AppError::Decode(e.to_string()))?;
    if !envelope.success {
        return Err(AppError::Backend {
            status: response.status,
            message: envelope.message.unwrap_or_default(),
        });
    }

    Ok(envelope)
}
