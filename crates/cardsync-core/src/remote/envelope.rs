//! Response envelope decoding

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::util::compact_text;
use crate::wire::lenient;

/// Outcome of one list request, as reported by the server.
///
/// Application-level failures (non-2xx, `success: false`, unreadable body)
/// are carried here rather than returned as errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope<T> {
    pub succeeded: bool,
    pub message: Option<String>,
    pub records: Option<Vec<T>>,
}

impl<T> Envelope<T> {
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            succeeded: false,
            message: Some(message.into()),
            records: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawEnvelope {
    #[serde(deserialize_with = "lenient::flag")]
    success: Option<bool>,
    #[serde(deserialize_with = "lenient::text")]
    message: Option<String>,
    data: Value,
    errors: Value,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: Option<String>,
    message: Option<String>,
}

/// Build an envelope from an HTTP status and the raw response body.
pub fn envelope_from_response<T: DeserializeOwned>(status: StatusCode, body: &str) -> Envelope<T> {
    if !status.is_success() {
        return Envelope::failure(parse_api_error(status, body));
    }

    let raw = match serde_json::from_str::<RawEnvelope>(body) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!("Unreadable response payload: {e}");
            return Envelope::failure(format!(
                "Invalid response payload: {}",
                compact_text(body)
            ));
        }
    };

    let succeeded = raw.success.unwrap_or(false);
    let message = raw.message.or_else(|| joined_errors(&raw.errors));
    let records = decode_records(raw.data);

    Envelope {
        succeeded,
        message,
        records,
    }
}

fn decode_records<T: DeserializeOwned>(data: Value) -> Option<Vec<T>> {
    let items = match data {
        Value::Array(items) => items,
        Value::Null => return None,
        other => {
            tracing::warn!("Ignoring non-list response data: {}", compact_text(&other.to_string()));
            return None;
        }
    };

    let total = items.len();
    let records: Vec<T> = items
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect();

    if records.len() < total {
        tracing::warn!(
            "Dropped {} of {total} records that were not objects",
            total - records.len()
        );
    }
    Some(records)
}

fn joined_errors(errors: &Value) -> Option<String> {
    let Value::Array(items) = errors else {
        return None;
    };
    let parts: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
    (!parts.is_empty()).then(|| parts.join(", "))
}

fn parse_api_error(status: StatusCode, body: &str) -> String {
    if let Ok(payload) = serde_json::from_str::<ApiErrorBody>(body) {
        if let Some(message) = payload.message.or(payload.error) {
            return format!("{} ({})", message.trim(), status.as_u16());
        }
    }

    let trimmed = compact_text(body);
    if trimmed.is_empty() {
        format!("HTTP {}", status.as_u16())
    } else {
        format!("{} ({})", trimmed, status.as_u16())
    }
}
