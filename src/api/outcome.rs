//! Normalized request outcome.
//!
//! Every call through [`ApiClient`](super::client::ApiClient) resolves to an
//! [`Outcome`]: the decoded payload, or an [`ApiError`] classified as either a
//! transport fault (no response) or an application fault (response received,
//! status or body unusable).

use serde_json::Value;
use thiserror::Error;

/// Result of a single API request.
pub type Outcome<T> = Result<T, ApiError>;

/// Why no response was received.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    /// The request or connect timeout elapsed.
    Timeout,
    /// DNS failure or connection refused.
    Connect,
    /// The request could not be built or sent.
    Request,
    /// The response body could not be read to completion.
    Body,
}

/// Top-level error classes callers branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Transport,
    Application,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request failed ({kind:?}): {message}")]
    Transport { kind: TransportKind, message: String },

    #[error("Request failed ({status}){}", message_suffix(.message))]
    Status { status: u16, message: Option<String> },

    /// The server answered but the body did not match the expected schema.
    #[error("Malformed response ({status}): {message}")]
    Malformed { status: u16, message: String },
}

impl ApiError {
    pub fn class(&self) -> ErrorClass {
        match self {
            ApiError::Transport { .. } => ErrorClass::Transport,
            ApiError::Status { .. } | ApiError::Malformed { .. } => ErrorClass::Application,
        }
    }

    /// Transport faults are the only ones worth retrying without inspection.
    pub fn is_transient(&self) -> bool {
        self.class() == ErrorClass::Transport
    }

    /// HTTP status, when a response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Transport { .. } => None,
            ApiError::Status { status, .. } | ApiError::Malformed { status, .. } => Some(*status),
        }
    }

    /// Server-provided (or decode) message, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            ApiError::Transport { message, .. } | ApiError::Malformed { message, .. } => {
                Some(message)
            }
            ApiError::Status { message, .. } => message.as_deref(),
        }
    }

    /// A 401 means the stored token is missing, expired or revoked.
    pub fn requires_reauth(&self) -> bool {
        self.status() == Some(401)
    }

    pub(crate) fn from_reqwest(err: &reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            TransportKind::Timeout
        } else if err.is_connect() {
            TransportKind::Connect
        } else if err.is_body() || err.is_decode() {
            TransportKind::Body
        } else {
            TransportKind::Request
        };
        ApiError::Transport {
            kind,
            message: err.to_string(),
        }
    }

    /// Build a `Status` error from a non-2xx response body.
    pub(crate) fn from_status(status: u16, body: &str) -> Self {
        ApiError::Status {
            status,
            message: extract_message(body),
        }
    }
}

fn message_suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {}", m))
        .unwrap_or_default()
}

/// Pull a human-readable message out of an error body.
///
/// Accepts `{"message": "..."}`, `{"message": ["...", "..."]}` (validation
/// pipes return arrays), `{"error": "..."}`, or a plain-text body.
fn extract_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    let Ok(json) = serde_json::from_str::<Value>(trimmed) else {
        return Some(trimmed.to_string());
    };

    match json.get("message") {
        Some(Value::String(s)) if !s.is_empty() => return Some(s.clone()),
        Some(Value::Array(items)) => {
            let joined: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
            if !joined.is_empty() {
                return Some(joined.join("; "));
            }
        }
        _ => {}
    }

    json.get("error")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_from_json_string() {
        let err = ApiError::from_status(403, r#"{"message":"Forbidden"}"#);
        assert_eq!(err.status(), Some(403));
        assert_eq!(err.message(), Some("Forbidden"));
        assert_eq!(err.class(), ErrorClass::Application);
    }

    #[test]
    fn test_message_from_json_array() {
        let err = ApiError::from_status(
            400,
            r#"{"message":["userName should not be empty","password should not be empty"],"error":"Bad Request"}"#,
        );
        assert_eq!(
            err.message(),
            Some("userName should not be empty; password should not be empty")
        );
    }

    #[test]
    fn test_message_falls_back_to_error_field() {
        let err = ApiError::from_status(500, r#"{"statusCode":500,"error":"Internal"}"#);
        assert_eq!(err.message(), Some("Internal"));
    }

    #[test]
    fn test_message_from_plain_text() {
        let err = ApiError::from_status(502, "  Bad Gateway\n");
        assert_eq!(err.message(), Some("Bad Gateway"));
    }

    #[test]
    fn test_empty_body_has_no_message() {
        let err = ApiError::from_status(404, "");
        assert_eq!(err.message(), None);
        assert_eq!(err.to_string(), "Request failed (404)");
    }

    #[test]
    fn test_reauth_only_for_401() {
        assert!(ApiError::from_status(401, "").requires_reauth());
        assert!(!ApiError::from_status(403, "").requires_reauth());
        let transport = ApiError::Transport {
            kind: TransportKind::Connect,
            message: "refused".to_string(),
        };
        assert!(!transport.requires_reauth());
        assert!(transport.is_transient());
        assert_eq!(transport.status(), None);
    }

    #[test]
    fn test_display_includes_message() {
        let err = ApiError::from_status(403, r#"{"message":"Forbidden"}"#);
        assert_eq!(err.to_string(), "Request failed (403): Forbidden");
    }
}
