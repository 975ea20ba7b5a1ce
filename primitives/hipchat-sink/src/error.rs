//! Error types for HipChat operations.

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur while talking to HipChat.
#[derive(Error, Debug)]
pub enum ChatError {
    /// Network/HTTP error.
    #[error("HipChat request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// HipChat rejected the call with a structured error.
    #[error("HipChat API error {code} ({kind}): {message}")]
    Api {
        code: u16,
        kind: String,
        message: String,
    },

    /// Non-success status without a recognisable error body.
    #[error("HipChat returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// JSON deserialization error.
    #[error("Failed to decode HipChat response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Result type for HipChat operations.
pub type Result<T> = std::result::Result<T, ChatError>;

/// `{"error": {...}}` body sent with failing v1 responses.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: u16,
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    message: String,
}

impl ChatError {
    /// Classify a failing response.
    pub(crate) fn from_response(status: reqwest::StatusCode, body: String) -> Self {
        match serde_json::from_str::<ErrorEnvelope>(&body) {
            Ok(ErrorEnvelope { error }) => ChatError::Api {
                code: error.code,
                kind: error.kind,
                message: error.message,
            },
            Err(_) => ChatError::Status { status, body },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn structured_error_body_becomes_api_error() {
        let body = r#"{"error":{"code":401,"type":"Unauthorized","message":"Auth token invalid."}}"#;
        let err = ChatError::from_response(StatusCode::UNAUTHORIZED, body.to_string());
        assert_eq!(
            err.to_string(),
            "HipChat API error 401 (Unauthorized): Auth token invalid."
        );
    }

    #[test]
    fn unstructured_body_keeps_status() {
        let err = ChatError::from_response(StatusCode::BAD_GATEWAY, "upstream down".into());
        assert!(matches!(
            err,
            ChatError::Status { status, .. } if status == StatusCode::BAD_GATEWAY
        ));
    }
}
