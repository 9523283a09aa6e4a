//! PAPI error envelope.
//!
//! Failed requests come back as `{"errors": [{"code": ..., "field": ..., "message": ...}]}`.
//! In practice the list holds a single entry, but the wire format allows several.

use std::fmt;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

/// One entry of the PAPI error list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEntry {
    #[serde(default)]
    pub code: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub field: String,
    #[serde(default)]
    pub message: String,
}

impl ErrorEntry {
    pub fn with_message(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            field: String::new(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    errors: Vec<ErrorEntry>,
}

/// A non-2xx reply from the cluster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// HTTP status code of the reply.
    pub status_code: u16,
    /// Decoded error list; never empty.
    pub errors: Vec<ErrorEntry>,
}

impl ApiError {
    /// Build an error, filling in the status line when the cluster gave no message.
    pub fn new(status_code: u16, mut errors: Vec<ErrorEntry>) -> Self {
        if errors.is_empty() {
            errors.push(ErrorEntry::default());
        }
        if errors[0].message.is_empty() {
            errors[0].message = status_line(status_code);
        }
        Self {
            status_code,
            errors,
        }
    }

    /// Decode an error reply body. Bodies that are not a PAPI envelope still
    /// produce an error carrying the status.
    pub fn from_body(status_code: u16, body: &str) -> Self {
        let envelope: ErrorEnvelope = serde_json::from_str(body).unwrap_or_default();
        Self::new(status_code, envelope.errors)
    }

    /// First reported message.
    pub fn message(&self) -> &str {
        self.errors
            .first()
            .map(|e| e.message.as_str())
            .unwrap_or_default()
    }

    /// First reported error code, e.g. `AEC_NOT_FOUND`.
    pub fn code(&self) -> &str {
        self.errors
            .first()
            .map(|e| e.code.as_str())
            .unwrap_or_default()
    }

    pub fn is_not_found(&self) -> bool {
        self.status_code == StatusCode::NOT_FOUND.as_u16()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for ApiError {}

fn status_line(status_code: u16) -> String {
    match StatusCode::from_u16(status_code)
        .ok()
        .and_then(|s| s.canonical_reason())
    {
        Some(reason) => format!("{} {}", status_code, reason),
        None => status_code.to_string(),
    }
}
