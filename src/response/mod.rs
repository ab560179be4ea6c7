//! Uniform response envelope returned by every tool call.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::EngineError;
use crate::tools::ToolName;

/// Engine version reported in response metadata.
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result envelope of a tool invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolResponse {
    /// Whether the artifact was accepted.
    pub success: bool,
    /// The tool that produced this response.
    pub tool: ToolName,
    /// Tool-specific projection; present only on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// Processing metadata.
    pub metadata: ResponseMetadata,
    /// Failure description; present only when `success` is false.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

/// Processing metadata attached to every response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMetadata {
    pub tool: ToolName,
    pub processing_time_ms: u64,
    pub version: String,
    pub timestamp: DateTime<Utc>,
    pub request_id: String,
}

/// Error payload of a failed response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Machine-readable code, e.g. `VALIDATION_ERROR`.
    pub code: String,
    /// Human-readable message.
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ResponseMetadata {
    fn new(tool: ToolName, elapsed: Duration) -> Self {
        Self {
            tool,
            processing_time_ms: elapsed.as_millis() as u64,
            version: ENGINE_VERSION.to_string(),
            timestamp: Utc::now(),
            request_id: Uuid::new_v4().to_string(),
        }
    }
}

impl ToolResponse {
    /// Wrap an accepted projection.
    pub fn success(tool: ToolName, data: Value, elapsed: Duration) -> Self {
        Self {
            success: true,
            tool,
            data: Some(data),
            metadata: ResponseMetadata::new(tool, elapsed),
            error: None,
        }
    }

    /// Wrap a rejected call.
    pub fn failure(tool: ToolName, err: &EngineError, elapsed: Duration) -> Self {
        Self {
            success: false,
            tool,
            data: None,
            metadata: ResponseMetadata::new(tool, elapsed),
            error: Some(ErrorBody {
                code: err.code().to_string(),
                message: err.to_string(),
                details: Some(err.details()),
            }),
        }
    }

    /// The error code, if this response is a failure.
    pub fn error_code(&self) -> Option<&str> {
        self.error.as_ref().map(|e| e.code.as_str())
    }
}
