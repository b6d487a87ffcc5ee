use std::fmt;

use async_trait::async_trait;
use serde::Deserialize;

use crate::core::mood::RequestPayload;

/// Path of the analysis endpoint, joined onto the configured base URL.
pub const ANALYZE_PATH: &str = "/api/analyze";

/// Reason used when a failed response carries no `error` message.
pub const DEFAULT_FAILURE_REASON: &str = "Analysis failed";

/// Errors that can end a submit cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// The form failed its local check (empty journal). No request was made.
    Validation(String),
    /// The backend answered with a non-2xx status.
    Api { status: u16, message: String },
    /// The request could not complete (DNS, connection refused, reset).
    Network(String),
    /// The response body was not the expected JSON.
    Parse(String),
}

impl AnalysisError {
    /// Short category name for logs and the status line.
    pub fn kind(&self) -> &'static str {
        match self {
            AnalysisError::Validation(_) => "validation",
            AnalysisError::Api { .. } => "application",
            AnalysisError::Network(_) => "transport",
            AnalysisError::Parse(_) => "transport",
        }
    }
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisError::Validation(msg) => write!(f, "validation error: {msg}"),
            AnalysisError::Api { status, message } => {
                write!(f, "analysis API error (HTTP {status}): {message}")
            }
            AnalysisError::Network(msg) => write!(f, "network error: {msg}"),
            AnalysisError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for AnalysisError {}

/// Response body of `POST /api/analyze`. Both shapes share one struct so a
/// body can be decoded before the status is inspected.
#[derive(Debug, Default, Deserialize)]
pub struct AnalysisResponse {
    #[serde(default)]
    pub analysis: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl AnalysisResponse {
    /// Interprets a decoded body according to the HTTP status.
    pub fn into_result(self, status: u16) -> Result<String, AnalysisError> {
        if (200..300).contains(&status) {
            // A 2xx without `analysis` shows the apology rather than a blank panel
            self.analysis.ok_or_else(|| {
                AnalysisError::Parse("success response has no 'analysis' field".to_string())
            })
        } else {
            Err(AnalysisError::Api {
                status,
                message: self
                    .error
                    .filter(|e| !e.is_empty())
                    .unwrap_or_else(|| DEFAULT_FAILURE_REASON.to_string()),
            })
        }
    }
}

#[async_trait]
pub trait AnalysisClient: Send + Sync {
    /// Where requests go, for the status line and logs.
    fn endpoint(&self) -> &str;

    /// Sends one analysis request and returns the analysis text.
    async fn analyze(&self, payload: &RequestPayload) -> Result<String, AnalysisError>;
}
