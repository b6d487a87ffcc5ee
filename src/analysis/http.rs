//! HTTP analysis client.
//!
//! One `POST {base_url}/api/analyze` per call. The body is decoded as JSON
//! before the status is looked at, so a non-JSON error page surfaces as
//! `AnalysisError::Parse` regardless of status.

use async_trait::async_trait;
use log::{debug, info, warn};

use crate::analysis::client::{ANALYZE_PATH, AnalysisClient, AnalysisError, AnalysisResponse};
use crate::core::mood::RequestPayload;

pub struct HttpAnalysisClient {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpAnalysisClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            endpoint: endpoint_url(base_url),
            client: reqwest::Client::new(),
        }
    }
}

/// Joins the fixed analysis path onto a base URL, tolerating a trailing slash.
pub fn endpoint_url(base_url: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), ANALYZE_PATH)
}

#[async_trait]
impl AnalysisClient for HttpAnalysisClient {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn analyze(&self, payload: &RequestPayload) -> Result<String, AnalysisError> {
        info!(
            "Analysis request: date={:?}, mood={}, journal_len={}",
            payload.date,
            payload.mood,
            payload.journal.len()
        );

        // .json() sets Content-Type: application/json
        let response = self
            .client
            .post(&self.endpoint)
            .json(payload)
            .send()
            .await
            .map_err(|e| AnalysisError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        debug!("Analysis response status: {}", status);

        let body = response
            .text()
            .await
            .map_err(|e| AnalysisError::Network(e.to_string()))?;

        let decoded: AnalysisResponse = serde_json::from_str(&body).map_err(|e| {
            warn!("Undecodable analysis response (HTTP {}): {}", status, body);
            AnalysisError::Parse(e.to_string())
        })?;

        let result = decoded.into_result(status);
        match &result {
            Ok(text) => info!("Analysis received: {} bytes", text.len()),
            Err(e) => warn!("Analysis failed: {}", e),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_url_joins_path() {
        assert_eq!(
            endpoint_url("http://localhost:3000"),
            "http://localhost:3000/api/analyze"
        );
    }

    #[test]
    fn test_endpoint_url_strips_trailing_slash() {
        assert_eq!(
            endpoint_url("https://diary.example.com/"),
            "https://diary.example.com/api/analyze"
        );
    }

    #[test]
    fn test_client_reports_endpoint() {
        let client = HttpAnalysisClient::new("http://127.0.0.1:9");
        assert_eq!(client.endpoint(), "http://127.0.0.1:9/api/analyze");
    }
}
