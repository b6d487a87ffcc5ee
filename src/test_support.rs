//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use async_trait::async_trait;

use crate::analysis::{AnalysisClient, AnalysisError};
use crate::core::mood::RequestPayload;

/// A client that answers every request with a fixed result and counts calls.
pub struct StubClient {
    pub reply: Result<String, AnalysisError>,
    pub calls: AtomicUsize,
}

impl StubClient {
    pub fn replying(reply: Result<String, AnalysisError>) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AnalysisClient for StubClient {
    fn endpoint(&self) -> &str {
        "stub://analyze"
    }

    async fn analyze(&self, _payload: &RequestPayload) -> Result<String, AnalysisError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply.clone()
    }
}

/// Creates a test App backed by a StubClient that always succeeds.
pub fn test_app() -> crate::core::state::App {
    crate::core::state::App::new(Arc::new(StubClient::replying(Ok("stub analysis".to_string()))))
}
