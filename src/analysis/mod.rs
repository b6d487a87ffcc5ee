pub mod client;
pub mod http;

pub use client::{
    ANALYZE_PATH, AnalysisClient, AnalysisError, AnalysisResponse, DEFAULT_FAILURE_REASON,
};
pub use http::HttpAnalysisClient;
