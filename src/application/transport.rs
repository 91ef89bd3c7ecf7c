// Transport trait for backend select calls
use crate::domain::envelope::{Envelope, SelectRequest};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::time::Duration;
use thiserror::Error;

/// Everything needed to issue one select call, fully resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundRequest {
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub body: SelectRequest,
    pub timeout: Duration,
}

/// Transport-level failures. Every variant triggers fallback substitution.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request timed out after {0} ms")]
    Timeout(u128),

    #[error("server responded with HTTP {0}")]
    Status(u16),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("invalid response body: {0}")]
    Decode(String),
}

#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue the request and decode the response envelope
    async fn post_select(&self, request: &OutboundRequest) -> Result<Envelope, FetchError>;
}
