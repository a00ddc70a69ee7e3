//! Mock backend for testing
//!
//! Returns a configurable canned payload for the analysis request.
//! Useful for unit tests and development without a reachable provider.

use async_trait::async_trait;

use crate::error::{Error, Result};

use super::AnalysisBackend;

/// Canned response the default mock returns: a valid commentary, fenced
/// the way models tend to fence it.
const DEFAULT_RESPONSE: &str = r#"```json
{
  "headline": "You're running a healthy surplus",
  "insights": [
    {"title": "Savings rate above target", "body": "Keeping more than a fifth of income is the engine of everything else.", "type": "celebrate"},
    {"title": "Cash buffer is thin", "body": "One bad month would take you under your floor.", "type": "warning"},
    {"title": "Surplus is idle", "body": "The unallocated part of your surplus could be invested automatically.", "type": "opportunity"}
  ],
  "oneMove": "Set up an automatic monthly transfer of your surplus into the ETF account."
}
```"#;

/// Mock analysis backend.
#[derive(Clone)]
pub struct MockBackend {
    response: String,
    fail: bool,
    healthy: bool,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBackend {
    /// Healthy mock returning a valid fenced commentary.
    pub fn new() -> Self {
        Self {
            response: DEFAULT_RESPONSE.to_string(),
            fail: false,
            healthy: true,
        }
    }

    /// Mock returning a specific payload.
    pub fn with_response(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            fail: false,
            healthy: true,
        }
    }

    /// Mock whose requests fail at the transport level.
    pub fn failing() -> Self {
        Self {
            response: String::new(),
            fail: true,
            healthy: false,
        }
    }

    /// Healthy flag off, requests still succeed.
    pub fn unhealthy(mut self) -> Self {
        self.healthy = false;
        self
    }
}

#[async_trait]
impl AnalysisBackend for MockBackend {
    async fn complete(&self, _system: Option<&str>, _prompt: &str) -> Result<String> {
        if self.fail {
            return Err(Error::InvalidData("mock transport failure".into()));
        }
        Ok(self.response.clone())
    }

    async fn health_check(&self) -> bool {
        self.healthy
    }

    fn model(&self) -> &str {
        "mock"
    }

    fn host(&self) -> &str {
        "mock://localhost"
    }
}
