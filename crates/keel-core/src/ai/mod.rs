//! Analysis provider abstraction
//!
//! One-shot request/response: render a prompt from the current form and
//! metrics, send it to a backend, parse the text payload into an
//! [`AnalysisResult`]. Failures are tagged, never thrown at the user; the
//! caller degrades to the fixed fallback with
//! [`AnalysisOutcome::into_result`].
//!
//! - `AnalysisBackend` trait: the interface a provider implements
//! - `AnalysisClient` enum: concrete wrapper providing Clone dispatch
//! - Backends: [`MessagesBackend`] (HTTP), [`MockBackend`] (tests)

pub mod messages;
mod mock;
pub mod parsing;
pub mod prompt;

pub use messages::MessagesBackend;
pub use mock::MockBackend;
pub use prompt::RenderedPrompt;

use async_trait::async_trait;
use tracing::debug;

use crate::error::Result;
use crate::metrics::DerivedMetrics;
use crate::models::{AnalysisResult, InputRecord};

/// Interface for analysis providers. Send + Sync for use across async
/// tasks.
#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    /// One-shot text completion for a rendered prompt.
    async fn complete(&self, system: Option<&str>, prompt: &str) -> Result<String>;

    /// Check whether the provider is reachable.
    async fn health_check(&self) -> bool;

    /// Model identifier (for logging).
    fn model(&self) -> &str;

    /// Provider host (for logging).
    fn host(&self) -> &str;
}

/// Concrete analysis client enum.
///
/// Provides Clone and compile-time dispatch without Box<dyn> overhead.
#[derive(Clone)]
pub enum AnalysisClient {
    /// Messages-protocol backend (HTTP)
    Messages(MessagesBackend),
    /// Mock backend for testing
    Mock(MockBackend),
}

impl AnalysisClient {
    /// Create a client from `KEEL_ANALYSIS_*` environment variables.
    /// `None` when no provider host is configured.
    pub fn from_env() -> Option<Self> {
        MessagesBackend::from_env().map(AnalysisClient::Messages)
    }

    /// Create a mock client for testing.
    pub fn mock() -> Self {
        AnalysisClient::Mock(MockBackend::new())
    }

    /// Create a new instance with a different model.
    pub fn with_model(&self, model: &str) -> Self {
        match self {
            AnalysisClient::Messages(b) => AnalysisClient::Messages(b.with_model(model)),
            AnalysisClient::Mock(b) => AnalysisClient::Mock(b.clone()),
        }
    }
}

#[async_trait]
impl AnalysisBackend for AnalysisClient {
    async fn complete(&self, system: Option<&str>, prompt: &str) -> Result<String> {
        match self {
            AnalysisClient::Messages(b) => b.complete(system, prompt).await,
            AnalysisClient::Mock(b) => b.complete(system, prompt).await,
        }
    }

    async fn health_check(&self) -> bool {
        match self {
            AnalysisClient::Messages(b) => b.health_check().await,
            AnalysisClient::Mock(b) => b.health_check().await,
        }
    }

    fn model(&self) -> &str {
        match self {
            AnalysisClient::Messages(b) => b.model(),
            AnalysisClient::Mock(b) => b.model(),
        }
    }

    fn host(&self) -> &str {
        match self {
            AnalysisClient::Messages(b) => b.host(),
            AnalysisClient::Mock(b) => b.host(),
        }
    }
}

/// Why an analysis request produced no usable commentary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisFailure {
    /// The request never yielded a payload (network, HTTP status, empty
    /// response).
    Transport(String),
    /// A payload arrived but did not parse as the commentary shape.
    MalformedPayload(String),
}

/// Result of one analysis request: the parsed commentary or a tagged
/// failure. Both transport and parse failures take the same fallback
/// path.
#[derive(Debug, Clone)]
pub enum AnalysisOutcome {
    Parsed(AnalysisResult),
    Failed(AnalysisFailure),
}

impl AnalysisOutcome {
    /// Degrade a failure to the fixed fallback commentary. Total: this is
    /// the "never crash the view" conversion.
    pub fn into_result(self) -> AnalysisResult {
        match self {
            AnalysisOutcome::Parsed(result) => result,
            AnalysisOutcome::Failed(_) => AnalysisResult::unavailable(),
        }
    }
}

/// Run one analysis request: render, send, parse.
pub async fn request_commentary<B: AnalysisBackend + ?Sized>(
    backend: &B,
    form: &InputRecord,
    metrics: &DerivedMetrics,
) -> AnalysisOutcome {
    let prompt = prompt::render(form, metrics);

    debug!(model = %backend.model(), host = %backend.host(), "Requesting commentary");

    let text = match backend.complete(Some(&prompt.system), &prompt.user).await {
        Ok(text) => text,
        Err(e) => return AnalysisOutcome::Failed(AnalysisFailure::Transport(e.to_string())),
    };

    match parsing::parse_analysis(&text) {
        Ok(result) => AnalysisOutcome::Parsed(result),
        Err(e) => AnalysisOutcome::Failed(AnalysisFailure::MalformedPayload(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::ModelConfig;

    fn metrics(form: &InputRecord) -> DerivedMetrics {
        DerivedMetrics::compute(form, &ModelConfig::default())
    }

    #[test]
    fn test_client_mock() {
        let client = AnalysisClient::mock();
        assert_eq!(client.model(), "mock");
        assert_eq!(client.host(), "mock://localhost");
    }

    #[tokio::test]
    async fn test_commentary_parsed() {
        let form = InputRecord::default();
        let outcome = request_commentary(&MockBackend::new(), &form, &metrics(&form)).await;
        match outcome {
            AnalysisOutcome::Parsed(result) => assert!(!result.headline.is_empty()),
            AnalysisOutcome::Failed(f) => panic!("expected parse, got {:?}", f),
        }
    }

    #[tokio::test]
    async fn test_commentary_malformed_payload() {
        let form = InputRecord::default();
        let backend = MockBackend::with_response("Sorry, I can't produce JSON today.");
        let outcome = request_commentary(&backend, &form, &metrics(&form)).await;
        match &outcome {
            AnalysisOutcome::Failed(AnalysisFailure::MalformedPayload(_)) => {}
            other => panic!("expected malformed payload, got {:?}", other),
        }
        assert_eq!(outcome.into_result(), AnalysisResult::unavailable());
    }

    #[tokio::test]
    async fn test_commentary_transport_failure() {
        let form = InputRecord::default();
        let outcome = request_commentary(&MockBackend::failing(), &form, &metrics(&form)).await;
        match &outcome {
            AnalysisOutcome::Failed(AnalysisFailure::Transport(_)) => {}
            other => panic!("expected transport failure, got {:?}", other),
        }
        assert_eq!(outcome.into_result().headline, "Analysis unavailable");
    }
}
