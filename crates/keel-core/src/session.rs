//! View session: state, edits, persistence gating, analysis merge
//!
//! The session owns the form, the optional commentary, and the current
//! view, and writes through an injected [`SnapshotStore`]. Persistence is
//! enabled only while on the dashboard and only after restore completed,
//! so a fresh default record is never written back over a stored one
//! mid-restore. Writes are fire-and-forget: a failed store is logged and
//! the session carries on with the prior slot intact.

use tracing::warn;

use crate::ai::{self, AnalysisBackend, AnalysisFailure, AnalysisOutcome};
use crate::error::{Error, Result};
use crate::metrics::{DerivedMetrics, ModelConfig};
use crate::models::{AnalysisResult, InputRecord, Snapshot};
use crate::store::SnapshotStore;
use crate::view::{initial_view, transition, View, ViewEvent};

/// A single-user view session over one snapshot slot.
pub struct Session<S: SnapshotStore> {
    store: S,
    view: View,
    form: InputRecord,
    analysis: Option<AnalysisResult>,
    config: ModelConfig,
    analysis_in_flight: bool,
}

impl<S: SnapshotStore> Session<S> {
    /// Restore a session from the store. An absent or corrupt slot
    /// starts a fresh session on the landing screen.
    pub fn restore(store: S) -> Self {
        let snapshot = store.load();
        let view = initial_view(snapshot.as_ref());
        let (form, analysis) = match snapshot {
            Some(s) => (s.form, s.analysis),
            None => (InputRecord::default(), None),
        };

        Self {
            store,
            view,
            form,
            analysis,
            config: ModelConfig::default(),
            analysis_in_flight: false,
        }
    }

    pub fn with_config(mut self, config: ModelConfig) -> Self {
        self.config = config;
        self
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn form(&self) -> &InputRecord {
        &self.form
    }

    pub fn analysis(&self) -> Option<&AnalysisResult> {
        self.analysis.as_ref()
    }

    /// Derived metrics for the current form. Recomputed on every call;
    /// the model is cheap enough that caching would buy nothing.
    pub fn metrics(&self) -> DerivedMetrics {
        DerivedMetrics::compute(&self.form, &self.config)
    }

    /// Current combined state as a snapshot.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            form: self.form.clone(),
            analysis: self.analysis.clone(),
        }
    }

    /// Apply a navigation event. Reset additionally clears the slot and
    /// zeroes all session state.
    pub fn apply(&mut self, event: ViewEvent) {
        if event == ViewEvent::Reset {
            if let Err(e) = self.store.clear() {
                warn!(error = %e, "Failed to clear snapshot on reset");
            }
            self.form = InputRecord::default();
            self.analysis = None;
        }

        self.view = transition(self.view, event);
        self.persist();
    }

    /// Mutate the form. Persists when the dashboard has been reached.
    pub fn edit(&mut self, apply: impl FnOnce(&mut InputRecord)) {
        apply(&mut self.form);
        self.persist();
    }

    /// Request commentary from the analysis provider and merge the
    /// outcome into session state. On any failure the fixed fallback is
    /// merged instead; the tagged failure is returned for callers that
    /// want to report it. Only one request may be outstanding at a time.
    pub async fn request_analysis<B: AnalysisBackend + ?Sized>(
        &mut self,
        backend: &B,
    ) -> Result<Option<AnalysisFailure>> {
        if self.analysis_in_flight {
            return Err(Error::AnalysisInFlight);
        }
        self.analysis_in_flight = true;

        let metrics = self.metrics();
        let outcome = ai::request_commentary(backend, &self.form, &metrics).await;
        self.analysis_in_flight = false;

        let failure = match outcome {
            AnalysisOutcome::Parsed(result) => {
                self.analysis = Some(result);
                None
            }
            AnalysisOutcome::Failed(failure) => {
                warn!(failure = ?failure, "Analysis failed, using fallback commentary");
                self.analysis = Some(AnalysisResult::unavailable());
                Some(failure)
            }
        };

        self.persist();
        Ok(failure)
    }

    /// Whether a request is currently outstanding. The trigger control
    /// should be disabled while this is true.
    pub fn analysis_in_flight(&self) -> bool {
        self.analysis_in_flight
    }

    fn persist_enabled(&self) -> bool {
        self.view == View::Dashboard
    }

    fn persist(&self) {
        if !self.persist_enabled() {
            return;
        }
        if let Err(e) = self.store.store(&self.snapshot()) {
            warn!(error = %e, "Failed to persist snapshot");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::MockBackend;
    use crate::store::MemoryStore;

    fn dashboard_session(store: MemoryStore) -> Session<MemoryStore> {
        let mut session = Session::restore(store);
        session.apply(ViewEvent::Advance); // philosophy
        session.apply(ViewEvent::Advance); // setup
        session.edit(|form| form.name = "Sam".to_string());
        session.apply(ViewEvent::Advance); // dashboard
        session
    }

    #[test]
    fn test_fresh_session_starts_on_landing() {
        let session = Session::restore(MemoryStore::new());
        assert_eq!(session.view(), View::Landing);
        assert!(session.analysis().is_none());
    }

    #[test]
    fn test_edits_before_dashboard_do_not_persist() {
        let store = MemoryStore::new();
        let mut session = Session::restore(store.clone());
        session.apply(ViewEvent::Advance);
        session.apply(ViewEvent::Advance);
        session.edit(|form| form.name = "Sam".to_string());

        // Still in setup: nothing written yet
        assert!(store.load().is_none());

        session.apply(ViewEvent::Advance);
        assert_eq!(store.load().unwrap().form.name, "Sam");
    }

    #[test]
    fn test_edits_on_dashboard_persist() {
        let store = MemoryStore::new();
        let mut session = dashboard_session(store.clone());

        session.edit(|form| form.cash = "15000".to_string());
        assert_eq!(store.load().unwrap().form.cash, "15000");
    }

    #[test]
    fn test_restored_session_shortcut() {
        let store = MemoryStore::new();
        drop(dashboard_session(store.clone()));

        let session = Session::restore(store);
        assert_eq!(session.view(), View::Dashboard);
        assert_eq!(session.form().name, "Sam");
    }

    #[test]
    fn test_edit_round_trip_via_setup() {
        let store = MemoryStore::new();
        let mut session = dashboard_session(store.clone());

        session.apply(ViewEvent::Edit);
        assert_eq!(session.view(), View::Setup);
        session.edit(|form| form.income = "140000".to_string());
        session.apply(ViewEvent::Advance);

        assert_eq!(store.load().unwrap().form.income, "140000");
    }

    #[test]
    fn test_reset_clears_everything() {
        let store = MemoryStore::new();
        let mut session = dashboard_session(store.clone());

        session.apply(ViewEvent::Reset);
        assert_eq!(session.view(), View::Landing);
        assert!(!session.form().has_profile());
        assert!(session.analysis().is_none());
        assert!(store.load().is_none());
    }

    #[tokio::test]
    async fn test_analysis_merge_and_persist() {
        let store = MemoryStore::new();
        let mut session = dashboard_session(store.clone());

        let failure = session.request_analysis(&MockBackend::new()).await.unwrap();
        assert!(failure.is_none());
        assert!(session.analysis().is_some());
        assert!(store.load().unwrap().analysis.is_some());
        assert!(!session.analysis_in_flight());
    }

    #[tokio::test]
    async fn test_analysis_fallback_on_malformed() {
        let store = MemoryStore::new();
        let mut session = dashboard_session(store.clone());

        let backend = MockBackend::with_response("no json here");
        let failure = session.request_analysis(&backend).await.unwrap();
        assert!(matches!(failure, Some(AnalysisFailure::MalformedPayload(_))));
        assert_eq!(session.analysis().unwrap().headline, "Analysis unavailable");
    }

    #[tokio::test]
    async fn test_analysis_replaced_by_later_call() {
        let store = MemoryStore::new();
        let mut session = dashboard_session(store.clone());

        session.request_analysis(&MockBackend::failing()).await.unwrap();
        assert_eq!(session.analysis().unwrap().headline, "Analysis unavailable");

        session.request_analysis(&MockBackend::new()).await.unwrap();
        assert_ne!(session.analysis().unwrap().headline, "Analysis unavailable");
    }
}
