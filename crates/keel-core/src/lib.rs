//! Keel Core Library
//!
//! Shared functionality for the Keel personal finance dashboard:
//! - The input record and snapshot data model
//! - The pure financial model (derived metrics, status checks, projection)
//! - The view state machine and session flow
//! - Single-slot snapshot persistence with pluggable stores
//! - Analysis provider client (Messages protocol) with prompt rendering
//!   and failure-tolerant response parsing

pub mod ai;
pub mod error;
pub mod metrics;
pub mod models;
pub mod session;
pub mod store;
pub mod view;

pub use ai::{
    AnalysisBackend, AnalysisClient, AnalysisFailure, AnalysisOutcome, MessagesBackend,
    MockBackend,
};
pub use error::{Error, Result};
pub use metrics::{coerce, DerivedMetrics, ModelConfig, ProjectionPoint};
pub use models::{
    AnalysisResult, ExpenseFrequency, IncomeFrequency, InputRecord, Insight, InsightKind, Snapshot,
};
pub use session::Session;
pub use store::{FileStore, MemoryStore, SnapshotStore};
pub use view::{initial_view, transition, View, ViewEvent};
