//! View state machine
//!
//! The original flow was conditional rendering keyed by a single state
//! variable; here it is an explicit enumerated state with a pure
//! transition function, decoupled from rendering. Transitions are
//! user-driven and unconditional; unmatched (state, event) pairs are
//! no-ops.

use std::fmt;

use crate::models::Snapshot;

/// Which screen the session is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Landing,
    Philosophy,
    Setup,
    Dashboard,
}

impl View {
    pub fn as_str(&self) -> &'static str {
        match self {
            View::Landing => "landing",
            View::Philosophy => "philosophy",
            View::Setup => "setup",
            View::Dashboard => "dashboard",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// User-triggered navigation events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewEvent {
    /// Move forward through the linear wizard.
    Advance,
    /// Return from the dashboard to edit the form.
    Edit,
    /// Full reset back to the landing screen.
    Reset,
}

/// Map (current state, event) to the next state. Pure; no guards beyond
/// the pairs listed. The flow is cyclic by user choice, never terminal.
pub fn transition(current: View, event: ViewEvent) -> View {
    match (current, event) {
        (_, ViewEvent::Reset) => View::Landing,
        (View::Landing, ViewEvent::Advance) => View::Philosophy,
        (View::Philosophy, ViewEvent::Advance) => View::Setup,
        (View::Setup, ViewEvent::Advance) => View::Dashboard,
        (View::Dashboard, ViewEvent::Edit) => View::Setup,
        (state, _) => state,
    }
}

/// Restored-session shortcut: a persisted record with a non-empty name
/// lands straight on the dashboard.
pub fn initial_view(snapshot: Option<&Snapshot>) -> View {
    match snapshot {
        Some(s) if s.form.has_profile() => View::Dashboard,
        _ => View::Landing,
    }
}
