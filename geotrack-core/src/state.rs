//! Tracker lifecycle state machine.
//!
//! Pure state transitions, no I/O: the delivery engine drives this machine
//! and performs listener (un)registration only when a transition actually
//! happened, which is what makes `stop_tracking` idempotent without
//! duplicate unregister side effects.

use serde::{Deserialize, Serialize};

/// Tracker lifecycle state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackerState {
    /// Not tracking, no platform listener registered
    #[default]
    Idle,
    /// Platform listener registered, samples flowing
    Tracking,
}

impl TrackerState {
    pub fn is_tracking(&self) -> bool {
        matches!(self, TrackerState::Tracking)
    }
}

impl std::fmt::Display for TrackerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrackerState::Idle => write!(f, "Idle"),
            TrackerState::Tracking => write!(f, "Tracking"),
        }
    }
}

/// Manages tracker state and transition bookkeeping.
#[derive(Debug, Clone, Default)]
pub struct TrackerLifecycle {
    state: TrackerState,
    /// Number of Idle -> Tracking transitions
    starts: u32,
    /// Number of Tracking -> Idle transitions
    stops: u32,
}

impl TrackerLifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get current state.
    pub fn state(&self) -> TrackerState {
        self.state
    }

    pub fn is_tracking(&self) -> bool {
        self.state.is_tracking()
    }

    /// Number of completed Idle -> Tracking transitions.
    pub fn starts(&self) -> u32 {
        self.starts
    }

    /// Number of completed Tracking -> Idle transitions.
    pub fn stops(&self) -> u32 {
        self.stops
    }

    /// Transition to Tracking.
    ///
    /// Returns `true` if the transition happened, `false` if already
    /// tracking (the caller must not register a second listener).
    pub fn started(&mut self) -> bool {
        if self.state.is_tracking() {
            return false;
        }
        self.state = TrackerState::Tracking;
        self.starts += 1;
        true
    }

    /// Transition to Idle.
    ///
    /// Returns `true` if the transition happened, `false` if already idle
    /// (the caller must not unregister again).
    pub fn stopped(&mut self) -> bool {
        if !self.state.is_tracking() {
            return false;
        }
        self.state = TrackerState::Idle;
        self.stops += 1;
        true
    }
}
