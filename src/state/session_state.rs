//! Presenter session state machine

use serde::{Deserialize, Serialize};

use crate::engine::CountdownState;

/// Control messages delivered to the presenter task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    Start,
    Stop,
    Reset,
}

/// Lifecycle phase of the presenter session.
///
/// `Expired` is terminal: once entered, only a `Reset` command produces a new
/// session, and with an immutable target that session expires again on its
/// first tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresenterPhase {
    Idle,
    Running,
    Expired,
}

/// Session state for tracking the presenter and its latest sample
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    pub phase: PresenterPhase,
    pub last_sample: Option<CountdownState>,
}

impl SessionState {
    /// Create a new idle session state
    pub fn new() -> Self {
        Self {
            phase: PresenterPhase::Idle,
            last_sample: None,
        }
    }

    /// Session that has begun sampling but not yet rendered
    pub fn started() -> Self {
        Self {
            phase: PresenterPhase::Running,
            last_sample: None,
        }
    }

    /// Running session carrying its most recent sample
    pub fn running(sample: CountdownState) -> Self {
        Self {
            phase: PresenterPhase::Running,
            last_sample: Some(sample),
        }
    }

    /// Terminal expired session, clamped to the all-zero sample
    pub fn expired() -> Self {
        Self {
            phase: PresenterPhase::Expired,
            last_sample: Some(CountdownState::expired()),
        }
    }

    /// Check if the session is actively sampling
    pub fn is_running(&self) -> bool {
        self.phase == PresenterPhase::Running
    }

    /// Check if the session has reached its terminal phase
    pub fn is_expired(&self) -> bool {
        self.phase == PresenterPhase::Expired
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
