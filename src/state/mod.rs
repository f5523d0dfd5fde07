//! State management module
//!
//! This module contains all state-related structures and their management logic.

pub mod app_state;
pub mod session_state;

// Re-export main types
pub use app_state::{AppState, CtaOutcome};
pub use session_state::{PresenterPhase, SessionCommand, SessionState};
