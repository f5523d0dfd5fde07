//! Countdown engine module
//!
//! This module contains the pure countdown math shared by the presenter and API.

pub mod countdown;

// Re-export main types
pub use countdown::{remaining, CountdownState};
