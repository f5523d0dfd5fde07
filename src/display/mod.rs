//! Display surface module
//!
//! This module contains the named-slot display panel the presenter renders
//! into, and the one-shot binding step that resolves slots at session start.

pub mod binding;
pub mod panel;

// Re-export main types
pub use binding::{format_field, BindError, SurfaceBinding};
pub use panel::{CtaElement, DisplayPanel};
