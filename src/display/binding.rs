//! One-shot resolution of panel slots for a presenter session

use std::sync::Arc;

use thiserror::Error;
use tracing::warn;

use crate::engine::CountdownState;
use super::panel::{
    DisplayPanel, REQUIRED_SLOTS, SLOT_DAYS, SLOT_HOURS, SLOT_MINUTES, SLOT_SECONDS, SLOT_STATUS,
};

/// Errors surfaced while binding a session to the display panel
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    /// A required output slot is absent; the session cannot render
    #[error("required display slot '{0}' is missing from the panel")]
    MissingSurfaceElement(String),
    /// The CTA element is absent; reported once, sessions render without it
    #[error("CTA element is missing from the panel, no trigger will be wired")]
    MissingTriggerElement,
}

/// Format a countdown field as left-zero-padded two-digit decimal.
///
/// Values of 100 and above render at natural width, so large day counts are
/// never truncated.
pub fn format_field(value: u64) -> String {
    format!("{:02}", value)
}

/// Resolved handles into the display panel for one session.
///
/// All slot lookups happen once, here; tick rendering only writes through the
/// handles it was given.
#[derive(Debug, Clone)]
pub struct SurfaceBinding {
    panel: Arc<DisplayPanel>,
    status_bound: bool,
    cta_bound: bool,
}

impl SurfaceBinding {
    /// Resolve all required and optional slots against the panel.
    ///
    /// Fails with [`BindError::MissingSurfaceElement`] if any of the four
    /// numeric slots is absent. Absent optional elements are reported as
    /// diagnostics and left unbound.
    pub fn resolve(panel: &Arc<DisplayPanel>) -> Result<Self, BindError> {
        for id in REQUIRED_SLOTS {
            if !panel.has_slot(id) {
                return Err(BindError::MissingSurfaceElement(id.to_string()));
            }
        }

        let status_bound = panel.has_slot(SLOT_STATUS);
        if !status_bound {
            warn!("Status slot absent, terminal status will not be shown");
        }

        let cta_bound = panel.cta().is_some();
        if !cta_bound {
            warn!("{}", BindError::MissingTriggerElement);
        }

        Ok(Self {
            panel: Arc::clone(panel),
            status_bound,
            cta_bound,
        })
    }

    /// Whether the optional status slot was present at bind time
    pub fn has_status(&self) -> bool {
        self.status_bound
    }

    /// Whether the CTA element was present at bind time
    pub fn has_cta(&self) -> bool {
        self.cta_bound
    }

    /// Write one sample into the four numeric slots
    pub fn write_fields(&self, state: &CountdownState) -> Result<(), String> {
        self.panel.set_text(SLOT_DAYS, &format_field(state.days))?;
        self.panel.set_text(SLOT_HOURS, &format_field(u64::from(state.hours)))?;
        self.panel.set_text(SLOT_MINUTES, &format_field(u64::from(state.minutes)))?;
        self.panel.set_text(SLOT_SECONDS, &format_field(u64::from(state.seconds)))?;
        Ok(())
    }

    /// Write the status slot if one was bound
    pub fn write_status(&self, text: &str) -> Result<(), String> {
        if self.status_bound {
            self.panel.set_text(SLOT_STATUS, text)?;
        }
        Ok(())
    }

    /// Disable and relabel the CTA element if one was bound
    pub fn disable_cta(&self, label: &str) -> Result<(), String> {
        if self.cta_bound {
            self.panel.disable_cta(label)?;
        }
        Ok(())
    }
}
