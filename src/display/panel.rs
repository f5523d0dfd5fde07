//! Named-slot display panel

use std::{
    collections::HashMap,
    sync::Mutex,
};
use serde::{Deserialize, Serialize};

/// Slot holding the rendered day count
pub const SLOT_DAYS: &str = "days";
/// Slot holding the rendered hour count
pub const SLOT_HOURS: &str = "hours";
/// Slot holding the rendered minute count
pub const SLOT_MINUTES: &str = "minutes";
/// Slot holding the rendered second count
pub const SLOT_SECONDS: &str = "seconds";
/// Optional slot for the terminal status text
pub const SLOT_STATUS: &str = "status";

/// The four slots a presenter session cannot run without
pub const REQUIRED_SLOTS: [&str; 4] = [SLOT_DAYS, SLOT_HOURS, SLOT_MINUTES, SLOT_SECONDS];

/// Placeholder text slots carry before the first render
const PLACEHOLDER: &str = "--";

/// Default label on the call-to-action element
pub const DEFAULT_CTA_LABEL: &str = "Notify Me";

/// Call-to-action element with disable/relabel capability
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CtaElement {
    pub label: String,
    pub enabled: bool,
}

/// The display surface: named text slots plus an optional CTA element.
///
/// Writes are textual, idempotent overwrites; readers (the status endpoint,
/// the console view) only ever see whole slot values.
#[derive(Debug)]
pub struct DisplayPanel {
    slots: Mutex<HashMap<String, String>>,
    cta: Mutex<Option<CtaElement>>,
}

impl DisplayPanel {
    /// Create a panel with no slots at all
    pub fn empty() -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
            cta: Mutex::new(None),
        }
    }

    /// Create the standard panel: four numeric slots, status slot, CTA element
    pub fn standard() -> Self {
        Self::with_layout(true, true)
    }

    /// Create a panel, optionally omitting the status slot and CTA element
    pub fn with_layout(include_status: bool, include_cta: bool) -> Self {
        let panel = Self::empty();
        for id in REQUIRED_SLOTS {
            panel.add_slot(id);
        }
        if include_status {
            panel.add_slot(SLOT_STATUS);
        }
        if include_cta {
            panel.install_cta(DEFAULT_CTA_LABEL);
        }
        panel
    }

    /// Add a named slot with placeholder content
    pub fn add_slot(&self, id: &str) {
        if let Ok(mut slots) = self.slots.lock() {
            slots.entry(id.to_string()).or_insert_with(|| PLACEHOLDER.to_string());
        }
    }

    /// Check whether a named slot exists
    pub fn has_slot(&self, id: &str) -> bool {
        self.slots.lock().map(|slots| slots.contains_key(id)).unwrap_or(false)
    }

    /// Overwrite a slot's text; fails if the slot does not exist
    pub fn set_text(&self, id: &str, text: &str) -> Result<(), String> {
        let mut slots = self.slots.lock()
            .map_err(|e| format!("Failed to lock panel slots: {}", e))?;

        match slots.get_mut(id) {
            Some(slot) => {
                *slot = text.to_string();
                Ok(())
            }
            None => Err(format!("No slot named '{}' in panel", id)),
        }
    }

    /// Read a slot's current text
    pub fn text(&self, id: &str) -> Option<String> {
        self.slots.lock().ok().and_then(|slots| slots.get(id).cloned())
    }

    /// Snapshot all slot contents, for status reporting
    pub fn snapshot(&self) -> HashMap<String, String> {
        self.slots.lock().map(|slots| slots.clone()).unwrap_or_default()
    }

    /// Install an enabled CTA element with the given label
    pub fn install_cta(&self, label: &str) {
        if let Ok(mut cta) = self.cta.lock() {
            *cta = Some(CtaElement {
                label: label.to_string(),
                enabled: true,
            });
        }
    }

    /// Current CTA element, if the panel carries one
    pub fn cta(&self) -> Option<CtaElement> {
        self.cta.lock().ok().and_then(|cta| cta.clone())
    }

    /// Check whether the CTA element exists and is enabled
    pub fn cta_enabled(&self) -> bool {
        self.cta().map(|cta| cta.enabled).unwrap_or(false)
    }

    /// Disable the CTA element and replace its label.
    ///
    /// Returns false if the panel has no CTA element.
    pub fn disable_cta(&self, label: &str) -> Result<bool, String> {
        let mut cta = self.cta.lock()
            .map_err(|e| format!("Failed to lock CTA element: {}", e))?;

        match cta.as_mut() {
            Some(element) => {
                element.enabled = false;
                element.label = label.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
