//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};
use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, watch};
use tracing::{info, warn};

use crate::display::DisplayPanel;
use super::{PresenterPhase, SessionCommand, SessionState};

/// Result of one CTA trigger activation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CtaOutcome {
    /// Notification emitted
    Notified,
    /// Element present but disabled (the event has started)
    Disabled,
    /// No CTA element on the panel
    Missing,
}

/// Main application state shared by the presenter task and the HTTP API
#[derive(Debug)]
pub struct AppState {
    /// The fixed instant the countdown runs toward
    pub target: DateTime<Utc>,
    /// Interval between presenter samples
    pub cadence: Duration,
    /// The display surface sessions bind to
    pub panel: Arc<DisplayPanel>,
    /// Presenter session phase and latest sample
    pub session_state: Arc<Mutex<SessionState>>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// CTA activation counter
    pub cta_activations: Arc<Mutex<u64>>,
    /// Channel carrying control commands to the presenter task
    pub command_tx: broadcast::Sender<SessionCommand>,
    /// Channel for session state updates
    pub session_update_tx: watch::Sender<SessionState>,
    /// Keep the receiver alive to prevent channel closure
    pub _session_update_rx: watch::Receiver<SessionState>,
}

impl AppState {
    /// Create a new AppState around a fixed target instant
    pub fn new(
        target: DateTime<Utc>,
        cadence: Duration,
        panel: Arc<DisplayPanel>,
        port: u16,
        host: String,
    ) -> Self {
        let (command_tx, _) = broadcast::channel(16);
        let (session_update_tx, session_update_rx) = watch::channel(SessionState::new());

        Self {
            target,
            cadence,
            panel,
            session_state: Arc::new(Mutex::new(SessionState::new())),
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            cta_activations: Arc::new(Mutex::new(0)),
            command_tx,
            session_update_tx,
            _session_update_rx: session_update_rx,
        }
    }

    /// Record the most recent externally requested action
    pub fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Send a control command to the presenter task
    pub fn send_command(&self, command: SessionCommand) {
        let action = match command {
            SessionCommand::Start => "start",
            SessionCommand::Stop => "stop",
            SessionCommand::Reset => "reset",
        };
        info!("Dispatching presenter command: {}", action);
        self.record_action(action);

        if let Err(e) = self.command_tx.send(command) {
            warn!("Failed to send presenter command: {}", e);
        }
    }

    /// Replace the session state and notify watchers
    pub fn update_session(&self, session: SessionState) -> Result<(), String> {
        let mut state = self.session_state.lock()
            .map_err(|e| format!("Failed to lock session state: {}", e))?;

        *state = session.clone();
        drop(state);

        // Notify session state watchers
        if let Err(e) = self.session_update_tx.send(session) {
            warn!("Failed to send session update: {}", e);
        }

        Ok(())
    }

    /// Get current session state
    pub fn get_session_state(&self) -> Result<SessionState, String> {
        self.session_state.lock()
            .map(|state| state.clone())
            .map_err(|e| format!("Failed to lock session state: {}", e))
    }

    /// Current session phase, defaulting to Idle when the lock is unavailable
    pub fn current_phase(&self) -> PresenterPhase {
        self.get_session_state()
            .map(|state| state.phase)
            .unwrap_or(PresenterPhase::Idle)
    }

    /// Activate the CTA trigger.
    ///
    /// Emits exactly one notification per activation while the element is
    /// present and enabled; afterwards reports why nothing was emitted.
    pub fn trigger_cta(&self) -> Result<CtaOutcome, String> {
        let Some(cta) = self.panel.cta() else {
            warn!("CTA activation ignored, no CTA element on the panel");
            return Ok(CtaOutcome::Missing);
        };

        if !cta.enabled {
            info!("CTA activation ignored, element is disabled");
            return Ok(CtaOutcome::Disabled);
        }

        let mut activations = self.cta_activations.lock()
            .map_err(|e| format!("Failed to lock CTA counter: {}", e))?;
        *activations += 1;
        let count = *activations;
        drop(activations);

        self.record_action("cta");
        info!("CTA activated ({} total): notification emitted", count);
        Ok(CtaOutcome::Notified)
    }

    /// Total CTA activations since boot
    pub fn cta_activation_count(&self) -> u64 {
        self.cta_activations.lock().map(|count| *count).unwrap_or(0)
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_state(panel: DisplayPanel) -> AppState {
        AppState::new(
            Utc::now() + chrono::Duration::days(1),
            Duration::from_millis(1000),
            Arc::new(panel),
            20580,
            "127.0.0.1".to_string(),
        )
    }

    #[test]
    fn test_trigger_cta_counts_activations() {
        let state = test_state(DisplayPanel::standard());
        assert_eq!(state.trigger_cta().unwrap(), CtaOutcome::Notified);
        assert_eq!(state.trigger_cta().unwrap(), CtaOutcome::Notified);
        assert_eq!(state.cta_activation_count(), 2);
        let (action, time) = state.get_last_action();
        assert_eq!(action.as_deref(), Some("cta"));
        assert!(time.is_some());
    }

    #[test]
    fn test_trigger_cta_when_disabled() {
        let state = test_state(DisplayPanel::standard());
        state.panel.disable_cta("Event Started!").unwrap();
        assert_eq!(state.trigger_cta().unwrap(), CtaOutcome::Disabled);
        assert_eq!(state.cta_activation_count(), 0);
    }

    #[test]
    fn test_trigger_cta_without_element() {
        let state = test_state(DisplayPanel::with_layout(true, false));
        assert_eq!(state.trigger_cta().unwrap(), CtaOutcome::Missing);
    }

    #[test]
    fn test_update_session_notifies_watchers() {
        let state = test_state(DisplayPanel::standard());
        let rx = state.session_update_tx.subscribe();
        state.update_session(SessionState::started()).unwrap();
        assert!(rx.borrow().is_running());
        assert_eq!(state.current_phase(), PresenterPhase::Running);
    }
}
