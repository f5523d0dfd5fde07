//! Periodic presenter background task

use std::{sync::Arc, time::Duration};
use chrono::{DateTime, Utc};
use tokio::sync::broadcast;
use tokio::time::{interval, sleep};
use tracing::{debug, error, info};

use crate::{
    display::SurfaceBinding,
    engine::remaining,
    state::{AppState, PresenterPhase, SessionCommand, SessionState},
};

/// Terminal status text shown once the target instant has passed
pub const EXPIRED_STATUS: &str = "Event Started!";

/// Outcome of one sample-and-render pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// A non-expired sample was rendered into the numeric slots
    Rendered,
    /// The first expired sample was rendered; the session is now terminal
    Expired,
    /// The session was already expired, nothing was written
    Frozen,
}

/// How a presenter session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionEnd {
    Stopped,
    Expired,
    Degraded,
    Restart,
}

/// Background task that runs presenter sessions in response to control commands.
///
/// The receiver must be subscribed before any command is sent, so callers pass
/// it in rather than letting the task subscribe after spawn.
pub async fn presenter_task(
    state: Arc<AppState>,
    mut command_rx: broadcast::Receiver<SessionCommand>,
) {
    info!("Starting presenter task");

    loop {
        match command_rx.recv().await {
            Ok(command) => {
                let phase = state.current_phase();
                debug!("Presenter received {:?} in phase {:?}", command, phase);

                let begin = match (command, phase) {
                    (SessionCommand::Start, PresenterPhase::Idle) => true,
                    (SessionCommand::Start, _) => {
                        // Expired is one-way; only a reset produces a new session
                        debug!("Start ignored, session is not idle");
                        false
                    }
                    (SessionCommand::Reset, _) => true,
                    (SessionCommand::Stop, _) => {
                        debug!("Stop ignored, no active session");
                        false
                    }
                };

                if begin {
                    let mut end = run_session(&state, &mut command_rx).await;
                    while end == SessionEnd::Restart {
                        end = run_session(&state, &mut command_rx).await;
                    }
                }
            }
            Err(e) => {
                error!("Error receiving presenter command: {}", e);
                // Wait a bit before retrying
                sleep(Duration::from_secs(1)).await;
            }
        }
    }
}

/// Run one presenter session until it stops, expires, or is reset.
///
/// The interval handle lives inside this function, so every exit path drops
/// it and no tick can fire after the session ends.
async fn run_session(
    state: &Arc<AppState>,
    command_rx: &mut broadcast::Receiver<SessionCommand>,
) -> SessionEnd {
    let binding = match SurfaceBinding::resolve(&state.panel) {
        Ok(binding) => binding,
        Err(e) => {
            // Degraded no-op mode: report and stay idle rather than crash
            error!("Presenter cannot start, display binding failed: {}", e);
            if let Err(e) = state.update_session(SessionState::new()) {
                error!("Failed to reset session state: {}", e);
            }
            return SessionEnd::Degraded;
        }
    };

    if let Err(e) = state.update_session(SessionState::started()) {
        error!("Failed to mark session running: {}", e);
        return SessionEnd::Degraded;
    }

    info!(
        "Presenter session started, target {}, cadence {} ms",
        state.target,
        state.cadence.as_millis()
    );

    // The interval's first tick completes immediately and doubles as the
    // initial render on start.
    let mut ticker = interval(state.cadence);

    loop {
        tokio::select! {
            // Cadence tick - sample the engine and refresh the display
            _ = ticker.tick() => {
                match run_tick(state, &binding, Utc::now()) {
                    TickOutcome::Rendered => {}
                    TickOutcome::Expired => {
                        info!("Target instant reached, presenter session expired");
                        return SessionEnd::Expired;
                    }
                    TickOutcome::Frozen => return SessionEnd::Expired,
                }
            }

            // Control command - check whether the session should end
            Ok(command) = command_rx.recv() => {
                match command {
                    SessionCommand::Stop => {
                        info!("Stopping presenter session");
                        if let Err(e) = state.update_session(SessionState::new()) {
                            error!("Failed to mark session idle: {}", e);
                        }
                        return SessionEnd::Stopped;
                    }
                    SessionCommand::Reset => {
                        debug!("Reset requested, restarting session");
                        return SessionEnd::Restart;
                    }
                    SessionCommand::Start => {
                        debug!("Start ignored, session already running");
                    }
                }
            }
        }
    }
}

/// One sample-and-render pass at the given instant.
///
/// Expired sessions are frozen: the numeric slots are never written again
/// no matter how many further ticks arrive.
pub(crate) fn run_tick(
    state: &AppState,
    binding: &SurfaceBinding,
    now: DateTime<Utc>,
) -> TickOutcome {
    if state.current_phase() == PresenterPhase::Expired {
        return TickOutcome::Frozen;
    }

    let sample = remaining(state.target, now);
    if let Err(e) = binding.write_fields(&sample) {
        error!("Failed to render countdown fields: {}", e);
    }

    if sample.expired {
        if let Err(e) = binding.write_status(EXPIRED_STATUS) {
            error!("Failed to write terminal status: {}", e);
        }
        if let Err(e) = binding.disable_cta(EXPIRED_STATUS) {
            error!("Failed to disable CTA element: {}", e);
        }
        if let Err(e) = state.update_session(SessionState::expired()) {
            error!("Failed to mark session expired: {}", e);
        }
        TickOutcome::Expired
    } else {
        if let Err(e) = state.update_session(SessionState::running(sample)) {
            error!("Failed to record countdown sample: {}", e);
        }
        TickOutcome::Rendered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::panel::{
        DisplayPanel, SLOT_DAYS, SLOT_HOURS, SLOT_MINUTES, SLOT_SECONDS, SLOT_STATUS,
    };
    use chrono::Duration as ChronoDuration;
    use tokio::task::JoinHandle;

    fn app_state(target: DateTime<Utc>, panel: DisplayPanel) -> Arc<AppState> {
        Arc::new(AppState::new(
            target,
            Duration::from_millis(1000),
            Arc::new(panel),
            20580,
            "127.0.0.1".to_string(),
        ))
    }

    fn spawn_presenter(state: &Arc<AppState>) -> JoinHandle<()> {
        let command_rx = state.command_tx.subscribe();
        tokio::spawn(presenter_task(Arc::clone(state), command_rx))
    }

    async fn settle() {
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    #[test]
    fn test_tick_renders_sample() {
        let now = Utc::now();
        let state = app_state(now + ChronoDuration::milliseconds(90_061_000), DisplayPanel::standard());
        let binding = SurfaceBinding::resolve(&state.panel).unwrap();

        assert_eq!(run_tick(&state, &binding, now), TickOutcome::Rendered);
        assert_eq!(state.panel.text(SLOT_DAYS).as_deref(), Some("01"));
        assert_eq!(state.panel.text(SLOT_HOURS).as_deref(), Some("01"));
        assert_eq!(state.panel.text(SLOT_MINUTES).as_deref(), Some("01"));
        assert_eq!(state.panel.text(SLOT_SECONDS).as_deref(), Some("01"));
        assert_eq!(state.current_phase(), PresenterPhase::Running);
    }

    #[test]
    fn test_expired_tick_clamps_and_disables_cta() {
        let now = Utc::now();
        let state = app_state(now - ChronoDuration::milliseconds(1_000), DisplayPanel::standard());
        let binding = SurfaceBinding::resolve(&state.panel).unwrap();

        assert_eq!(run_tick(&state, &binding, now), TickOutcome::Expired);
        for slot in [SLOT_DAYS, SLOT_HOURS, SLOT_MINUTES, SLOT_SECONDS] {
            assert_eq!(state.panel.text(slot).as_deref(), Some("00"));
        }
        assert_eq!(state.panel.text(SLOT_STATUS).as_deref(), Some(EXPIRED_STATUS));
        assert!(!state.panel.cta_enabled());
        assert_eq!(state.current_phase(), PresenterPhase::Expired);
    }

    #[test]
    fn test_injected_ticks_after_expiry_write_nothing() {
        let now = Utc::now();
        let state = app_state(now - ChronoDuration::seconds(5), DisplayPanel::standard());
        let binding = SurfaceBinding::resolve(&state.panel).unwrap();
        assert_eq!(run_tick(&state, &binding, now), TickOutcome::Expired);

        // Plant a sentinel so any further write would be visible
        state.panel.set_text(SLOT_DAYS, "sentinel").unwrap();
        assert_eq!(run_tick(&state, &binding, now), TickOutcome::Frozen);
        assert_eq!(run_tick(&state, &binding, now + ChronoDuration::seconds(30)), TickOutcome::Frozen);
        assert_eq!(state.panel.text(SLOT_DAYS).as_deref(), Some("sentinel"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_renders_and_stop_is_idempotent() {
        let state = app_state(Utc::now() + ChronoDuration::days(2), DisplayPanel::standard());
        let task = spawn_presenter(&state);

        state.send_command(SessionCommand::Start);
        settle().await;
        assert_eq!(state.current_phase(), PresenterPhase::Running);
        assert_ne!(state.panel.text(SLOT_SECONDS).as_deref(), Some("--"));

        state.send_command(SessionCommand::Stop);
        settle().await;
        assert_eq!(state.current_phase(), PresenterPhase::Idle);

        // Stopping again is a no-op
        state.send_command(SessionCommand::Stop);
        settle().await;
        assert_eq!(state.current_phase(), PresenterPhase::Idle);

        task.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_past_target_expires_on_first_tick() {
        let state = app_state(Utc::now() - ChronoDuration::seconds(1), DisplayPanel::standard());
        let task = spawn_presenter(&state);

        state.send_command(SessionCommand::Start);
        settle().await;
        assert_eq!(state.current_phase(), PresenterPhase::Expired);
        assert_eq!(state.panel.text(SLOT_STATUS).as_deref(), Some(EXPIRED_STATUS));
        assert!(!state.panel.cta_enabled());

        // Start does not leave the terminal phase
        state.send_command(SessionCommand::Start);
        settle().await;
        assert_eq!(state.current_phase(), PresenterPhase::Expired);

        // Reset produces a fresh session, which immediately re-expires
        state.send_command(SessionCommand::Reset);
        settle().await;
        assert_eq!(state.current_phase(), PresenterPhase::Expired);

        task.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_required_slot_degrades_to_idle() {
        let panel = DisplayPanel::empty();
        panel.add_slot(SLOT_HOURS);
        panel.add_slot(SLOT_MINUTES);
        panel.add_slot(SLOT_SECONDS);
        let state = app_state(Utc::now() + ChronoDuration::days(1), panel);
        let task = spawn_presenter(&state);

        state.send_command(SessionCommand::Start);
        settle().await;
        assert_eq!(state.current_phase(), PresenterPhase::Idle);

        task.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_restarts_a_running_session() {
        let state = app_state(Utc::now() + ChronoDuration::days(1), DisplayPanel::standard());
        let task = spawn_presenter(&state);

        state.send_command(SessionCommand::Start);
        settle().await;
        assert_eq!(state.current_phase(), PresenterPhase::Running);

        state.send_command(SessionCommand::Reset);
        settle().await;
        assert_eq!(state.current_phase(), PresenterPhase::Running);

        task.abort();
    }
}
