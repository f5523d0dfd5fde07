//! Console view of the running countdown

use std::sync::Arc;
use tracing::{debug, info};

use crate::state::{AppState, PresenterPhase};
use super::presenter::EXPIRED_STATUS;

/// Background task that logs each session update as a readable countdown line.
///
/// Ends quietly if the update channel closes.
pub async fn console_view_task(state: Arc<AppState>) {
    info!("Starting console view task");

    let mut session_rx = state.session_update_tx.subscribe();

    while session_rx.changed().await.is_ok() {
        let session = session_rx.borrow_and_update().clone();
        match session.phase {
            PresenterPhase::Running => {
                if let Some(sample) = session.last_sample {
                    info!(
                        "Countdown: {}d {:02}h {:02}m {:02}s until the event",
                        sample.days, sample.hours, sample.minutes, sample.seconds
                    );
                }
            }
            PresenterPhase::Expired => info!("{}", EXPIRED_STATUS),
            PresenterPhase::Idle => debug!("Presenter idle"),
        }
    }

    debug!("Session update channel closed, console view ending");
}
