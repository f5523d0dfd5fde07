//! Keyboard activation path for the CTA trigger

use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, error, info, warn};

use crate::state::AppState;

/// Background task that activates the CTA trigger on keyboard input.
///
/// Any line on stdin (a bare Enter included) counts as an activation, the
/// keyboard equivalent of clicking the CTA. Ends quietly on EOF.
pub async fn keyboard_task(state: Arc<AppState>) {
    info!("Keyboard CTA activation ready (press Enter to trigger)");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        match lines.next_line().await {
            Ok(Some(_)) => {
                if let Err(e) = state.trigger_cta() {
                    error!("Keyboard CTA activation failed: {}", e);
                }
            }
            Ok(None) => {
                debug!("stdin closed, keyboard activation ending");
                break;
            }
            Err(e) => {
                warn!("Failed to read keyboard input: {}", e);
                break;
            }
        }
    }
}
