//! Big Day - A state-managed HTTP server driving a countdown display
//!
//! This is the main entry point for the big-day application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use big_day::{
    api::create_router,
    config::Config,
    display::DisplayPanel,
    state::{AppState, SessionCommand},
    tasks::{console_view_task, keyboard_task, presenter_task},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("big_day={},tower_http=info", config.log_level()))
        .init();

    info!("Starting big-day server v1.0.0");

    // The engine never validates instants; a malformed target is refused here
    let target = match config.target_instant() {
        Ok(target) => target,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    };

    info!("Configuration: host={}, port={}, target={}, cadence={}ms",
          config.host, config.port, target, config.cadence_ms);

    // Create the display surface and application state
    let panel = Arc::new(DisplayPanel::with_layout(!config.no_status, !config.no_cta));
    let state = Arc::new(AppState::new(
        target,
        config.cadence(),
        panel,
        config.port,
        config.host.clone(),
    ));

    // Subscribe before the first command so the auto-start is never missed
    let command_rx = state.command_tx.subscribe();
    let presenter_state = Arc::clone(&state);
    tokio::spawn(async move {
        presenter_task(presenter_state, command_rx).await;
    });

    let console_state = Arc::clone(&state);
    tokio::spawn(async move {
        console_view_task(console_state).await;
    });

    let keyboard_state = Arc::clone(&state);
    tokio::spawn(async move {
        keyboard_task(keyboard_state).await;
    });

    // The session begins on boot
    state.send_command(SessionCommand::Start);

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /start  - Begin the presenter session");
    info!("  POST /stop   - Cancel the presenter session");
    info!("  POST /reset  - Restart the presenter session");
    info!("  POST /cta    - Activate the call-to-action");
    info!("  GET  /status - Session, display, and server status");
    info!("  GET  /health - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    // Release the session's timer before the process exits
    state.send_command(SessionCommand::Stop);

    info!("Server shutdown complete");
    Ok(())
}
