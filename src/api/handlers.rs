//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use tracing::{error, info};

use crate::state::{AppState, CtaOutcome, SessionCommand};
use super::responses::{ApiResponse, HealthResponse, StatusResponse};

/// Handle POST /start - Begin a presenter session
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    state.send_command(SessionCommand::Start);
    match state.get_session_state() {
        Ok(session) => {
            info!("Start endpoint called");
            Ok(Json(ApiResponse::accepted(
                "Presenter start requested".to_string(),
                session,
            )))
        }
        Err(e) => {
            error!("Failed to read session state: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /stop - Cancel the active presenter session (idempotent)
pub async fn stop_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    state.send_command(SessionCommand::Stop);
    match state.get_session_state() {
        Ok(session) => {
            info!("Stop endpoint called");
            Ok(Json(ApiResponse::accepted(
                "Presenter stop requested".to_string(),
                session,
            )))
        }
        Err(e) => {
            error!("Failed to read session state: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /reset - Stop-then-start the presenter session
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    state.send_command(SessionCommand::Reset);
    match state.get_session_state() {
        Ok(session) => {
            info!("Reset endpoint called");
            Ok(Json(ApiResponse::accepted(
                "Presenter reset requested".to_string(),
                session,
            )))
        }
        Err(e) => {
            error!("Failed to read session state: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /cta - Activate the call-to-action trigger
pub async fn cta_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    let outcome = match state.trigger_cta() {
        Ok(outcome) => outcome,
        Err(e) => {
            error!("CTA activation failed: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let session = match state.get_session_state() {
        Ok(session) => session,
        Err(e) => {
            error!("Failed to read session state: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let response = match outcome {
        CtaOutcome::Notified => ApiResponse::new(
            "notified".to_string(),
            "Notification emitted".to_string(),
            session,
        ),
        CtaOutcome::Disabled => ApiResponse::new(
            "disabled".to_string(),
            "Event already started, CTA is disabled".to_string(),
            session,
        ),
        CtaOutcome::Missing => ApiResponse::new(
            "missing".to_string(),
            "No CTA element on the panel".to_string(),
            session,
        ),
    };
    Ok(Json(response))
}

/// Handle GET /status - Return current session and display status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let session = match state.get_session_state() {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to get session state: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        session,
        display: state.panel.snapshot(),
        cta: state.panel.cta(),
        cta_activations: state.cta_activation_count(),
        target: state.target,
        cadence_ms: state.cadence.as_millis() as u64,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
