//! API response structures

use std::collections::HashMap;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::display::CtaElement;
use crate::state::SessionState;

/// API response structure for control endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub session: SessionState,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: String, message: String, session: SessionState) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            session,
        }
    }

    /// Response for an accepted presenter command
    pub fn accepted(message: String, session: SessionState) -> Self {
        Self::new("accepted".to_string(), message, session)
    }
}

/// Full status response: session, display surface, and server metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub session: SessionState,
    pub display: HashMap<String, String>,
    pub cta: Option<CtaElement>,
    pub cta_activations: u64,
    pub target: DateTime<Utc>,
    pub cadence_ms: u64,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: "1.0.0".to_string(),
        }
    }
}
