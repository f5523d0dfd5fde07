//! Configuration and CLI argument handling

use std::time::Duration;
use chrono::{DateTime, Utc};
use clap::Parser;

/// CLI argument parsing structure
#[derive(Parser)]
#[command(name = "big-day")]
#[command(about = "A state-managed HTTP server driving a countdown display toward a fixed event")]
#[command(version = "1.0.0")]
pub struct Config {
    /// Event instant the countdown runs toward, RFC 3339 (e.g. 2026-12-31T00:00:00Z)
    #[arg(short, long)]
    pub target: String,

    /// Interval between display refreshes in milliseconds
    #[arg(long, default_value = "1000", value_parser = clap::value_parser!(u64).range(1..))]
    pub cadence_ms: u64,

    /// Port to bind the server to
    #[arg(short, long, default_value = "20580")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Build the display panel without the optional status slot
    #[arg(long)]
    pub no_status: bool,

    /// Build the display panel without the CTA element
    #[arg(long)]
    pub no_cta: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Parse the configured target as an absolute UTC instant
    pub fn target_instant(&self) -> Result<DateTime<Utc>, String> {
        DateTime::parse_from_rfc3339(&self.target)
            .map(|instant| instant.with_timezone(&Utc))
            .map_err(|e| format!("Invalid --target '{}': {}", self.target, e))
    }

    /// Sampling cadence as a duration
    pub fn cadence(&self) -> Duration {
        Duration::from_millis(self.cadence_ms)
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}
