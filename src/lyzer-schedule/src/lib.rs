//! Race schedule client for the Lyzer CLI
//!
//! Fetches season schedules from an Ergast-compatible API, validates them
//! into typed [`Schedule`] records and shapes them into storage documents.

mod client;
mod models;
mod transform;
mod validation;

pub use client::ScheduleClient;
pub use models::{MasterData, RaceTable, Schedule, ScheduleResponse, Session};
pub use transform::transform_schedule;
pub use validation::{MIN_YEAR, validate_year, validate_year_at};

/// Default Ergast-compatible API base URL
pub const DEFAULT_SCHEDULE_URL: &str = "https://api.jolpi.ca/ergast/f1";

/// Error types for schedule operations
#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    #[error("Schedule request failed with HTTP status {status}")]
    Fetch { status: u16 },

    #[error("Request to {url} timed out")]
    Timeout { url: String },

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Invalid schedule response: {0}")]
    InvalidResponse(#[from] serde_json::Error),

    #[error("{0}")]
    Validation(String),
}

impl ScheduleError {
    /// HTTP status carried by a transport failure, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Fetch { status } => Some(*status),
            _ => None,
        }
    }
}

/// Result type for schedule operations
pub type Result<T> = std::result::Result<T, ScheduleError>;
