//! Shapes raw API responses into schedule records.

use serde_json::Value;

use crate::models::{Schedule, ScheduleResponse};
use crate::{Result, ScheduleError};

/// Validate an API response and extract its races.
///
/// Any race that fails validation (missing name or date, non-integer round)
/// rejects the whole response.
pub fn transform_schedule(response: Value) -> Result<Vec<Schedule>> {
    let parsed: ScheduleResponse = serde_json::from_value(response)
        .map_err(|e| ScheduleError::Validation(format!("Invalid schedule data: {e}")))?;

    let schedules = parsed.mr_data.race_table.races;
    tracing::debug!(count = schedules.len(), "schedule transformed");
    Ok(schedules)
}
