//! Plain-text rendering of a season schedule.

use lyzer_schedule::{Schedule, Session};

/// Column headers, in display order.
pub const HEADERS: [&str; 8] = [
    "Round",
    "Race",
    "Race date",
    "Race time",
    "Qualifying date",
    "Qualifying time",
    "Sprint date",
    "Sprint time",
];

const MISSING: &str = "None";

fn session_date(session: Option<&Session>) -> String {
    session
        .and_then(|s| s.date.clone())
        .unwrap_or_else(|| MISSING.to_string())
}

fn session_time(session: Option<&Session>) -> String {
    session
        .and_then(|s| s.time.clone())
        .unwrap_or_else(|| MISSING.to_string())
}

/// Table cells for one race.
pub fn schedule_row(schedule: &Schedule) -> [String; 8] {
    [
        schedule.round.to_string(),
        schedule.race_name.clone(),
        schedule.date.clone(),
        schedule.time.clone().unwrap_or_else(|| MISSING.to_string()),
        session_date(schedule.qualifying.as_ref()),
        session_time(schedule.qualifying.as_ref()),
        session_date(schedule.sprint.as_ref()),
        session_time(schedule.sprint.as_ref()),
    ]
}

/// Render the schedule as an aligned table titled "Schedules".
pub fn render_schedule_table(schedules: &[Schedule]) -> String {
    let rows: Vec<[String; 8]> = schedules.iter().map(schedule_row).collect();

    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let format_line = |cells: &[&str]| -> String {
        cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let total_width = widths.iter().sum::<usize>() + 2 * (widths.len() - 1);
    let mut out = String::new();
    out.push_str("Schedules\n");
    out.push_str(&format_line(&HEADERS));
    out.push('\n');
    out.push_str(&"-".repeat(total_width));
    out.push('\n');
    for row in &rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        out.push_str(&format_line(&cells));
        out.push('\n');
    }
    out
}
