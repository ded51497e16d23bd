//! Schedule types for the Ergast-compatible API
//!
//! Fields deserialize from the API's camelCase names and serialize to the
//! PascalCase names used for stored documents.

use serde::{Deserialize, Deserializer, Serialize};

/// Top-level API response
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleResponse {
    #[serde(rename = "MRData")]
    pub mr_data: MasterData,
}

/// The `MRData` envelope
#[derive(Debug, Clone, Deserialize)]
pub struct MasterData {
    #[serde(rename = "RaceTable")]
    pub race_table: RaceTable,
}

/// Races of one season
#[derive(Debug, Clone, Deserialize)]
pub struct RaceTable {
    #[serde(rename = "Races")]
    pub races: Vec<Schedule>,
}

/// Date and time of a single session, either may be missing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(rename(serialize = "Date", deserialize = "date"), default)]
    pub date: Option<String>,
    #[serde(rename(serialize = "Time", deserialize = "time"), default)]
    pub time: Option<String>,
}

/// One race weekend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    #[serde(
        rename(serialize = "Round", deserialize = "round"),
        deserialize_with = "deserialize_round"
    )]
    pub round: u32,
    #[serde(rename(serialize = "RaceName", deserialize = "raceName"))]
    pub race_name: String,
    #[serde(rename(serialize = "Date", deserialize = "date"))]
    pub date: String,
    #[serde(rename(serialize = "Time", deserialize = "time"), default)]
    pub time: Option<String>,
    #[serde(rename = "FirstPractice", default)]
    pub first_practice: Option<Session>,
    #[serde(rename = "SecondPractice", default)]
    pub second_practice: Option<Session>,
    #[serde(rename = "ThirdPractice", default)]
    pub third_practice: Option<Session>,
    #[serde(rename = "Qualifying", default)]
    pub qualifying: Option<Session>,
    #[serde(rename = "Sprint", default)]
    pub sprint: Option<Session>,
}

impl Schedule {
    /// A race with only the required fields set
    pub fn new(round: u32, race_name: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            round,
            race_name: race_name.into(),
            date: date.into(),
            time: None,
            first_practice: None,
            second_practice: None,
            third_practice: None,
            qualifying: None,
            sprint: None,
        }
    }
}

/// The API sends `round` as a string; accept plain integers as well.
fn deserialize_round<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Round {
        Number(u32),
        Text(String),
    }

    match Round::deserialize(deserializer)? {
        Round::Number(n) => Ok(n),
        Round::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("round {s:?} is not an integer"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_round_accepts_string_and_number() {
        let a: Schedule =
            serde_json::from_str(r#"{"round": "3", "raceName": "A", "date": "2024-03-01"}"#)
                .unwrap();
        let b: Schedule =
            serde_json::from_str(r#"{"round": 3, "raceName": "A", "date": "2024-03-01"}"#)
                .unwrap();
        assert_eq!(a.round, 3);
        assert_eq!(a, b);
    }

    #[test]
    fn test_non_numeric_round_is_rejected() {
        let result: Result<Schedule, _> =
            serde_json::from_str(r#"{"round": "three", "raceName": "A", "date": "2024-03-01"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_required_field_is_rejected() {
        let result: Result<Schedule, _> =
            serde_json::from_str(r#"{"round": "1", "date": "2024-03-01"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_document_uses_pascal_case_and_nulls() {
        let mut schedule = Schedule::new(1, "Bahrain Grand Prix", "2024-03-02");
        schedule.time = Some("15:00:00Z".into());
        schedule.qualifying = Some(Session {
            date: Some("2024-03-01".into()),
            time: None,
        });

        let doc = serde_json::to_value(&schedule).unwrap();
        assert_eq!(
            doc,
            serde_json::json!({
                "Round": 1,
                "RaceName": "Bahrain Grand Prix",
                "Date": "2024-03-02",
                "Time": "15:00:00Z",
                "FirstPractice": null,
                "SecondPractice": null,
                "ThirdPractice": null,
                "Qualifying": {"Date": "2024-03-01", "Time": null},
                "Sprint": null
            })
        );
    }
}
