//! Schedule API client

use crate::models::Schedule;
use crate::transform::transform_schedule;
use crate::{DEFAULT_SCHEDULE_URL, Result, ScheduleError};

/// Client for an Ergast-compatible schedule API
#[derive(Clone)]
pub struct ScheduleClient {
    client: reqwest::Client,
    base_url: String,
}

impl ScheduleClient {
    /// Create a client for the default API
    pub fn new() -> Self {
        Self::with_url(DEFAULT_SCHEDULE_URL)
    }

    /// Create a client for the given base URL (e.g. "https://api.jolpi.ca/ergast/f1")
    pub fn with_url(base_url: impl Into<String>) -> Self {
        let client = lyzer_common::create_default_client().unwrap_or_else(|e| {
            tracing::warn!("{e}, falling back to a default client");
            reqwest::Client::new()
        });
        Self::with_client(client, base_url)
    }

    /// Create a client around an already configured HTTP client
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn season_url(&self, year: i32) -> String {
        format!("{}/{year}.json", self.base_url.trim_end_matches('/'))
    }

    /// Fetch the raw schedule payload for a season
    pub async fn get_schedule_data(&self, year: i32) -> Result<serde_json::Value> {
        let url = self.season_url(year);
        tracing::info!(%url, "fetching schedule");

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                ScheduleError::Timeout { url: url.clone() }
            } else {
                ScheduleError::Request(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%url, status = status.as_u16(), "schedule request failed");
            return Err(ScheduleError::Fetch {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Fetch and validate the schedule for a season
    pub async fn get_schedules(&self, year: i32) -> Result<Vec<Schedule>> {
        let data = self.get_schedule_data(year).await?;
        transform_schedule(data)
    }
}

impl Default for ScheduleClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn season_body() -> serde_json::Value {
        serde_json::json!({
            "MRData": {
                "RaceTable": {
                    "season": "2023",
                    "Races": [
                        {
                            "round": "1",
                            "raceName": "Bahrain Grand Prix",
                            "date": "2023-03-05",
                            "time": "15:00:00Z"
                        }
                    ]
                }
            }
        })
    }

    #[test]
    fn test_season_url_trims_trailing_slash() {
        let client = ScheduleClient::with_url("http://localhost:8000/f1/");
        assert_eq!(client.season_url(2023), "http://localhost:8000/f1/2023.json");
        assert_eq!(client.base_url(), "http://localhost:8000/f1/");
    }

    #[tokio::test]
    async fn test_get_schedule_data_returns_payload() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/f1/2023.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(season_body()))
            .mount(&server)
            .await;

        let client = ScheduleClient::with_url(format!("{}/f1", server.uri()));
        let data = client.get_schedule_data(2023).await.unwrap();
        assert_eq!(data, season_body());
    }

    #[tokio::test]
    async fn test_get_schedules_transforms_payload() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/f1/2023.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(season_body()))
            .mount(&server)
            .await;

        let client = ScheduleClient::with_url(format!("{}/f1", server.uri()));
        let schedules = client.get_schedules(2023).await.unwrap();
        assert_eq!(schedules.len(), 1);
        assert_eq!(schedules[0].race_name, "Bahrain Grand Prix");
    }

    #[tokio::test]
    async fn test_non_success_status_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = ScheduleClient::with_url(server.uri());
        let err = client.get_schedule_data(2023).await.unwrap_err();
        assert!(matches!(err, ScheduleError::Fetch { status: 500 }));
        assert_eq!(err.status_code(), Some(500));
    }

    #[tokio::test]
    async fn test_invalid_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = ScheduleClient::with_url(server.uri());
        let err = client.get_schedule_data(2023).await.unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_timeout_is_distinct() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&server)
            .await;

        let http = lyzer_common::create_client_with_timeout(Duration::from_millis(200)).unwrap();
        let client = ScheduleClient::with_client(http, server.uri());
        let err = client.get_schedule_data(2023).await.unwrap_err();
        assert!(matches!(err, ScheduleError::Timeout { .. }), "got {err:?}");
    }
}
