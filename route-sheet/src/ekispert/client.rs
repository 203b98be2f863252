//! Ekispert HTTP client.
//!
//! Provides async methods for the two endpoints we use: partial-match
//! station search and plain course search. The API key travels as the
//! `key` query parameter on every request.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::domain::{Itinerary, Station, StationCode, via_list};

use super::convert::{convert_course, convert_station, decode_course};
use super::error::EkispertError;
use super::types::{CourseSearchResponse, StationSearchResponse};

/// Default base URL for the Ekispert web service.
const DEFAULT_BASE_URL: &str = "https://api.ekispert.jp";

/// Station search endpoint (light variant).
const STATION_PATH: &str = "/v1/json/station/light";

/// Course search endpoint.
const COURSE_PATH: &str = "/v1/json/search/course/extreme";

/// Configuration for the Ekispert client.
#[derive(Debug, Clone)]
pub struct EkispertConfig {
    /// API access key
    pub api_key: String,
    /// Base URL for the API (defaults to production)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl EkispertConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Ekispert API client.
#[derive(Debug, Clone)]
pub struct EkispertClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl EkispertClient {
    /// Create a new client with the given configuration.
    pub fn new(config: EkispertConfig) -> Result<Self, EkispertError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            api_key: config.api_key,
        })
    }

    /// Search train stations whose name partially matches `name`.
    ///
    /// Records with unusable codes are dropped with a warning.
    pub async fn search_stations(&self, name: &str) -> Result<Vec<Station>, EkispertError> {
        let response: StationSearchResponse = self
            .get_json(
                STATION_PATH,
                &[
                    ("key", self.api_key.as_str()),
                    ("name", name),
                    ("nameMatchType", "partial"),
                    ("type", "train"),
                ],
            )
            .await?;

        let stations = response
            .result_set
            .point
            .iter()
            .filter_map(|p| match convert_station(&p.station) {
                Ok(station) => Some(station),
                Err(e) => {
                    warn!(name, error = %e, "skipping station record");
                    None
                }
            })
            .collect::<Vec<_>>();

        debug!(name, count = stations.len(), "station search");
        Ok(stations)
    }

    /// Search routes through `codes` in order (origin, waypoints, destination).
    ///
    /// Courses that fail conversion are skipped with a warning. Their index
    /// is kept so the remaining itineraries stay in API order with their
    /// original positions.
    pub async fn search_courses(
        &self,
        codes: &[StationCode],
    ) -> Result<Vec<(usize, Itinerary)>, EkispertError> {
        let via = via_list(codes);
        let response: CourseSearchResponse = self
            .get_json(
                COURSE_PATH,
                &[
                    ("key", self.api_key.as_str()),
                    ("viaList", via.as_str()),
                    ("searchType", "plain"),
                ],
            )
            .await?;

        let itineraries = convert_courses(&response);
        debug!(via_list = %via, count = itineraries.len(), "course search");
        Ok(itineraries)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, EkispertError> {
        let url = format!("{}{}", self.base_url, path);

        let response = self.http.get(&url).query(query).send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(EkispertError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EkispertError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| EkispertError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })
    }
}

/// Convert every course, skipping malformed ones.
pub(crate) fn convert_courses(response: &CourseSearchResponse) -> Vec<(usize, Itinerary)> {
    response
        .result_set
        .course
        .iter()
        .enumerate()
        .filter_map(|(idx, raw)| match decode_course(raw).and_then(|c| convert_course(&c)) {
            Ok(itinerary) => Some((idx, itinerary)),
            Err(e) => {
                warn!(course = idx, error = %e, "skipping malformed course");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder() {
        let config = EkispertConfig::new("test-key")
            .with_base_url("http://localhost:8080/")
            .with_timeout(60);

        assert_eq!(config.api_key, "test-key");
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn config_defaults() {
        let config = EkispertConfig::new("test-key");

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn client_creation() {
        let client = EkispertClient::new(EkispertConfig::new("test-key"));
        assert!(client.is_ok());
    }

    #[test]
    fn malformed_course_is_skipped_and_index_kept() {
        let json = r#"{"ResultSet": {"Course": [
            {"Route": {"Line": [{"Name": "A"}, {"Name": "B"}],
                       "Point": [{"Station": {"Name": "X"}}]}},
            {"Price": {"kind": "FareSummary", "Oneway": "200"},
             "Route": {"Line": {"Name": "A"},
                       "Point": [{"Station": {"Name": "X"}}, {"Station": {"Name": "Y"}}]}}
        ]}}"#;
        let response: CourseSearchResponse = serde_json::from_str(json).unwrap();

        let converted = convert_courses(&response);

        assert_eq!(converted.len(), 1);
        assert_eq!(converted[0].0, 1);
        assert_eq!(converted[0].1.price.yen(), 200);
    }

    #[test]
    fn badly_typed_courses_do_not_hide_good_ones() {
        let json = r#"{"ResultSet": {"Course": [
            {"Route": "x"},
            {"Price": {"kind": "FareSummary", "Oneway": 1.5},
             "Route": {"Line": {"Name": "A"},
                       "Point": [{"Station": {"Name": "X"}}, {"Station": {"Name": "Y"}}]}},
            {"Price": {"kind": "FareSummary", "Oneway": 160}},
            {"Price": {"kind": "FareSummary", "Oneway": 310},
             "Route": {"Line": {"Name": "B"},
                       "Point": [{"Station": {"Name": "X"}}, {"Station": {"Name": "Z"}}]}}
        ]}}"#;
        let response: CourseSearchResponse = serde_json::from_str(json).unwrap();

        let converted = convert_courses(&response);

        assert_eq!(converted.len(), 1);
        assert_eq!(converted[0].0, 3);
        assert_eq!(converted[0].1.price.yen(), 310);
    }
}
