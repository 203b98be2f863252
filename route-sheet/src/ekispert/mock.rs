//! Mock Ekispert client for development without an API key.
//!
//! Serves recorded API responses from JSON files as if they were live.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::domain::{Itinerary, Station, StationCode, via_list};

use super::client::convert_courses;
use super::convert::convert_station;
use super::error::EkispertError;
use super::types::{CourseSearchResponse, StationSearchResponse};

/// Mock client that answers from recorded responses.
///
/// Station searches for unknown names return no candidates, like the live
/// API does. Course searches for an unknown `viaList` fail, which callers
/// treat like any other failed request.
#[derive(Debug, Clone, Default)]
pub struct MockEkispert {
    stations: Arc<HashMap<String, StationSearchResponse>>,
    courses: Arc<HashMap<String, CourseSearchResponse>>,
}

impl MockEkispert {
    /// Load fixtures from a directory.
    ///
    /// Expects `stations/{name}.json` holding station search responses and
    /// `courses/{viaList}.json` holding course search responses, where
    /// `{viaList}` is the colon-joined code list (e.g. `22828:22741.json`).
    /// Either subdirectory may be missing.
    pub fn load(data_dir: impl AsRef<Path>) -> Result<Self, EkispertError> {
        let data_dir = data_dir.as_ref();
        let stations = load_dir(&data_dir.join("stations"))?;
        let courses = load_dir(&data_dir.join("courses"))?;

        if stations.is_empty() && courses.is_empty() {
            return Err(EkispertError::MockMissing(format!(
                "no fixture files found in {:?}",
                data_dir
            )));
        }

        Ok(Self {
            stations: Arc::new(stations),
            courses: Arc::new(courses),
        })
    }

    /// Add a station search response for `name`.
    pub fn with_stations(mut self, name: &str, json: &str) -> Result<Self, EkispertError> {
        let response = parse(json)?;
        Arc::make_mut(&mut self.stations).insert(name.to_string(), response);
        Ok(self)
    }

    /// Add a course search response for a `viaList`.
    pub fn with_courses(mut self, via: &str, json: &str) -> Result<Self, EkispertError> {
        let response = parse(json)?;
        Arc::make_mut(&mut self.courses).insert(via.to_string(), response);
        Ok(self)
    }

    /// Mirrors [`super::EkispertClient::search_stations`].
    pub async fn search_stations(&self, name: &str) -> Result<Vec<Station>, EkispertError> {
        let Some(response) = self.stations.get(name) else {
            return Ok(Vec::new());
        };

        Ok(response
            .result_set
            .point
            .iter()
            .filter_map(|p| convert_station(&p.station).ok())
            .collect())
    }

    /// Mirrors [`super::EkispertClient::search_courses`].
    pub async fn search_courses(
        &self,
        codes: &[StationCode],
    ) -> Result<Vec<(usize, Itinerary)>, EkispertError> {
        let via = via_list(codes);
        let response = self
            .courses
            .get(&via)
            .ok_or_else(|| EkispertError::MockMissing(format!("courses for {via}")))?;

        Ok(convert_courses(response))
    }
}

fn parse<T: serde::de::DeserializeOwned>(json: &str) -> Result<T, EkispertError> {
    serde_json::from_str(json).map_err(|e| EkispertError::Json {
        message: e.to_string(),
        body: Some(json.chars().take(500).collect()),
    })
}

/// Read every `*.json` file in `dir`, keyed by file stem.
fn load_dir<T: serde::de::DeserializeOwned>(
    dir: &Path,
) -> Result<HashMap<String, T>, EkispertError> {
    let mut out = HashMap::new();
    if !dir.is_dir() {
        return Ok(out);
    }

    let entries = std::fs::read_dir(dir).map_err(|e| {
        EkispertError::MockMissing(format!("failed to read {:?}: {}", dir, e))
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| {
            EkispertError::MockMissing(format!("failed to read directory entry: {}", e))
        })?;

        let path = entry.path();
        if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
            continue;
        }

        let key = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| EkispertError::MockMissing(format!("invalid filename: {:?}", path)))?
            .to_string();

        let json = std::fs::read_to_string(&path).map_err(|e| {
            EkispertError::MockMissing(format!("failed to read {:?}: {}", path, e))
        })?;

        out.insert(key, parse(&json)?);
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> StationCode {
        StationCode::parse(s).unwrap()
    }

    #[tokio::test]
    async fn load_fixture_dir() {
        let client = MockEkispert::load("data/mock").unwrap();

        let stations = client.search_stations("Tokyo").await.unwrap();
        assert!(!stations.is_empty());
        assert_eq!(stations[0].code.as_str(), "22828");

        let courses = client
            .search_courses(&[code("22828"), code("22741")])
            .await
            .unwrap();
        assert_eq!(courses.len(), 2);
    }

    #[tokio::test]
    async fn unknown_station_is_empty() {
        let client = MockEkispert::default();
        assert!(client.search_stations("Atlantis").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_via_list_is_error() {
        let client = MockEkispert::default();
        let result = client.search_courses(&[code("1"), code("2")]).await;
        assert!(matches!(result, Err(EkispertError::MockMissing(_))));
    }

    #[tokio::test]
    async fn inline_fixtures() {
        let client = MockEkispert::default()
            .with_stations(
                "Shinjuku",
                r#"{"ResultSet":{"Point":{"Station":{"Name":"Shinjuku","code":"22741"}}}}"#,
            )
            .unwrap();

        let stations = client.search_stations("Shinjuku").await.unwrap();
        assert_eq!(stations, vec![Station::new("Shinjuku", code("22741"))]);
    }

    #[test]
    fn empty_dir_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(MockEkispert::load(dir.path()).is_err());
    }
}
