//! Where station candidates and itineraries come from.
//!
//! The planner only needs two queries, so it takes them through these
//! traits and can be tested against canned data.

use std::future::Future;

use crate::domain::{Itinerary, Station, StationCode};
use crate::ekispert::{EkispertClient, EkispertError, MockEkispert};

/// Remote station search.
pub trait StationSource {
    /// Stations whose names partially match `name`.
    fn search_stations(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Vec<Station>, EkispertError>> + Send;
}

/// Remote route search.
pub trait CourseSource {
    /// Itineraries through `codes` in order, each with its position in the
    /// response.
    fn search_courses(
        &self,
        codes: &[StationCode],
    ) -> impl Future<Output = Result<Vec<(usize, Itinerary)>, EkispertError>> + Send;
}

impl StationSource for EkispertClient {
    fn search_stations(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Vec<Station>, EkispertError>> + Send {
        EkispertClient::search_stations(self, name)
    }
}

impl CourseSource for EkispertClient {
    fn search_courses(
        &self,
        codes: &[StationCode],
    ) -> impl Future<Output = Result<Vec<(usize, Itinerary)>, EkispertError>> + Send {
        EkispertClient::search_courses(self, codes)
    }
}

impl StationSource for MockEkispert {
    fn search_stations(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Vec<Station>, EkispertError>> + Send {
        MockEkispert::search_stations(self, name)
    }
}

impl CourseSource for MockEkispert {
    fn search_courses(
        &self,
        codes: &[StationCode],
    ) -> impl Future<Output = Result<Vec<(usize, Itinerary)>, EkispertError>> + Send {
        MockEkispert::search_courses(self, codes)
    }
}

/// Live or recorded Ekispert, chosen at startup.
#[derive(Debug, Clone)]
pub enum Backend {
    Live(EkispertClient),
    Mock(MockEkispert),
}

impl StationSource for Backend {
    async fn search_stations(&self, name: &str) -> Result<Vec<Station>, EkispertError> {
        match self {
            Backend::Live(client) => client.search_stations(name).await,
            Backend::Mock(mock) => mock.search_stations(name).await,
        }
    }
}

impl CourseSource for Backend {
    async fn search_courses(
        &self,
        codes: &[StationCode],
    ) -> Result<Vec<(usize, Itinerary)>, EkispertError> {
        match self {
            Backend::Live(client) => client.search_courses(codes).await,
            Backend::Mock(mock) => mock.search_courses(codes).await,
        }
    }
}
