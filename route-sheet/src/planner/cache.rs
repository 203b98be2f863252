//! In-process cache in front of a remote source.
//!
//! Station candidates and route searches are keyed by their query. Only
//! successful responses are cached; errors always go back to the source.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::domain::{Itinerary, Station, StationCode, via_list};
use crate::ekispert::EkispertError;

use super::source::{CourseSource, StationSource};

type StationEntry = Arc<Vec<Station>>;
type CourseEntry = Arc<Vec<(usize, Itinerary)>>;

/// Configuration for the response cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum entries per query kind.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(10 * 60),
            max_capacity: 1000,
        }
    }
}

/// Source wrapper that remembers recent answers.
pub struct CachedSource<S> {
    inner: S,
    stations: MokaCache<String, StationEntry>,
    courses: MokaCache<String, CourseEntry>,
}

impl<S> CachedSource<S> {
    pub fn new(inner: S, config: &CacheConfig) -> Self {
        let stations = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();
        let courses = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self {
            inner,
            stations,
            courses,
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Drop everything cached.
    pub fn invalidate_all(&self) {
        self.stations.invalidate_all();
        self.courses.invalidate_all();
    }
}

/// Names differing only in case or surrounding space share an entry.
fn station_key(name: &str) -> String {
    name.trim().to_lowercase()
}

impl<S: StationSource + Sync> StationSource for CachedSource<S> {
    async fn search_stations(&self, name: &str) -> Result<Vec<Station>, EkispertError> {
        let key = station_key(name);
        if let Some(hit) = self.stations.get(&key).await {
            debug!(name, "station search cache hit");
            return Ok(hit.as_ref().clone());
        }

        let found = self.inner.search_stations(name).await?;
        self.stations.insert(key, Arc::new(found.clone())).await;
        Ok(found)
    }
}

impl<S: CourseSource + Sync> CourseSource for CachedSource<S> {
    async fn search_courses(
        &self,
        codes: &[StationCode],
    ) -> Result<Vec<(usize, Itinerary)>, EkispertError> {
        let key = via_list(codes);
        if let Some(hit) = self.courses.get(&key).await {
            debug!(via = %key, "route search cache hit");
            return Ok(hit.as_ref().clone());
        }

        let found = self.inner.search_courses(codes).await?;
        self.courses.insert(key, Arc::new(found.clone())).await;
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Fare;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Counting {
        station_calls: Mutex<usize>,
        course_calls: Mutex<usize>,
        fail: bool,
    }

    impl StationSource for Counting {
        async fn search_stations(&self, name: &str) -> Result<Vec<Station>, EkispertError> {
            *self.station_calls.lock().unwrap() += 1;
            if self.fail {
                return Err(EkispertError::Unauthorized);
            }
            Ok(vec![Station::new(name.trim(), StationCode::parse("22828").unwrap())])
        }
    }

    impl CourseSource for Counting {
        async fn search_courses(
            &self,
            _codes: &[StationCode],
        ) -> Result<Vec<(usize, Itinerary)>, EkispertError> {
            *self.course_calls.lock().unwrap() += 1;
            Ok(vec![(0, Itinerary::new(Fare(210), Vec::new()))])
        }
    }

    #[tokio::test]
    async fn repeated_station_search_hits_cache() {
        let cached = CachedSource::new(Counting::default(), &CacheConfig::default());

        let first = cached.search_stations("Tokyo").await.unwrap();
        let second = cached.search_stations(" tokyo ").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(*cached.inner().station_calls.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn route_search_keyed_by_via_list() {
        let cached = CachedSource::new(Counting::default(), &CacheConfig::default());
        let a = [StationCode::parse("1").unwrap(), StationCode::parse("2").unwrap()];
        let b = [StationCode::parse("2").unwrap(), StationCode::parse("1").unwrap()];

        cached.search_courses(&a).await.unwrap();
        cached.search_courses(&a).await.unwrap();
        cached.search_courses(&b).await.unwrap();

        assert_eq!(*cached.inner().course_calls.lock().unwrap(), 2);
    }

    #[tokio::test]
    async fn errors_are_not_cached() {
        let source = Counting {
            fail: true,
            ..Counting::default()
        };
        let cached = CachedSource::new(source, &CacheConfig::default());

        assert!(cached.search_stations("Tokyo").await.is_err());
        assert!(cached.search_stations("Tokyo").await.is_err());
        assert_eq!(*cached.inner().station_calls.lock().unwrap(), 2);
    }

    #[tokio::test]
    async fn invalidate_all_forces_refetch() {
        let cached = CachedSource::new(Counting::default(), &CacheConfig::default());

        cached.search_stations("Tokyo").await.unwrap();
        cached.invalidate_all();
        cached.search_stations("Tokyo").await.unwrap();

        assert_eq!(*cached.inner().station_calls.lock().unwrap(), 2);
    }
}
