//! Domain types for route lookups.
//!
//! This module contains the validated types the rest of the crate works
//! with. Each type enforces its invariants at construction time, so code
//! that receives one can trust it.

mod error;
mod itinerary;
mod station;
mod stops;

pub use error::DomainError;
pub use itinerary::{Fare, Itinerary, Segment, SegmentMismatch, pair_segments};
pub use station::{InvalidStationCode, Station, StationCode, same_name, via_list};
pub use stops::{InputSlot, MAX_STOPS, MIN_STOPS, StopEntry, StopRequest};
