//! Ekispert route-search API client.
//!
//! Wraps the two endpoints the add-on needs:
//! - station search (partial name match, trains only), used to turn a
//!   typed name into candidate station codes
//! - course search (`searchType=plain`), which returns a handful of
//!   alternative itineraries through an ordered `viaList` of codes
//!
//! The API returns a bare object instead of a one-element array in many
//! places. The DTOs in [`types`] absorb that while deserializing.

mod client;
mod convert;
mod error;
mod mock;
pub mod types;

pub use client::{EkispertClient, EkispertConfig};
pub use convert::{ConversionError, convert_course, convert_station, fare_summary};
pub use error::EkispertError;
pub use mock::MockEkispert;
