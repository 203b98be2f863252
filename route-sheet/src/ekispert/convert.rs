//! Conversion from Ekispert DTOs to domain types.
//!
//! Shape problems (missing names, points that don't pair up with lines)
//! surface here as [`ConversionError`]. Callers decide whether to skip the
//! record or fail.

use serde::Deserialize;
use serde_json::Value;

use crate::domain::{
    Fare, InvalidStationCode, Itinerary, Segment, SegmentMismatch, Station, StationCode,
    pair_segments,
};

use super::types::{CourseDto, PriceDto, RouteDto, StationDto};

/// `kind` of the price entry that carries the total fare.
const FARE_SUMMARY: &str = "FareSummary";

/// Errors converting an API record into a domain value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    /// Station record with an unusable code
    #[error("station {name:?}: {source}")]
    StationCode {
        name: String,
        #[source]
        source: InvalidStationCode,
    },

    /// Route point without any name
    #[error("route {route}: point {point} has no name")]
    UnnamedPoint { route: usize, point: usize },

    /// Route line without a name
    #[error("route {route}: line {line} has no name")]
    UnnamedLine { route: usize, line: usize },

    /// Points and lines don't pair up
    #[error("route {route}: {source}")]
    Segments {
        route: usize,
        #[source]
        source: SegmentMismatch,
    },

    /// Course JSON that doesn't decode as a course
    #[error("undecodable course: {message}")]
    Shape { message: String },

    /// Course without any route record
    #[error("course has no route")]
    NoRoute,
}

/// Convert a station search hit.
pub fn convert_station(dto: &StationDto) -> Result<Station, ConversionError> {
    let code = StationCode::parse(&dto.code).map_err(|source| ConversionError::StationCode {
        name: dto.name.clone(),
        source,
    })?;
    Ok(Station::new(dto.name.trim(), code))
}

/// Extract the one-way total fare.
///
/// Takes the first `FareSummary` entry. A course without one (or with no
/// usable `Oneway` value) is priced at zero.
pub fn fare_summary(prices: &[PriceDto]) -> Fare {
    prices
        .iter()
        .find(|p| p.kind.as_deref() == Some(FARE_SUMMARY))
        .and_then(|p| p.oneway.as_ref())
        .and_then(|a| a.value())
        .map(Fare)
        .unwrap_or_default()
}

/// Decode one raw course from a route search response.
pub fn decode_course(value: &Value) -> Result<CourseDto, ConversionError> {
    CourseDto::deserialize(value).map_err(|e| ConversionError::Shape {
        message: e.to_string(),
    })
}

/// Convert a course into an itinerary.
///
/// Segments from every route record are concatenated in order. A course
/// must have at least one route.
pub fn convert_course(course: &CourseDto) -> Result<Itinerary, ConversionError> {
    if course.route.is_empty() {
        return Err(ConversionError::NoRoute);
    }
    let mut segments = Vec::new();
    for (idx, route) in course.route.iter().enumerate() {
        segments.extend(convert_route(idx, route)?);
    }
    Ok(Itinerary::new(fare_summary(&course.price), segments))
}

fn convert_route(idx: usize, route: &RouteDto) -> Result<Vec<Segment>, ConversionError> {
    let points = route
        .point
        .iter()
        .enumerate()
        .map(|(i, p)| {
            p.display_name()
                .map(str::to_string)
                .ok_or(ConversionError::UnnamedPoint { route: idx, point: i })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let lines = route
        .line
        .iter()
        .enumerate()
        .map(|(i, l)| {
            l.name
                .clone()
                .ok_or(ConversionError::UnnamedLine { route: idx, line: i })
        })
        .collect::<Result<Vec<_>, _>>()?;

    pair_segments(&points, &lines)
        .map_err(|source| ConversionError::Segments { route: idx, source })
}
