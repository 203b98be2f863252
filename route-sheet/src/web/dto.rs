//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{InputSlot, Station};
use crate::planner::{PlacedBlock, RunReport};

/// Body of `PUT /input/:slot`.
#[derive(Debug, Deserialize)]
pub struct InputRequest {
    /// New cell value; empty or missing clears the cell
    #[serde(default)]
    pub value: Option<String>,
}

/// A station candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationResult {
    pub name: String,
    pub code: String,
}

impl StationResult {
    pub fn from_station(station: &Station) -> Self {
        Self {
            name: station.name.clone(),
            code: station.code.to_string(),
        }
    }
}

/// Response to an input edit.
#[derive(Debug, Serialize)]
pub struct InputResponse {
    /// Slot label, e.g. "Via 1"
    pub slot: String,

    /// Cell reference in A1 notation
    pub cell: String,

    /// Value now in the cell
    pub value: Option<String>,

    /// Candidates offered in the cell's dropdown
    pub candidates: Vec<StationResult>,

    /// Whether the edit was handled as an input edit
    pub handled: bool,
}

/// Body of `POST /routes/search`.
///
/// Without `stops` the input sheet is used.
#[derive(Debug, Default, Deserialize)]
pub struct RouteSearchRequest {
    #[serde(default)]
    pub stops: Option<Vec<String>>,
}

/// One segment of a route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SegmentResult {
    pub boarding: String,
    pub line: String,
    pub alighting: String,
}

/// One written itinerary block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteResult {
    /// Left-most column, as a letter
    pub column: String,
    pub title: String,
    pub price: String,
    pub segments: Vec<SegmentResult>,
}

impl RouteResult {
    pub fn from_placed(placed: &PlacedBlock) -> Self {
        Self {
            column: crate::sheet::column_letter(placed.column),
            title: placed.block.title.clone(),
            price: placed.block.price.clone(),
            segments: placed
                .block
                .rows
                .iter()
                .map(|[boarding, line, alighting]| SegmentResult {
                    boarding: boarding.clone(),
                    line: line.clone(),
                    alighting: alighting.clone(),
                })
                .collect(),
        }
    }
}

/// Response to a route search.
#[derive(Debug, Serialize)]
pub struct RouteSearchResponse {
    /// Output sheet name
    pub sheet: String,

    /// Stations used, in travel order
    pub stations: Vec<StationResult>,

    /// Routes written, left to right
    pub routes: Vec<RouteResult>,
}

impl RouteSearchResponse {
    pub fn from_report(report: &RunReport) -> Self {
        Self {
            sheet: report.sheet.clone(),
            stations: report.stations.iter().map(StationResult::from_station).collect(),
            routes: report.blocks.iter().map(RouteResult::from_placed).collect(),
        }
    }
}

/// Response listing sheets.
#[derive(Debug, Serialize)]
pub struct SheetListResponse {
    pub sheets: Vec<String>,
}

/// Sheet contents as a grid of strings.
#[derive(Debug, Serialize)]
pub struct SheetResponse {
    pub name: String,
    pub rows: Vec<Vec<String>>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,

    /// Names to choose from, when the error is an ambiguous station
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub candidates: Vec<String>,
}

/// Parse a 1-based input position from the URL.
pub fn parse_slot(raw: &str) -> Option<InputSlot> {
    raw.parse::<usize>()
        .ok()
        .and_then(|position| position.checked_sub(1))
        .and_then(InputSlot::from_index)
}
