//! Ekispert API response DTOs.
//!
//! These types map directly to the Ekispert JSON responses. The API
//! serializes a one-element list as a bare object rather than an array,
//! so every list-valued field goes through [`one_or_many`] and comes out
//! as a plain `Vec`, never as "object or array".

use serde::{Deserialize, Deserializer};

/// A JSON field that is either a single value or an array of values.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    /// Flatten into an ordered sequence.
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}

impl<T> From<OneOrMany<T>> for Vec<T> {
    fn from(value: OneOrMany<T>) -> Self {
        value.into_vec()
    }
}

/// Normalize an optional object-or-array value. Absent yields empty.
pub fn normalize<T>(value: Option<OneOrMany<T>>) -> Vec<T> {
    value.map(OneOrMany::into_vec).unwrap_or_default()
}

/// `deserialize_with` adapter for object-or-array fields.
///
/// Pair with `#[serde(default)]` so a missing field also becomes empty.
pub fn one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<OneOrMany<T>>::deserialize(deserializer).map(normalize)
}

/// A number the API may send either as JSON number or numeric string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Number(u64),
    Text(String),
}

impl Amount {
    /// Numeric value, if the text form parses.
    pub fn value(&self) -> Option<u64> {
        match self {
            Amount::Number(n) => Some(*n),
            Amount::Text(s) => s.trim().parse().ok(),
        }
    }
}

// ============================================================================
// Station search (`/v1/json/station/light`)
// ============================================================================

/// Top-level station search response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StationSearchResponse {
    pub result_set: StationResultSet,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StationResultSet {
    /// Matching points. Absent when nothing matched.
    #[serde(default, deserialize_with = "one_or_many")]
    pub point: Vec<StationPoint>,
}

/// A search hit wrapping a station.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StationPoint {
    pub station: StationDto,
}

/// Station record as sent by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct StationDto {
    #[serde(rename = "Name")]
    pub name: String,
    pub code: String,
}

// ============================================================================
// Route search (`/v1/json/search/course/extreme`)
// ============================================================================

/// Top-level route search response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CourseSearchResponse {
    pub result_set: CourseResultSet,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CourseResultSet {
    /// Candidate courses in API order, left undecoded so that one
    /// badly shaped course doesn't fail the whole response.
    #[serde(default, deserialize_with = "one_or_many")]
    pub course: Vec<serde_json::Value>,
}

/// One candidate itinerary.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CourseDto {
    /// Fare breakdown entries.
    #[serde(default, deserialize_with = "one_or_many")]
    pub price: Vec<PriceDto>,

    /// Route records. Usually one, but may be several.
    #[serde(default, deserialize_with = "one_or_many")]
    pub route: Vec<RouteDto>,
}

/// A fare entry. Only `FareSummary` entries matter to us.
#[derive(Debug, Clone, Deserialize)]
pub struct PriceDto {
    pub kind: Option<String>,

    #[serde(rename = "Oneway")]
    pub oneway: Option<Amount>,
}

/// Stop-points and the lines connecting them.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RouteDto {
    #[serde(default, deserialize_with = "one_or_many")]
    pub line: Vec<LineDto>,

    #[serde(default, deserialize_with = "one_or_many")]
    pub point: Vec<RoutePointDto>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LineDto {
    pub name: Option<String>,
}

/// A stop-point on a route.
///
/// Station stops carry a `Station`; other points (e.g. a landmark at the
/// start of a walk) carry only a `Name`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RoutePointDto {
    pub station: Option<RoutePointStation>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RoutePointStation {
    pub name: Option<String>,
}

impl RoutePointDto {
    /// Display name of the point, station name first.
    pub fn display_name(&self) -> Option<&str> {
        self.station
            .as_ref()
            .and_then(|s| s.name.as_deref())
            .or(self.name.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_object_becomes_one_element() {
        let json = r#"{"ResultSet":{"Point":{"Station":{"Name":"Tokyo","code":"22828"}}}}"#;
        let resp: StationSearchResponse = serde_json::from_str(json).unwrap();

        assert_eq!(resp.result_set.point.len(), 1);
        assert_eq!(resp.result_set.point[0].station.name, "Tokyo");
        assert_eq!(resp.result_set.point[0].station.code, "22828");
    }

    #[test]
    fn array_is_kept_in_order() {
        let json = r#"{"ResultSet":{"Point":[
            {"Station":{"Name":"Shinjuku","code":"22741"}},
            {"Station":{"Name":"Shinjuku-sanchome","code":"22742"}}
        ]}}"#;
        let resp: StationSearchResponse = serde_json::from_str(json).unwrap();

        let names: Vec<_> = resp
            .result_set
            .point
            .iter()
            .map(|p| p.station.name.as_str())
            .collect();
        assert_eq!(names, vec!["Shinjuku", "Shinjuku-sanchome"]);
    }

    #[test]
    fn missing_field_is_empty() {
        let json = r#"{"ResultSet":{"apiVersion":"1.27.0.0","engineVersion":"202410_01a"}}"#;
        let resp: StationSearchResponse = serde_json::from_str(json).unwrap();
        assert!(resp.result_set.point.is_empty());

        let resp: CourseSearchResponse = serde_json::from_str(json).unwrap();
        assert!(resp.result_set.course.is_empty());
    }

    #[test]
    fn badly_shaped_course_still_parses_response() {
        let json = r#"{"ResultSet":{"Course":[{"Route":"x"},{"Price":{"Oneway":1.5}}]}}"#;
        let resp: CourseSearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.result_set.course.len(), 2);

        let json = r#"{"ResultSet":{"Course":{"Route":{}}}}"#;
        let resp: CourseSearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.result_set.course.len(), 1);
    }

    #[test]
    fn null_field_is_empty() {
        let json = r#"{"ResultSet":{"Point":null}}"#;
        let resp: StationSearchResponse = serde_json::from_str(json).unwrap();
        assert!(resp.result_set.point.is_empty());
    }

    #[test]
    fn amount_accepts_number_and_string() {
        let a: Amount = serde_json::from_str("850").unwrap();
        assert_eq!(a.value(), Some(850));

        let a: Amount = serde_json::from_str("\"850\"").unwrap();
        assert_eq!(a.value(), Some(850));

        let a: Amount = serde_json::from_str("\"n/a\"").unwrap();
        assert_eq!(a.value(), None);
    }

    #[test]
    fn course_with_singular_route_point_line() {
        let json = r#"{
            "Price": {"kind": "FareSummary", "Oneway": "210"},
            "Route": {
                "Line": {"Name": "JR Chuo Line (Rapid)"},
                "Point": [
                    {"Station": {"Name": "Tokyo", "code": "22828"}},
                    {"Station": {"Name": "Shinjuku", "code": "22741"}}
                ]
            }
        }"#;
        let course: CourseDto = serde_json::from_str(json).unwrap();

        assert_eq!(course.price.len(), 1);
        assert_eq!(course.route.len(), 1);
        assert_eq!(course.route[0].line.len(), 1);
        assert_eq!(course.route[0].point.len(), 2);
    }

    #[test]
    fn point_name_falls_back_to_bare_name() {
        let json = r#"{"Name": "Tokyo Tower"}"#;
        let point: RoutePointDto = serde_json::from_str(json).unwrap();
        assert_eq!(point.display_name(), Some("Tokyo Tower"));

        let json = r#"{"Station": {"Name": "Tokyo"}, "Name": "ignored"}"#;
        let point: RoutePointDto = serde_json::from_str(json).unwrap();
        assert_eq!(point.display_name(), Some("Tokyo"));
    }
}
