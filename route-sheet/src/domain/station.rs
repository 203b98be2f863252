//! Station types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an invalid station code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station code: {reason}")]
pub struct InvalidStationCode {
    reason: &'static str,
}

/// An Ekispert station code.
///
/// Codes are opaque to us: the only guarantee is that the value is a
/// non-empty string without whitespace or `:` (which separates codes
/// in a `viaList`). They are round-tripped into the route search as-is.
///
/// # Examples
///
/// ```
/// use route_sheet::domain::StationCode;
///
/// let tokyo = StationCode::parse("22828").unwrap();
/// assert_eq!(tokyo.as_str(), "22828");
///
/// assert!(StationCode::parse("").is_err());
/// assert!(StationCode::parse("1:2").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StationCode(String);

impl StationCode {
    /// Parse a station code, trimming surrounding whitespace.
    pub fn parse(s: &str) -> Result<Self, InvalidStationCode> {
        let s = s.trim();

        if s.is_empty() {
            return Err(InvalidStationCode {
                reason: "must not be empty",
            });
        }

        if s.chars().any(|c| c == ':' || c.is_whitespace()) {
            return Err(InvalidStationCode {
                reason: "must not contain ':' or whitespace",
            });
        }

        Ok(StationCode(s.to_string()))
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for StationCode {
    type Error = InvalidStationCode;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        StationCode::parse(&value)
    }
}

impl From<StationCode> for String {
    fn from(code: StationCode) -> Self {
        code.0
    }
}

impl fmt::Debug for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationCode({})", self.0)
    }
}

impl fmt::Display for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A resolved station: display name plus its code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Station {
    pub name: String,
    pub code: StationCode,
}

impl Station {
    pub fn new(name: impl Into<String>, code: StationCode) -> Self {
        Self {
            name: name.into(),
            code,
        }
    }
}

/// Join station codes into the `viaList` form expected by the route search.
pub fn via_list(codes: &[StationCode]) -> String {
    codes
        .iter()
        .map(StationCode::as_str)
        .collect::<Vec<_>>()
        .join(":")
}

/// Whether two station names are the same, ignoring case and surrounding
/// whitespace. Case folding is Unicode-aware, so full-width Latin folds too.
pub fn same_name(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_codes() {
        assert!(StationCode::parse("22205").is_ok());
        assert!(StationCode::parse("29191").is_ok());
        assert_eq!(StationCode::parse(" 22207 ").unwrap().as_str(), "22207");
    }

    #[test]
    fn reject_empty() {
        assert!(StationCode::parse("").is_err());
        assert!(StationCode::parse("   ").is_err());
    }

    #[test]
    fn reject_separators() {
        assert!(StationCode::parse("222:05").is_err());
        assert!(StationCode::parse("222 05").is_err());
    }

    #[test]
    fn display_and_debug() {
        let code = StationCode::parse("22205").unwrap();
        assert_eq!(format!("{}", code), "22205");
        assert_eq!(format!("{:?}", code), "StationCode(22205)");
    }

    #[test]
    fn via_list_joins_in_order() {
        let codes = vec![
            StationCode::parse("22205").unwrap(),
            StationCode::parse("22671").unwrap(),
            StationCode::parse("22207").unwrap(),
        ];
        assert_eq!(via_list(&codes), "22205:22671:22207");
    }

    #[test]
    fn same_name_folds_case() {
        assert!(same_name("Tokyo", " tokyo "));
        assert!(same_name("ＴＯＫＹＯ", "ｔｏｋｙｏ"));
        assert!(!same_name("Tokyo", "Tokyo Teleport"));
    }

    #[test]
    fn deserialize_rejects_invalid() {
        let ok: Result<StationCode, _> = serde_json::from_str("\"22205\"");
        assert!(ok.is_ok());

        let bad: Result<StationCode, _> = serde_json::from_str("\"\"");
        assert!(bad.is_err());
    }
}
