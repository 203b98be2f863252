//! Itinerary types.

use std::fmt;

/// A fare in whole yen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fare(pub u64);

impl Fare {
    pub fn yen(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Fare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "¥{}", self.0)
    }
}

/// One ride between two stop-points on a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub boarding: String,
    pub line: String,
    pub alighting: String,
}

impl Segment {
    pub fn new(
        boarding: impl Into<String>,
        line: impl Into<String>,
        alighting: impl Into<String>,
    ) -> Self {
        Self {
            boarding: boarding.into(),
            line: line.into(),
            alighting: alighting.into(),
        }
    }
}

/// Error returned when stop-points and lines don't pair up.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("route has {points} stop-points but {lines} lines (expected {expected} points)")]
pub struct SegmentMismatch {
    pub points: usize,
    pub lines: usize,
    pub expected: usize,
}

/// Pair consecutive stop-points with the lines connecting them.
///
/// For points P0..Pn and lines L0..Ln-1, segment i is (P_i, L_i, P_{i+1}).
/// A route with no lines and a single point yields no segments.
pub fn pair_segments(points: &[String], lines: &[String]) -> Result<Vec<Segment>, SegmentMismatch> {
    if points.len() != lines.len() + 1 {
        return Err(SegmentMismatch {
            points: points.len(),
            lines: lines.len(),
            expected: lines.len() + 1,
        });
    }

    Ok(lines
        .iter()
        .enumerate()
        .map(|(i, line)| Segment::new(&points[i], line, &points[i + 1]))
        .collect())
}

/// One candidate itinerary returned by a route search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Itinerary {
    /// One-way total fare (zero when the search reported none).
    pub price: Fare,
    /// Rides in travel order.
    pub segments: Vec<Segment>,
}

impl Itinerary {
    pub fn new(price: Fare, segments: Vec<Segment>) -> Self {
        Self { price, segments }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(xs: &[&str]) -> Vec<String> {
        xs.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn pairs_adjacent_points() {
        let points = names(&["Tokyo", "Kanda", "Shinjuku"]);
        let lines = names(&["JR Yamanote Line", "JR Chuo Line (Rapid)"]);

        let segments = pair_segments(&points, &lines).unwrap();

        assert_eq!(
            segments,
            vec![
                Segment::new("Tokyo", "JR Yamanote Line", "Kanda"),
                Segment::new("Kanda", "JR Chuo Line (Rapid)", "Shinjuku"),
            ]
        );
    }

    #[test]
    fn single_point_no_lines_is_empty() {
        let segments = pair_segments(&names(&["Tokyo"]), &[]).unwrap();
        assert!(segments.is_empty());
    }

    #[test]
    fn too_few_points_is_error() {
        let err = pair_segments(&names(&["Tokyo"]), &names(&["JR Chuo Line"])).unwrap_err();
        assert_eq!(err.points, 1);
        assert_eq!(err.lines, 1);
        assert_eq!(err.expected, 2);
    }

    #[test]
    fn too_many_points_is_error() {
        let points = names(&["A", "B", "C"]);
        assert!(pair_segments(&points, &names(&["L"])).is_err());
    }

    #[test]
    fn fare_display() {
        assert_eq!(Fare(850).to_string(), "¥850");
        assert_eq!(Fare::default().to_string(), "¥0");
    }

    #[test]
    fn mismatch_message() {
        let err = SegmentMismatch {
            points: 1,
            lines: 2,
            expected: 3,
        };
        assert_eq!(
            err.to_string(),
            "route has 1 stop-points but 2 lines (expected 3 points)"
        );
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// N points and N-1 lines always give N-1 segments chained point to point.
        #[test]
        fn segments_chain_points(points in proptest::collection::vec("[a-z]{1,8}", 1..10)) {
            let lines: Vec<String> = (0..points.len() - 1).map(|i| format!("L{i}")).collect();
            let segments = pair_segments(&points, &lines).unwrap();

            prop_assert_eq!(segments.len(), points.len() - 1);
            for (i, seg) in segments.iter().enumerate() {
                prop_assert_eq!(&seg.boarding, &points[i]);
                prop_assert_eq!(&seg.line, &lines[i]);
                prop_assert_eq!(&seg.alighting, &points[i + 1]);
            }
        }
    }
}
