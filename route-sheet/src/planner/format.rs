//! Itinerary to table-block formatting.
//!
//! A block is laid out as:
//!
//! ```text
//! row 0   Route 1
//! row 1   Total: ¥210
//! row 2   (blank)
//! row 3   Boarding | Line | Alighting
//! row 4+  one row per segment
//! ```
//!
//! Blocks know nothing about where they are placed.

use crate::domain::Itinerary;

/// Data columns in a block.
pub const BLOCK_WIDTH: usize = 3;

/// Column header labels.
pub const COLUMN_HEADER: [&str; BLOCK_WIDTH] = ["Boarding", "Line", "Alighting"];

/// Rendered form of one itinerary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedBlock {
    /// "Route N", 1-based.
    pub title: String,
    /// "Total: ¥N".
    pub price: String,
    /// (boarding, line, alighting) per segment.
    pub rows: Vec<[String; BLOCK_WIDTH]>,
}

impl FormattedBlock {
    /// Cell rows, top to bottom, ready to write at the block's origin.
    pub fn to_grid(&self) -> Vec<Vec<String>> {
        let mut grid = Vec::with_capacity(self.rows.len() + 4);
        grid.push(vec![self.title.clone()]);
        grid.push(vec![self.price.clone()]);
        grid.push(Vec::new());
        grid.push(COLUMN_HEADER.iter().map(|h| h.to_string()).collect());
        grid.extend(self.rows.iter().map(|r| r.to_vec()));
        grid
    }
}

/// Format an itinerary found at `route_index` in the search response.
pub fn format_itinerary(itinerary: &Itinerary, route_index: usize) -> FormattedBlock {
    FormattedBlock {
        title: format!("Route {}", route_index + 1),
        price: format!("Total: {}", itinerary.price),
        rows: itinerary
            .segments
            .iter()
            .map(|s| [s.boarding.clone(), s.line.clone(), s.alighting.clone()])
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Fare, Segment};

    fn itinerary() -> Itinerary {
        Itinerary::new(
            Fare(210),
            vec![
                Segment::new("Tokyo", "Tokyo Metro Marunouchi Line", "Yotsuya"),
                Segment::new("Yotsuya", "JR Chuo-Sobu Line", "Shinjuku"),
            ],
        )
    }

    #[test]
    fn labels() {
        let block = format_itinerary(&itinerary(), 0);
        assert_eq!(block.title, "Route 1");
        assert_eq!(block.price, "Total: ¥210");

        let block = format_itinerary(&itinerary(), 2);
        assert_eq!(block.title, "Route 3");
    }

    #[test]
    fn one_row_per_segment_in_order() {
        let block = format_itinerary(&itinerary(), 0);

        assert_eq!(block.rows.len(), 2);
        assert_eq!(block.rows[0], ["Tokyo", "Tokyo Metro Marunouchi Line", "Yotsuya"].map(String::from));
        assert_eq!(block.rows[1][0], block.rows[0][2]);
        assert_eq!(block.rows[1][2], "Shinjuku");
    }

    #[test]
    fn grid_layout() {
        let grid = format_itinerary(&itinerary(), 1).to_grid();

        assert_eq!(grid.len(), 6);
        assert_eq!(grid[0], vec!["Route 2"]);
        assert_eq!(grid[1], vec!["Total: ¥210"]);
        assert!(grid[2].is_empty());
        assert_eq!(grid[3], vec!["Boarding", "Line", "Alighting"]);
        assert_eq!(grid[5], vec!["Yotsuya", "JR Chuo-Sobu Line", "Shinjuku"]);
    }

    #[test]
    fn zero_price_and_no_segments() {
        let block = format_itinerary(&Itinerary::new(Fare(0), Vec::new()), 0);
        assert_eq!(block.price, "Total: ¥0");
        assert_eq!(block.to_grid().len(), 4);
    }
}
