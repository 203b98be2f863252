//! Sheet layout configuration.

/// Default name of the sheet holding the four input cells.
pub const DEFAULT_INPUT_SHEET: &str = "Input";

/// Default name of the sheet holding cached station candidates.
pub const DEFAULT_LOOKUP_SHEET: &str = "Data";

/// Where inputs live and how output blocks are spaced.
#[derive(Debug, Clone)]
pub struct SheetLayout {
    /// Sheet with the origin / via / destination cells.
    pub input_sheet: String,

    /// Sheet backing the station lookup table.
    pub lookup_sheet: String,

    /// Column of the input cells (rows 0-3). Column A holds labels.
    pub input_col: usize,

    /// Columns between the left edges of adjacent itinerary blocks
    /// (three data columns plus a spacer).
    pub block_stride: usize,
}

impl SheetLayout {
    pub fn new(input_sheet: impl Into<String>, lookup_sheet: impl Into<String>) -> Self {
        Self {
            input_sheet: input_sheet.into(),
            lookup_sheet: lookup_sheet.into(),
            ..Self::default()
        }
    }

    /// Set the block stride.
    pub fn with_block_stride(mut self, stride: usize) -> Self {
        self.block_stride = stride;
        self
    }
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self {
            input_sheet: DEFAULT_INPUT_SHEET.to_string(),
            lookup_sheet: DEFAULT_LOOKUP_SHEET.to_string(),
            input_col: 1,
            block_stride: 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout() {
        let layout = SheetLayout::default();

        assert_eq!(layout.input_sheet, "Input");
        assert_eq!(layout.lookup_sheet, "Data");
        assert_eq!(layout.input_col, 1);
        assert_eq!(layout.block_stride, 4);
    }

    #[test]
    fn custom_layout() {
        let layout = SheetLayout::new("Stops", "Cache").with_block_stride(5);

        assert_eq!(layout.input_sheet, "Stops");
        assert_eq!(layout.lookup_sheet, "Cache");
        assert_eq!(layout.input_col, 1);
        assert_eq!(layout.block_stride, 5);
    }
}
