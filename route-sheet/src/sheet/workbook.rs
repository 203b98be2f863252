//! Workbook abstraction and the in-memory implementation.
//!
//! [`Workbook`] is the seam between route lookups and whatever hosts the
//! cells: a real spreadsheet, or the [`MemoryWorkbook`] served by the web
//! layer. Coordinates are zero-based.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Errors from workbook operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorkbookError {
    /// No sheet with this name
    #[error("sheet not found: {0}")]
    SheetNotFound(String),

    /// A sheet with this name already exists
    #[error("sheet already exists: {0}")]
    SheetExists(String),

    /// Sheet names must be non-empty
    #[error("invalid sheet name: {0:?}")]
    InvalidSheetName(String),

    /// Value rejected by the cell's choice list
    #[error("{value:?} is not one of the choices for {sheet}!{cell}")]
    InvalidChoice {
        sheet: String,
        cell: CellRef,
        value: String,
    },

    /// Saving or loading the workbook failed
    #[error("storage error: {message}")]
    Storage { message: String },
}

/// A zero-based cell coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellRef {
    pub row: usize,
    pub col: usize,
}

impl CellRef {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Offset by whole rows and columns.
    pub fn offset(self, rows: usize, cols: usize) -> Self {
        Self::new(self.row + rows, self.col + cols)
    }
}

impl fmt::Display for CellRef {
    /// A1 notation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", column_letter(self.col), self.row + 1)
    }
}

/// Spreadsheet column name for a zero-based index: A..Z, AA..AZ, BA, ...
pub fn column_letter(col: usize) -> String {
    let mut n = col + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + rem as u8);
        n = (n - rem - 1) / 26;
    }
    letters.reverse();
    // Only ASCII letters were pushed
    String::from_utf8(letters).unwrap_or_default()
}

/// Notification that a user changed a cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditEvent {
    pub sheet: String,
    pub cell: CellRef,
    /// New value; `None` when the cell was cleared.
    pub value: Option<String>,
}

/// Host storage for cells, sheets and choice lists.
///
/// Empty strings and missing cells are the same thing.
pub trait Workbook {
    /// Sheet names in creation order.
    fn sheet_names(&self) -> Vec<String>;

    fn has_sheet(&self, name: &str) -> bool {
        self.sheet_names().iter().any(|n| n == name)
    }

    /// Create an empty sheet. Fails if the name is taken.
    fn create_sheet(&mut self, name: &str) -> Result<(), WorkbookError>;

    /// Read one cell. `None` when empty.
    fn read_cell(&self, sheet: &str, cell: CellRef) -> Result<Option<String>, WorkbookError>;

    /// Read the used range of a sheet starting at A1.
    fn read_rows(&self, sheet: &str) -> Result<Vec<Vec<String>>, WorkbookError>;

    /// Write a rectangular block with its top-left corner at `origin`.
    fn write_range(
        &mut self,
        sheet: &str,
        origin: CellRef,
        rows: &[Vec<String>],
    ) -> Result<(), WorkbookError>;

    /// Blank a `rows` x `cols` block at `origin`.
    fn clear_range(
        &mut self,
        sheet: &str,
        origin: CellRef,
        rows: usize,
        cols: usize,
    ) -> Result<(), WorkbookError>;

    /// Restrict a cell to a list of choices (rejecting anything else).
    fn set_choices(
        &mut self,
        sheet: &str,
        cell: CellRef,
        options: Vec<String>,
    ) -> Result<(), WorkbookError>;

    /// Remove a cell's choice list.
    fn clear_choices(&mut self, sheet: &str, cell: CellRef) -> Result<(), WorkbookError>;

    /// The cell's choice list, if any.
    fn choices(&self, sheet: &str, cell: CellRef) -> Result<Option<Vec<String>>, WorkbookError>;
}

/// A dropdown attached to one cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ChoiceRule {
    cell: CellRef,
    options: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
struct Sheet {
    name: String,
    rows: Vec<Vec<String>>,
    choices: Vec<ChoiceRule>,
}

impl Sheet {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    fn set(&mut self, cell: CellRef, value: String) {
        if value.is_empty() {
            // Don't grow the grid just to store a blank
            if let Some(slot) = self.rows.get_mut(cell.row).and_then(|r| r.get_mut(cell.col)) {
                slot.clear();
            }
            return;
        }
        if self.rows.len() <= cell.row {
            self.rows.resize_with(cell.row + 1, Vec::new);
        }
        let row = &mut self.rows[cell.row];
        if row.len() <= cell.col {
            row.resize(cell.col + 1, String::new());
        }
        row[cell.col] = value;
    }

    fn get(&self, cell: CellRef) -> Option<&str> {
        self.rows
            .get(cell.row)
            .and_then(|r| r.get(cell.col))
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Drop trailing blanks so the used range stays tight.
    fn trim(&mut self) {
        for row in &mut self.rows {
            while row.last().is_some_and(String::is_empty) {
                row.pop();
            }
        }
        while self.rows.last().is_some_and(Vec::is_empty) {
            self.rows.pop();
        }
    }
}

/// Workbook held entirely in memory.
///
/// Serializable so it can be persisted with [`super::WorkbookStore`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryWorkbook {
    sheets: Vec<Sheet>,
}

impl MemoryWorkbook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a user edit, honouring the cell's choice list.
    ///
    /// Clearing a cell is always allowed. Returns the notification the host
    /// would fire for the edit.
    pub fn user_edit(
        &mut self,
        sheet: &str,
        cell: CellRef,
        value: &str,
    ) -> Result<EditEvent, WorkbookError> {
        let value = value.trim();
        if !value.is_empty()
            && let Some(options) = self.choices(sheet, cell)?
            && !options.iter().any(|o| o == value)
        {
            return Err(WorkbookError::InvalidChoice {
                sheet: sheet.to_string(),
                cell,
                value: value.to_string(),
            });
        }

        self.sheet_mut(sheet)?.set(cell, value.to_string());
        Ok(EditEvent {
            sheet: sheet.to_string(),
            cell,
            value: (!value.is_empty()).then(|| value.to_string()),
        })
    }

    fn sheet(&self, name: &str) -> Result<&Sheet, WorkbookError> {
        self.sheets
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| WorkbookError::SheetNotFound(name.to_string()))
    }

    fn sheet_mut(&mut self, name: &str) -> Result<&mut Sheet, WorkbookError> {
        self.sheets
            .iter_mut()
            .find(|s| s.name == name)
            .ok_or_else(|| WorkbookError::SheetNotFound(name.to_string()))
    }
}

impl Workbook for MemoryWorkbook {
    fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|s| s.name.clone()).collect()
    }

    fn has_sheet(&self, name: &str) -> bool {
        self.sheets.iter().any(|s| s.name == name)
    }

    fn create_sheet(&mut self, name: &str) -> Result<(), WorkbookError> {
        if name.trim().is_empty() {
            return Err(WorkbookError::InvalidSheetName(name.to_string()));
        }
        if self.has_sheet(name) {
            return Err(WorkbookError::SheetExists(name.to_string()));
        }
        self.sheets.push(Sheet::new(name));
        Ok(())
    }

    fn read_cell(&self, sheet: &str, cell: CellRef) -> Result<Option<String>, WorkbookError> {
        Ok(self.sheet(sheet)?.get(cell).map(str::to_string))
    }

    fn read_rows(&self, sheet: &str) -> Result<Vec<Vec<String>>, WorkbookError> {
        Ok(self.sheet(sheet)?.rows.clone())
    }

    fn write_range(
        &mut self,
        sheet: &str,
        origin: CellRef,
        rows: &[Vec<String>],
    ) -> Result<(), WorkbookError> {
        let target = self.sheet_mut(sheet)?;
        for (r, row) in rows.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                target.set(origin.offset(r, c), value.clone());
            }
        }
        target.trim();
        Ok(())
    }

    fn clear_range(
        &mut self,
        sheet: &str,
        origin: CellRef,
        rows: usize,
        cols: usize,
    ) -> Result<(), WorkbookError> {
        let target = self.sheet_mut(sheet)?;
        for r in 0..rows {
            for c in 0..cols {
                target.set(origin.offset(r, c), String::new());
            }
        }
        target.trim();
        Ok(())
    }

    fn set_choices(
        &mut self,
        sheet: &str,
        cell: CellRef,
        options: Vec<String>,
    ) -> Result<(), WorkbookError> {
        let target = self.sheet_mut(sheet)?;
        target.choices.retain(|rule| rule.cell != cell);
        target.choices.push(ChoiceRule { cell, options });
        Ok(())
    }

    fn clear_choices(&mut self, sheet: &str, cell: CellRef) -> Result<(), WorkbookError> {
        self.sheet_mut(sheet)?
            .choices
            .retain(|rule| rule.cell != cell);
        Ok(())
    }

    fn choices(&self, sheet: &str, cell: CellRef) -> Result<Option<Vec<String>>, WorkbookError> {
        Ok(self
            .sheet(sheet)?
            .choices
            .iter()
            .find(|rule| rule.cell == cell)
            .map(|rule| rule.options.clone()))
    }
}
