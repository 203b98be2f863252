//! Station lookup table kept in a sheet.
//!
//! Each input slot owns two adjacent columns (name, code) on the lookup
//! sheet: slot 0 uses A:B, slot 1 C:D, and so on. Row 0 holds headers and
//! candidates start at row 1. The table doubles as the cache consulted
//! before the remote station search and as the source of dropdown choices.

use tracing::debug;

use crate::domain::{InputSlot, Station, StationCode, same_name};

use super::workbook::{CellRef, Workbook, WorkbookError};

/// First row holding candidates.
const FIRST_ROW: usize = 1;

/// Name/code table on the lookup sheet.
#[derive(Debug, Clone)]
pub struct LookupTable {
    sheet: String,
}

impl LookupTable {
    pub fn new(sheet: impl Into<String>) -> Self {
        Self {
            sheet: sheet.into(),
        }
    }

    pub fn sheet(&self) -> &str {
        &self.sheet
    }

    /// Name column for a slot; the code sits one to the right.
    fn name_col(slot: InputSlot) -> usize {
        slot.index() * 2
    }

    /// Create the sheet with its header row if it's missing.
    pub fn ensure<W: Workbook + ?Sized>(&self, workbook: &mut W) -> Result<(), WorkbookError> {
        if workbook.has_sheet(&self.sheet) {
            return Ok(());
        }
        workbook.create_sheet(&self.sheet)?;

        let header: Vec<String> = InputSlot::ALL
            .iter()
            .flat_map(|slot| [slot.label().to_string(), format!("{} code", slot.label())])
            .collect();
        workbook.write_range(&self.sheet, CellRef::new(0, 0), &[header])
    }

    /// Find a cached station by name.
    ///
    /// Scans every slot's name column row by row. An exact match (ignoring
    /// case) wins. Otherwise a name containing `name` is used only when it
    /// is the sole such station; several partial matches are a miss so the
    /// caller asks again instead of guessing. Rows whose code isn't usable
    /// are ignored.
    pub fn find<W: Workbook + ?Sized>(
        &self,
        workbook: &W,
        name: &str,
    ) -> Result<Option<Station>, WorkbookError> {
        let needle = name.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(None);
        }

        let rows = workbook.read_rows(&self.sheet)?;
        let entries: Vec<Station> = rows
            .iter()
            .skip(FIRST_ROW)
            .flat_map(|row| row.chunks(2).filter_map(station_from_pair))
            .collect();

        if let Some(exact) = entries.iter().find(|s| same_name(&s.name, &needle)) {
            debug!(name, code = %exact.code, "lookup table exact hit");
            return Ok(Some(exact.clone()));
        }

        let mut partial: Vec<&Station> = entries
            .iter()
            .filter(|s| s.name.to_lowercase().contains(&needle))
            .collect();
        // The same station may be cached under several slots
        partial.sort_by(|a, b| a.code.as_str().cmp(b.code.as_str()));
        partial.dedup_by(|a, b| a.code == b.code);

        let hit = match partial.as_slice() {
            [only] => Some((*only).clone()),
            _ => None,
        };

        debug!(name, hit = hit.is_some(), "lookup table");
        Ok(hit)
    }

    /// Candidates cached for a slot, in stored order.
    pub fn candidates<W: Workbook + ?Sized>(
        &self,
        workbook: &W,
        slot: InputSlot,
    ) -> Result<Vec<Station>, WorkbookError> {
        let col = Self::name_col(slot);
        let rows = workbook.read_rows(&self.sheet)?;

        Ok(rows
            .iter()
            .skip(FIRST_ROW)
            .filter_map(|row| row.get(col..).and_then(station_from_pair))
            .collect())
    }

    /// Replace a slot's candidates.
    pub fn store<W: Workbook + ?Sized>(
        &self,
        workbook: &mut W,
        slot: InputSlot,
        stations: &[Station],
    ) -> Result<(), WorkbookError> {
        self.clear(workbook, slot)?;

        let rows: Vec<Vec<String>> = stations
            .iter()
            .map(|s| vec![s.name.clone(), s.code.to_string()])
            .collect();
        workbook.write_range(
            &self.sheet,
            CellRef::new(FIRST_ROW, Self::name_col(slot)),
            &rows,
        )
    }

    /// Blank a slot's candidates.
    pub fn clear<W: Workbook + ?Sized>(
        &self,
        workbook: &mut W,
        slot: InputSlot,
    ) -> Result<(), WorkbookError> {
        let used = workbook.read_rows(&self.sheet)?.len();
        if used <= FIRST_ROW {
            return Ok(());
        }
        workbook.clear_range(
            &self.sheet,
            CellRef::new(FIRST_ROW, Self::name_col(slot)),
            used - FIRST_ROW,
            2,
        )
    }
}

/// Parse a (name, code) cell pair.
fn station_from_pair(pair: &[String]) -> Option<Station> {
    let name = pair.first()?.trim();
    let code = StationCode::parse(pair.get(1)?).ok()?;
    (!name.is_empty()).then(|| Station::new(name, code))
}
