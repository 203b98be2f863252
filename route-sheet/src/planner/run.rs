//! Route lookup orchestration.
//!
//! Ties the pieces together: validate the stop names, resolve each to a
//! station, search routes, then write one block per itinerary side by side
//! on a freshly created, uniquely named sheet. Also handles edits to the
//! input cells, which refresh that slot's candidates and dropdown.

use tracing::{info, warn};

use crate::domain::{DomainError, InputSlot, Station, StopRequest};
use crate::sheet::{
    CellRef, EditEvent, LookupTable, Workbook, WorkbookError, create_unique_sheet,
};

use super::config::SheetLayout;
use super::format::{FormattedBlock, format_itinerary};
use super::resolve::{ResolveError, StationResolver};
use super::source::{CourseSource, StationSource};

/// Errors that abort a run. Nothing is written to an output sheet when
/// one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RunError {
    /// Bad stop list (missing origin/destination, wrong count)
    #[error(transparent)]
    Invalid(#[from] DomainError),

    /// Entry `position` (1-based) matched no station
    #[error("no station found for entry {position} ({name})")]
    StationNotFound { position: usize, name: String },

    /// Entry matched several stations and none exactly
    #[error("entry {position} ({name}) matches several stations; pick one of: {}", candidates.join(", "))]
    AmbiguousStation {
        position: usize,
        name: String,
        candidates: Vec<String>,
    },

    #[error(transparent)]
    Workbook(#[from] WorkbookError),
}

/// An itinerary block as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedBlock {
    /// Left-most column of the block.
    pub column: usize,
    pub block: FormattedBlock,
}

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Output sheet created for this run.
    pub sheet: String,
    /// Stations used, in travel order.
    pub stations: Vec<Station>,
    pub blocks: Vec<PlacedBlock>,
}

/// What an edit notification did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// Not an input cell.
    Ignored,
    /// Input cleared; candidates and dropdown removed.
    Cleared(InputSlot),
    /// Candidates fetched and offered in the dropdown.
    Candidates(InputSlot, Vec<Station>),
}

/// Route lookups over a workbook.
pub struct RouteSheet<S> {
    source: S,
    layout: SheetLayout,
    table: LookupTable,
}

impl<S> RouteSheet<S>
where
    S: StationSource + CourseSource + Sync,
{
    pub fn new(source: S, layout: SheetLayout) -> Self {
        let table = LookupTable::new(layout.lookup_sheet.clone());
        Self {
            source,
            layout,
            table,
        }
    }

    pub fn layout(&self) -> &SheetLayout {
        &self.layout
    }

    pub fn lookup_table(&self) -> &LookupTable {
        &self.table
    }

    /// Cell holding the input for `slot`.
    pub fn input_cell(&self, slot: InputSlot) -> CellRef {
        CellRef::new(slot.index(), self.layout.input_col)
    }

    /// Create the input and lookup sheets if they're missing.
    pub fn ensure_layout<W: Workbook + ?Sized>(&self, workbook: &mut W) -> Result<(), WorkbookError> {
        if !workbook.has_sheet(&self.layout.input_sheet) {
            workbook.create_sheet(&self.layout.input_sheet)?;
            let labels: Vec<Vec<String>> = InputSlot::ALL
                .iter()
                .map(|slot| vec![slot.label().to_string()])
                .collect();
            workbook.write_range(&self.layout.input_sheet, CellRef::new(0, 0), &labels)?;
        }
        self.table.ensure(workbook)
    }

    /// Current contents of the four input cells (blank as empty string).
    pub fn read_stops<W: Workbook + ?Sized>(&self, workbook: &W) -> Result<Vec<String>, WorkbookError> {
        InputSlot::ALL
            .iter()
            .map(|&slot| {
                workbook
                    .read_cell(&self.layout.input_sheet, self.input_cell(slot))
                    .map(Option::unwrap_or_default)
            })
            .collect()
    }

    /// Run a search using the input sheet.
    pub async fn run_from_input<W: Workbook + Send>(
        &self,
        workbook: &mut W,
    ) -> Result<RunReport, RunError> {
        self.ensure_layout(workbook)?;
        let stops = self.read_stops(workbook)?;
        self.run(workbook, &stops).await
    }

    /// Look up routes through `stop_names` (2-4 entries) and write them out.
    ///
    /// Validation and resolution failures abort before any output sheet is
    /// created. A failed or empty route search still creates the sheet,
    /// with no blocks.
    pub async fn run<W, N>(&self, workbook: &mut W, stop_names: &[N]) -> Result<RunReport, RunError>
    where
        W: Workbook + Send,
        N: AsRef<str>,
    {
        let request = StopRequest::new(stop_names)?;
        self.table.ensure(workbook)?;

        let resolver = StationResolver::new(&self.source, &self.table);
        let mut stations = Vec::with_capacity(request.entries().len());
        for entry in request.entries() {
            let resolution = resolver
                .resolve(workbook, entry.slot, &entry.name)
                .await
                .map_err(|e| match e {
                    ResolveError::NotFound(name) => RunError::StationNotFound {
                        position: entry.position,
                        name,
                    },
                    ResolveError::Workbook(e) => RunError::Workbook(e),
                })?;

            let Some(station) = resolution.pick(&entry.name).cloned() else {
                let candidates = resolution.names();
                self.offer_choices(workbook, entry.slot, candidates.clone())?;
                return Err(RunError::AmbiguousStation {
                    position: entry.position,
                    name: entry.name.clone(),
                    candidates,
                });
            };
            stations.push(station);
        }

        let codes: Vec<_> = stations.iter().map(|s| s.code.clone()).collect();
        let itineraries = match self.source.search_courses(&codes).await {
            Ok(found) => found,
            Err(e) => {
                warn!(error = %e, "route search failed; writing empty result");
                Vec::new()
            }
        };

        // StopRequest guarantees at least two entries
        let base = format!(
            "{} to {}",
            stations[0].name,
            stations[stations.len() - 1].name
        );
        let sheet = create_unique_sheet(workbook, &base)?;

        let mut blocks = Vec::with_capacity(itineraries.len());
        for (index, itinerary) in &itineraries {
            let block = format_itinerary(itinerary, *index);
            let column = index * self.layout.block_stride;
            workbook.write_range(&sheet, CellRef::new(0, column), &block.to_grid())?;
            blocks.push(PlacedBlock { column, block });
        }

        info!(sheet = %sheet, routes = blocks.len(), "route search written");
        Ok(RunReport {
            sheet,
            stations,
            blocks,
        })
    }

    /// React to a user edit.
    ///
    /// Only the input cells react. Clearing one removes its dropdown and
    /// cached candidates. Entering a name searches for candidates, caches
    /// them and offers their names as the cell's choices.
    pub async fn on_edit<W: Workbook + Send>(
        &self,
        workbook: &mut W,
        event: &EditEvent,
    ) -> Result<EditOutcome, RunError> {
        if event.sheet != self.layout.input_sheet || event.cell.col != self.layout.input_col {
            return Ok(EditOutcome::Ignored);
        }
        let Some(slot) = InputSlot::from_index(event.cell.row) else {
            return Ok(EditOutcome::Ignored);
        };

        self.table.ensure(workbook)?;

        let Some(value) = event.value.as_deref().map(str::trim).filter(|v| !v.is_empty()) else {
            workbook.clear_choices(&self.layout.input_sheet, event.cell)?;
            self.table.clear(workbook, slot)?;
            return Ok(EditOutcome::Cleared(slot));
        };

        let resolver = StationResolver::new(&self.source, &self.table);
        let candidates = resolver.refresh(workbook, slot, value).await?;

        let names = candidates.iter().map(|s| s.name.clone()).collect();
        self.offer_choices(workbook, slot, names)?;

        Ok(EditOutcome::Candidates(slot, candidates))
    }

    /// Set the dropdown on `slot`'s input cell; no names removes it.
    fn offer_choices<W: Workbook + ?Sized>(
        &self,
        workbook: &mut W,
        slot: InputSlot,
        names: Vec<String>,
    ) -> Result<(), WorkbookError> {
        let sheet = &self.layout.input_sheet;
        if !workbook.has_sheet(sheet) {
            return Ok(());
        }
        let cell = self.input_cell(slot);
        if names.is_empty() {
            workbook.clear_choices(sheet, cell)
        } else {
            workbook.set_choices(sheet, cell, names)
        }
    }
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
