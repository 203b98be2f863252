//! Station name resolution.
//!
//! Names are looked up in the lookup table first. Misses go to the remote
//! station search, whose candidates are written back to the table under
//! the input slot so later runs (and the dropdown) can reuse them.

use tracing::{debug, warn};

use crate::domain::{InputSlot, Station, same_name};
use crate::sheet::{LookupTable, Workbook, WorkbookError};

use super::source::StationSource;

/// Outcome of resolving a name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Found in the lookup table.
    Cached(Station),
    /// Fetched remotely; never empty. The caller picks one.
    Candidates(Vec<Station>),
}

impl Resolution {
    /// The station to use without asking the user, if there is one.
    ///
    /// A cache hit, a candidate whose name equals `name` (ignoring case),
    /// or the only candidate.
    pub fn pick(&self, name: &str) -> Option<&Station> {
        match self {
            Resolution::Cached(station) => Some(station),
            Resolution::Candidates(candidates) => candidates
                .iter()
                .find(|s| same_name(&s.name, name))
                .or(match candidates.as_slice() {
                    [only] => Some(only),
                    _ => None,
                }),
        }
    }

    /// Names on offer, for prompting the user.
    pub fn names(&self) -> Vec<String> {
        match self {
            Resolution::Cached(station) => vec![station.name.clone()],
            Resolution::Candidates(candidates) => {
                candidates.iter().map(|s| s.name.clone()).collect()
            }
        }
    }
}

/// Errors from name resolution.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// Neither the table nor the remote search knows the name
    #[error("no station matches {0:?}")]
    NotFound(String),

    #[error(transparent)]
    Workbook(#[from] WorkbookError),
}

/// Resolves names against the lookup table and a remote source.
pub struct StationResolver<'a, S> {
    source: &'a S,
    table: &'a LookupTable,
}

impl<'a, S: StationSource + Sync> StationResolver<'a, S> {
    pub fn new(source: &'a S, table: &'a LookupTable) -> Self {
        Self { source, table }
    }

    /// Resolve `name`, typed into `slot`.
    pub async fn resolve<W: Workbook + Send>(
        &self,
        workbook: &mut W,
        slot: InputSlot,
        name: &str,
    ) -> Result<Resolution, ResolveError> {
        if let Some(station) = self.table.find(workbook, name)? {
            debug!(name, code = %station.code, "resolved from lookup table");
            return Ok(Resolution::Cached(station));
        }

        let candidates = self.refresh(workbook, slot, name).await?;
        if candidates.is_empty() {
            return Err(ResolveError::NotFound(name.to_string()));
        }
        Ok(Resolution::Candidates(candidates))
    }

    /// Search remotely and replace the slot's cached candidates.
    ///
    /// A failed search counts as no results.
    pub async fn refresh<W: Workbook + Send>(
        &self,
        workbook: &mut W,
        slot: InputSlot,
        name: &str,
    ) -> Result<Vec<Station>, WorkbookError> {
        let candidates = match self.source.search_stations(name).await {
            Ok(stations) => stations,
            Err(e) => {
                warn!(name, error = %e, "station search failed");
                Vec::new()
            }
        };

        self.table.store(workbook, slot, &candidates)?;
        debug!(name, %slot, count = candidates.len(), "cached station candidates");
        Ok(candidates)
    }
}
