//! Application state for the web layer.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::warn;

use crate::planner::{Backend, CachedSource, RouteSheet};
use crate::sheet::{MemoryWorkbook, WorkbookError, WorkbookStore};

/// Route lookups over the configured Ekispert backend.
pub type Planner = RouteSheet<CachedSource<Backend>>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Route lookups
    pub planner: Arc<Planner>,

    /// The workbook; held for the whole of a request that touches it
    pub workbook: Arc<Mutex<MemoryWorkbook>>,

    /// Where to persist the workbook, if anywhere
    pub store: Option<Arc<WorkbookStore>>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(planner: Planner, workbook: MemoryWorkbook, store: Option<WorkbookStore>) -> Self {
        Self {
            planner: Arc::new(planner),
            workbook: Arc::new(Mutex::new(workbook)),
            store: store.map(Arc::new),
        }
    }

    /// Persist the workbook if a store is configured.
    ///
    /// Failures are logged and returned; the in-memory state is kept either way.
    pub fn persist(&self, workbook: &MemoryWorkbook) -> Result<(), WorkbookError> {
        let Some(store) = &self.store else {
            return Ok(());
        };
        store.save(workbook).inspect_err(|e| {
            warn!(path = %store.path().display(), error = %e, "failed to save workbook");
        })
    }
}
