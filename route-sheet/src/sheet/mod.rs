//! Spreadsheet host abstraction.
//!
//! Route lookups read and write cells through the [`Workbook`] trait so any
//! spreadsheet backend can host them. [`MemoryWorkbook`] is the built-in
//! backend, persisted with [`WorkbookStore`].

mod lookup;
mod namer;
mod store;
mod workbook;

pub use lookup::LookupTable;
pub use namer::{create_unique_sheet, unique_name};
pub use store::{WorkbookStore, WorkbookStoreConfig};
pub use workbook::{CellRef, EditEvent, MemoryWorkbook, Workbook, WorkbookError, column_letter};
