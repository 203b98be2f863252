//! Route lookups driven from a workbook.
//!
//! Reads up to four stop names, resolves them to stations through the
//! lookup table or the remote search, and writes each itinerary found as a
//! block on a new output sheet.

mod cache;
mod config;
mod format;
mod resolve;
mod run;
mod source;

pub use cache::{CacheConfig, CachedSource};
pub use config::{DEFAULT_INPUT_SHEET, DEFAULT_LOOKUP_SHEET, SheetLayout};
pub use format::{BLOCK_WIDTH, COLUMN_HEADER, FormattedBlock, format_itinerary};
pub use resolve::{Resolution, ResolveError, StationResolver};
pub use run::{EditOutcome, PlacedBlock, RouteSheet, RunError, RunReport};
pub use source::{Backend, CourseSource, StationSource};
