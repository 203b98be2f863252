//! Train route lookup over a spreadsheet.
//!
//! Stop names typed into an input sheet are resolved against the Ekispert
//! station search, and the routes between them are written out as
//! side-by-side tables on a new sheet.

pub mod domain;
pub mod ekispert;
pub mod planner;
pub mod sheet;
pub mod web;
