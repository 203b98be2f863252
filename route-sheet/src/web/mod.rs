//! Web layer for route lookups.
//!
//! Serves the workbook over HTTP: edit the input cells, run a search, and
//! view the resulting sheets.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::{AppState, Planner};
pub use templates::*;
