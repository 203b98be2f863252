//! HTTP route handlers.

use askama::Template;
use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post, put},
};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::domain::InputSlot;
use crate::planner::{EditOutcome, RunError};
use crate::sheet::{Workbook, WorkbookError};

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/input/:slot", put(put_input))
        .route("/routes/search", post(search_routes))
        .route("/sheets", get(list_sheets))
        .route("/sheets/:name", get(show_sheet))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Index page: input cells with their candidates, and the sheet list.
async fn index_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let workbook = state.workbook.lock().await;
    let planner = &state.planner;
    let layout = planner.layout();

    let mut inputs = Vec::with_capacity(InputSlot::ALL.len());
    for slot in InputSlot::ALL {
        let cell = planner.input_cell(slot);
        let value = workbook.read_cell(&layout.input_sheet, cell)?;
        let candidates = planner.lookup_table().candidates(&*workbook, slot)?;
        inputs.push(InputView::new(slot, cell.to_string(), value, &candidates));
    }

    let template = IndexTemplate {
        inputs,
        sheets: workbook.sheet_names(),
    };
    let html = template.render().map_err(|e| AppError::Internal {
        message: format!("Template error: {}", e),
    })?;
    Ok(Html(html))
}

/// Write an input cell and handle the edit.
async fn put_input(
    State(state): State<AppState>,
    Path(slot): Path<String>,
    Json(req): Json<InputRequest>,
) -> Result<Json<InputResponse>, AppError> {
    let slot = parse_slot(&slot).ok_or_else(|| AppError::BadRequest {
        message: format!("Invalid input slot: {} (expected 1-4)", slot),
    })?;

    let mut workbook = state.workbook.lock().await;
    let planner = &state.planner;
    let input_sheet = planner.layout().input_sheet.clone();
    let cell = planner.input_cell(slot);

    let value = req.value.unwrap_or_default();
    let event = workbook.user_edit(&input_sheet, cell, &value)?;
    let outcome = planner.on_edit(&mut *workbook, &event).await;
    state.persist(&workbook)?;

    let (handled, candidates) = match outcome? {
        EditOutcome::Ignored => (false, Vec::new()),
        EditOutcome::Cleared(_) => (true, Vec::new()),
        EditOutcome::Candidates(_, stations) => (true, stations),
    };

    Ok(Json(InputResponse {
        slot: slot.label().to_string(),
        cell: cell.to_string(),
        value: event.value,
        candidates: candidates.iter().map(StationResult::from_station).collect(),
        handled,
    }))
}

/// Parse the search body. An empty body means "use the input sheet".
fn parse_search_body(body: &[u8]) -> Result<Option<Vec<String>>, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    let req: RouteSearchRequest =
        serde_json::from_slice(body).map_err(|e| AppError::BadRequest {
            message: format!("Invalid request body: {}", e),
        })?;
    Ok(req.stops)
}

/// Run a route search, from the input sheet or the given stops.
async fn search_routes(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<RouteSearchResponse>, AppError> {
    let stops = parse_search_body(&body)?;

    let mut workbook = state.workbook.lock().await;
    let planner = &state.planner;
    let result = match &stops {
        Some(stops) => planner.run(&mut *workbook, stops).await,
        None => planner.run_from_input(&mut *workbook).await,
    };
    // Failed runs can still have cached candidates
    state.persist(&workbook)?;

    let report = result?;
    info!(sheet = %report.sheet, routes = report.blocks.len(), "route search complete");
    Ok(Json(RouteSearchResponse::from_report(&report)))
}

/// List sheet names in workbook order.
async fn list_sheets(State(state): State<AppState>) -> Json<SheetListResponse> {
    let workbook = state.workbook.lock().await;
    Json(SheetListResponse {
        sheets: workbook.sheet_names(),
    })
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// Show one sheet.
async fn show_sheet(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(name): Path<String>,
) -> Result<Response, AppError> {
    let rows = {
        let workbook = state.workbook.lock().await;
        workbook.read_rows(&name)
    };

    // Return HTML or JSON based on Accept header
    if accepts_html(&headers) {
        let (status, html) = match rows {
            Ok(rows) => (
                StatusCode::OK,
                SheetTemplate {
                    sheet: SheetView::new(&name, rows),
                }
                .render(),
            ),
            Err(e) => (
                StatusCode::NOT_FOUND,
                ErrorTemplate {
                    title: "Sheet not found".to_string(),
                    message: e.to_string(),
                }
                .render(),
            ),
        };
        let html = html.map_err(|e| AppError::Internal {
            message: format!("Template error: {}", e),
        })?;

        Ok((status, Html(html)).into_response())
    } else {
        let rows = rows?;
        Ok(Json(SheetResponse { name, rows }).into_response())
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Conflict { message: String, candidates: Vec<String> },
    Internal { message: String },
}

impl From<WorkbookError> for AppError {
    fn from(e: WorkbookError) -> Self {
        match e {
            WorkbookError::SheetNotFound(_) => AppError::NotFound {
                message: e.to_string(),
            },
            WorkbookError::InvalidChoice { .. } | WorkbookError::InvalidSheetName(_) => {
                AppError::BadRequest {
                    message: e.to_string(),
                }
            }
            WorkbookError::SheetExists(_) | WorkbookError::Storage { .. } => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl From<RunError> for AppError {
    fn from(e: RunError) -> Self {
        match e {
            RunError::Invalid(_) => AppError::BadRequest {
                message: e.to_string(),
            },
            RunError::StationNotFound { .. } => AppError::NotFound {
                message: e.to_string(),
            },
            RunError::AmbiguousStation { ref candidates, .. } => AppError::Conflict {
                candidates: candidates.clone(),
                message: e.to_string(),
            },
            RunError::Workbook(e) => e.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, candidates) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message, Vec::new()),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message, Vec::new()),
            AppError::Conflict {
                message,
                candidates,
            } => (StatusCode::CONFLICT, message, candidates),
            AppError::Internal { message } => {
                (StatusCode::INTERNAL_SERVER_ERROR, message, Vec::new())
            }
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse {
            error: message,
            candidates,
        });
        (status, body).into_response()
    }
}
