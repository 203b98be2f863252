//! Askama templates for the web frontend.

use askama::Template;

use crate::domain::{InputSlot, Station};
use crate::sheet::column_letter;

use super::dto::StationResult;

/// Home page: input cells, their candidates, and existing sheets.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub inputs: Vec<InputView>,
    pub sheets: Vec<String>,
}

/// One sheet rendered as a table.
#[derive(Template)]
#[template(path = "sheet.html")]
pub struct SheetTemplate {
    pub sheet: SheetView,
}

/// Error page.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub title: String,
    pub message: String,
}

/// An input cell for templates.
#[derive(Debug, Clone)]
pub struct InputView {
    /// 1-based, as used in `/input/:slot`
    pub position: usize,
    pub label: String,
    pub cell: String,
    pub value: String,
    pub candidates: Vec<StationResult>,
}

impl InputView {
    pub fn new(slot: InputSlot, cell: String, value: Option<String>, candidates: &[Station]) -> Self {
        Self {
            position: slot.index() + 1,
            label: slot.label().to_string(),
            cell,
            value: value.unwrap_or_default(),
            candidates: candidates.iter().map(StationResult::from_station).collect(),
        }
    }

    pub fn has_candidates(&self) -> bool {
        !self.candidates.is_empty()
    }
}

/// Sheet contents padded to a rectangle, with column letters.
#[derive(Debug, Clone)]
pub struct SheetView {
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl SheetView {
    pub fn new(name: &str, rows: Vec<Vec<String>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();

        Self {
            name: name.to_string(),
            columns: (0..width).map(column_letter).collect(),
            rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StationCode;

    #[test]
    fn sheet_view_pads_rows() {
        let view = SheetView::new(
            "Tokyo to Shinjuku",
            vec![
                vec!["Route 1".into()],
                vec![],
                vec!["Boarding".into(), "Line".into(), "Alighting".into()],
            ],
        );

        assert_eq!(view.columns, vec!["A", "B", "C"]);
        assert!(view.rows.iter().all(|r| r.len() == 3));
        assert_eq!(view.rows[0][1], "");
    }

    #[test]
    fn empty_sheet_view() {
        let view = SheetView::new("Empty", Vec::new());
        assert!(view.is_empty());
        assert!(view.columns.is_empty());
    }

    #[test]
    fn input_view_fields() {
        let tokyo = Station::new("Tokyo", StationCode::parse("22828").unwrap());
        let view = InputView::new(InputSlot::Via2, "B3".into(), None, &[tokyo]);

        assert_eq!(view.position, 3);
        assert_eq!(view.label, "Via 2");
        assert_eq!(view.value, "");
        assert!(view.has_candidates());
    }

    #[test]
    fn sheet_template_renders_cells() {
        let html = SheetTemplate {
            sheet: SheetView::new("Tokyo to Shinjuku", vec![vec!["Route 1".into()]]),
        }
        .render()
        .unwrap();

        assert!(html.contains("Tokyo to Shinjuku"));
        assert!(html.contains("Route 1"));
    }

    #[test]
    fn index_template_lists_inputs_and_sheets() {
        let html = IndexTemplate {
            inputs: vec![InputView::new(InputSlot::Origin, "B1".into(), Some("Tokyo".into()), &[])],
            sheets: vec!["Input".into(), "Data".into()],
        }
        .render()
        .unwrap();

        assert!(html.contains("Origin"));
        assert!(html.contains("value=\"Tokyo\""));
        assert!(html.contains("/sheets/Data"));
    }
}
