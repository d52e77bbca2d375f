//! Spreadsheet access.
//!
//! Opens a workbook, selects one named sheet and exposes it as a grid of
//! [`Cell`] values addressed by absolute row and column, row 0 being the
//! header row.

use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;
use tracing::{debug, info};

use crate::error::{ImportError, ImportResult};

/// The value of one spreadsheet cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Number(f64),
    Text(String),
    Empty,
}

static EMPTY_CELL: Cell = Cell::Empty;

impl From<&Data> for Cell {
    fn from(data: &Data) -> Self {
        match data {
            Data::Int(i) => Cell::Number(*i as f64),
            Data::Float(f) => Cell::Number(*f),
            Data::Bool(b) => Cell::Number(if *b { 1.0 } else { 0.0 }),
            Data::DateTime(dt) => Cell::Number(dt.as_f64()),
            Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
            Data::Error(_) | Data::Empty => Cell::Empty,
        }
    }
}

/// One worksheet loaded in memory.
#[derive(Debug, Clone)]
pub struct SheetGrid {
    name: String,
    rows: Vec<Vec<Cell>>,
}

impl SheetGrid {
    /// Build a grid from rows of cells; row 0 is the header.
    pub fn from_rows(name: impl Into<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of rows, header included.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Cell at `(row, column)`; anything outside the sheet reads as empty.
    pub fn cell(&self, row: usize, column: usize) -> &Cell {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .unwrap_or(&EMPTY_CELL)
    }

    /// Indices of every row after the header.
    pub fn data_rows(&self) -> std::ops::Range<usize> {
        1..self.row_count().max(1)
    }
}

/// Open `path` and load the sheet called `sheet_name`.
///
/// # Errors
/// * [`ImportError::SourceNotFound`] when the path is empty or missing
/// * [`ImportError::SheetNotFound`] when the workbook has no such sheet
/// * [`ImportError::Workbook`] when the file cannot be parsed
pub fn open_sheet(path: &Path, sheet_name: &str) -> ImportResult<SheetGrid> {
    if path.as_os_str().is_empty() || !path.exists() {
        return Err(ImportError::SourceNotFound(path.to_path_buf()));
    }

    let mut workbook = open_workbook_auto(path).map_err(|e| ImportError::Workbook {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let sheet_names = workbook.sheet_names();
    info!("Sheet names in {}: {:?}", path.display(), sheet_names);
    if !sheet_names.iter().any(|name| name == sheet_name) {
        return Err(ImportError::SheetNotFound {
            path: path.to_path_buf(),
            sheet: sheet_name.to_string(),
            available: sheet_names,
        });
    }

    let range = workbook
        .worksheet_range(sheet_name)
        .map_err(|e| ImportError::Workbook {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    // Addressing is absolute so that column indices stay fixed even when
    // the used range of the sheet does not start at A1.
    let rows = match range.end() {
        Some((last_row, last_column)) => (0..=last_row)
            .map(|row| {
                (0..=last_column)
                    .map(|column| range.get_value((row, column)).map_or(Cell::Empty, Cell::from))
                    .collect()
            })
            .collect(),
        None => Vec::new(),
    };

    let grid = SheetGrid::from_rows(sheet_name, rows);
    debug!(sheet = sheet_name, rows = grid.row_count(), "Loaded sheet");
    Ok(grid)
}
