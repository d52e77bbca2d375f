//! Per-row extraction of typed, trimmed fields from a sheet.

use crate::accessibility::AccessibilityFeature;
use crate::error::FieldError;
use crate::sheet_reader::{Cell, SheetGrid};

/// Code used when a numeric code cell is missing.
pub const MISSING_CODE: &str = "-1";

/// Column layout of the routes sheet.
pub mod route_columns {
    pub const STIF_CODE: usize = 0;
    pub const ROUTE_NUMBER: usize = 1;
    pub const ORIGIN: usize = 2;
    pub const DESTINATION: usize = 3;
    pub const WHEELCHAIR: usize = 4;
    pub const NEXT_STOP_VOCAL: usize = 7;
    pub const NEXT_STOP_VISUAL: usize = 8;
}

/// Column layout of the stops sheet.
pub mod stop_columns {
    pub const NAME: usize = 2;
    pub const WHEELCHAIR: usize = 6;
    pub const NEXT_BUS_VOCAL: usize = 7;
    pub const NEXT_BUS_VISUAL: usize = 8;
    pub const DISRUPTION_VOCAL: usize = 9;
    pub const DISRUPTION_VISUAL: usize = 10;
    pub const STIF_CODE: usize = 15;
    pub const DIRECTION: usize = 16;
}

/// Normalized content of one routes-sheet row.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteFields {
    pub stif_code: String,
    pub route_number: String,
    pub origin: String,
    pub destination: String,
    pub flags: Vec<(AccessibilityFeature, i64)>,
}

/// Normalized content of one stops-sheet row.
#[derive(Debug, Clone, PartialEq)]
pub struct StopFields {
    pub name: String,
    pub direction: String,
    pub stif_code: String,
    pub flags: Vec<(AccessibilityFeature, i64)>,
}

/// Trimmed text; empty cells give an empty string.
pub fn text_field(cell: &Cell) -> String {
    match cell {
        Cell::Text(s) => s.trim().to_string(),
        Cell::Number(n) => format_number(*n),
        Cell::Empty => String::new(),
    }
}

/// A code that may have been typed as a number: `1001000540001.0` becomes
/// `"1001000540001"`. Missing codes become [`MISSING_CODE`].
pub fn code_field(cell: &Cell) -> String {
    match cell {
        Cell::Number(n) => format!("{:.0}", n),
        Cell::Text(s) if !s.trim().is_empty() => s.trim().to_string(),
        Cell::Text(_) | Cell::Empty => MISSING_CODE.to_string(),
    }
}

/// Like [`code_field`] but a missing value stays empty.
pub fn number_text_field(cell: &Cell) -> String {
    match cell {
        Cell::Number(n) => format!("{:.0}", n),
        Cell::Text(s) => s.trim().to_string(),
        Cell::Empty => String::new(),
    }
}

/// Integer value of a flag cell, truncating fractions. Empty means `0`.
pub fn flag_field(cell: &Cell, column: usize) -> Result<i64, FieldError> {
    match cell {
        Cell::Empty => Ok(0),
        Cell::Number(n) => Ok(n.trunc() as i64),
        Cell::Text(s) => {
            let s = s.trim();
            if s.is_empty() {
                return Ok(0);
            }
            s.parse::<i64>()
                .or_else(|_| s.parse::<f64>().map(|n| n.trunc() as i64))
                .map_err(|_| FieldError::NotAFlag {
                    column,
                    value: s.to_string(),
                })
        }
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 {
        format!("{:.0}", n)
    } else {
        n.to_string()
    }
}

/// Extract the fields of routes-sheet row `row`.
pub fn normalize_route_row(sheet: &SheetGrid, row: usize) -> Result<RouteFields, FieldError> {
    use route_columns::*;

    let flag = |column: usize| flag_field(sheet.cell(row, column), column);
    let flags = vec![
        (AccessibilityFeature::Wheelchair, flag(WHEELCHAIR)?),
        (AccessibilityFeature::NextStopVisual, flag(NEXT_STOP_VISUAL)?),
        (AccessibilityFeature::NextStopVocal, flag(NEXT_STOP_VOCAL)?),
    ];

    Ok(RouteFields {
        stif_code: code_field(sheet.cell(row, STIF_CODE)),
        route_number: number_text_field(sheet.cell(row, ROUTE_NUMBER)),
        origin: text_field(sheet.cell(row, ORIGIN)),
        destination: text_field(sheet.cell(row, DESTINATION)),
        flags,
    })
}

/// Extract the fields of stops-sheet row `row`.
///
/// Rows whose stop name is not text are separators or junk and are
/// reported as [`FieldError::NotText`].
pub fn normalize_stop_row(sheet: &SheetGrid, row: usize) -> Result<StopFields, FieldError> {
    use stop_columns::*;

    let name = match sheet.cell(row, NAME) {
        Cell::Text(s) => s.trim().to_string(),
        other => {
            return Err(FieldError::NotText {
                column: NAME,
                value: format!("{:?}", other),
            })
        }
    };

    let flag = |column: usize| flag_field(sheet.cell(row, column), column);
    let flags = vec![
        (AccessibilityFeature::Wheelchair, flag(WHEELCHAIR)?),
        (AccessibilityFeature::NextBusVisual, flag(NEXT_BUS_VISUAL)?),
        (AccessibilityFeature::NextBusVocal, flag(NEXT_BUS_VOCAL)?),
        (AccessibilityFeature::DisruptionVocal, flag(DISRUPTION_VOCAL)?),
        (AccessibilityFeature::DisruptionVisual, flag(DISRUPTION_VISUAL)?),
    ];

    Ok(StopFields {
        name,
        direction: text_field(sheet.cell(row, DIRECTION)),
        stif_code: code_field(sheet.cell(row, STIF_CODE)),
        flags,
    })
}
