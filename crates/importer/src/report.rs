//! Summary of an import session and its JSON Lines log.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

use crate::error::ImportResult;

/// Counts gathered over an import session.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct ImportReport {
    pub database_path: String,
    pub routes_imported: usize,
    pub stops_imported: usize,
    pub route_rows_skipped: usize,
    pub stop_rows_skipped: usize,
    pub finished_at: Option<DateTime<Utc>>,
}

impl ImportReport {
    /// Rows dropped over both sheets.
    pub fn rows_skipped(&self) -> usize {
        self.route_rows_skipped + self.stop_rows_skipped
    }
}

/// Append `report` to `path` as one JSON object per line, creating the file
/// when needed, so that successive rebuilds can be compared.
pub fn append_import_report(path: &Path, report: &ImportReport) -> ImportResult<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, report).map_err(std::io::Error::from)?;
    writeln!(writer)?;
    writer.flush()?;

    info!(
        "Recorded import of {} routes and {} stops in {}",
        report.routes_imported,
        report.stops_imported,
        path.display()
    );
    Ok(())
}
