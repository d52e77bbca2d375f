//! Import driver: reads both sheets and persists routes and stops.
//!
//! A [`DataImporter`] is inert until [`DataImporter::open`] turns it into an
//! [`ImportSession`] holding the database connection. The session is closed
//! with [`ImportSession::close`]; dropping it instead still releases the
//! connection and rolls back any pass that did not reach its commit.

use chrono::Utc;
use ratp_access_db::inserts::{insert_route, insert_stop};
use ratp_access_db::pool::IN_MEMORY;
use ratp_access_db::DbPool;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, error, info, warn};

use crate::config::{ImportConfig, StaleStorePolicy};
use crate::error::{ImportError, ImportResult};
use crate::normalizer::{normalize_route_row, normalize_stop_row};
use crate::record_builder::{build_route, build_stop};
use crate::report::ImportReport;
use crate::sheet_reader::open_sheet;

/// An importer that has not touched the database yet.
pub struct DataImporter {
    config: ImportConfig,
}

/// An open import session.
pub struct ImportSession {
    config: ImportConfig,
    db: DbPool,
    report: ImportReport,
}

impl DataImporter {
    pub fn new(config: ImportConfig) -> Self {
        Self { config }
    }

    /// Connect to the database and make sure every table exists.
    pub async fn open(self) -> ImportResult<ImportSession> {
        info!("Opening import session on {}", self.config.database_path);
        let db = DbPool::open(&self.config.database_path).await?;

        let report = ImportReport {
            database_path: self.config.database_path.clone(),
            ..ImportReport::default()
        };
        Ok(ImportSession {
            config: self.config,
            db,
            report,
        })
    }
}

impl ImportSession {
    /// The database this session writes to.
    pub fn db(&self) -> &DbPool {
        &self.db
    }

    pub fn report(&self) -> &ImportReport {
        &self.report
    }

    /// Import every data row of the routes sheet in one transaction.
    ///
    /// Rows with unreadable fields are skipped. A non-numeric stif code
    /// aborts the pass before anything is committed.
    ///
    /// # Returns
    /// The number of routes written
    #[tracing::instrument(skip_all, fields(sheet = %self.config.routes_sheet))]
    pub async fn import_routes(&mut self) -> ImportResult<usize> {
        let sheet = open_sheet(&self.config.routes_file, &self.config.routes_sheet)?;
        let mut tx = self.db.pool().begin().await?;

        let mut imported = 0;
        let mut skipped = 0;
        for row in sheet.data_rows() {
            let fields = match normalize_route_row(&sheet, row) {
                Ok(fields) => fields,
                Err(e) => {
                    warn!(row, "Skipping route row: {}", e);
                    skipped += 1;
                    continue;
                }
            };
            let route = build_route(row, fields)?;
            debug!(row, name = %route.name, stif_code = %route.stif_code, "Staging route");
            insert_route(&mut tx, &route).await?;
            imported += 1;
        }

        tx.commit().await?;
        self.report.routes_imported += imported;
        self.report.route_rows_skipped += skipped;
        info!("Imported {} routes, skipped {} rows", imported, skipped);
        Ok(imported)
    }

    /// Import every data row of the stops sheet in one transaction.
    ///
    /// Rows without a text stop name are separators and are skipped, as are
    /// rows with unreadable flags.
    ///
    /// # Returns
    /// The number of stops written
    #[tracing::instrument(skip_all, fields(sheet = %self.config.stops_sheet))]
    pub async fn import_stops(&mut self) -> ImportResult<usize> {
        let sheet = open_sheet(&self.config.stops_file, &self.config.stops_sheet)?;
        let mut tx = self.db.pool().begin().await?;

        let mut imported = 0;
        let mut skipped = 0;
        for row in sheet.data_rows() {
            let fields = match normalize_stop_row(&sheet, row) {
                Ok(fields) => fields,
                Err(e) => {
                    warn!(row, "Skipping stop row: {}", e);
                    skipped += 1;
                    continue;
                }
            };
            let stop = build_stop(fields);
            insert_stop(&mut tx, &stop).await?;
            imported += 1;
        }

        tx.commit().await?;
        self.report.stops_imported += imported;
        self.report.stop_rows_skipped += skipped;
        info!("Imported {} stops, skipped {} rows", imported, skipped);
        Ok(imported)
    }

    /// Release the database connection and return the session report.
    pub async fn close(mut self) -> ImportReport {
        self.db.close().await;
        self.report.finished_at = Some(Utc::now());
        info!(
            "Closed import session: {} routes, {} stops, {} rows skipped",
            self.report.routes_imported,
            self.report.stops_imported,
            self.report.rows_skipped()
        );
        self.report
    }
}

/// Delete the database file at `database_path` so the import starts empty.
///
/// A missing file is fine. Any other failure either aborts or, under
/// [`StaleStorePolicy::Warn`], is logged and the import continues on top of
/// whatever the old file still holds.
pub fn remove_existing_database(database_path: &str, policy: StaleStorePolicy) -> ImportResult<()> {
    if database_path == IN_MEMORY {
        return Ok(());
    }

    let path = Path::new(database_path);
    info!("Removing existing database: {}", path.display());
    match std::fs::remove_file(path) {
        Ok(()) => {
            info!("Removed existing database: {}", path.display());
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("No existing database at {}", path.display());
            Ok(())
        }
        Err(e) => match policy {
            StaleStorePolicy::Warn => {
                error!(
                    "Error removing database {}: {}. Importing into the existing store, \
                     which may keep stale rows",
                    path.display(),
                    e
                );
                Ok(())
            }
            StaleStorePolicy::Fail => Err(ImportError::StaleStore {
                path: path.to_path_buf(),
                source: e,
            }),
        },
    }
}

/// Rebuild the database from scratch: remove it, then import routes and
/// stops in a single session.
pub async fn rebuild_database(config: &ImportConfig) -> ImportResult<ImportReport> {
    remove_existing_database(&config.database_path, config.stale_store_policy)?;

    let mut session = DataImporter::new(config.clone()).open().await?;
    session.import_routes().await?;
    session.import_stops().await?;
    Ok(session.close().await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    fn temp_path(name: &str) -> String {
        format!("{}/ratp_access_{}_{}", env::temp_dir().display(), std::process::id(), name)
    }

    #[test]
    fn test_remove_missing_database_is_ok() {
        let path = temp_path("missing.db");
        assert!(remove_existing_database(&path, StaleStorePolicy::Fail).is_ok());
    }

    #[test]
    fn test_remove_existing_database() {
        let path = temp_path("existing.db");
        fs::write(&path, b"stale").unwrap();
        remove_existing_database(&path, StaleStorePolicy::Fail).unwrap();
        assert!(!Path::new(&path).exists());
    }

    #[test]
    fn test_in_memory_database_is_never_removed() {
        assert!(remove_existing_database(IN_MEMORY, StaleStorePolicy::Fail).is_ok());
    }

    #[test]
    fn test_stale_store_policy() {
        // A directory cannot be removed with remove_file.
        let path = temp_path("stale_dir.db");
        fs::create_dir_all(&path).unwrap();

        assert!(remove_existing_database(&path, StaleStorePolicy::Warn).is_ok());
        let err = remove_existing_database(&path, StaleStorePolicy::Fail).unwrap_err();
        assert!(matches!(err, ImportError::StaleStore { .. }));

        fs::remove_dir(&path).unwrap();
    }

    #[tokio::test]
    async fn test_session_reports_missing_sheet_file() {
        let config = ImportConfig {
            routes_file: temp_path("no_routes.xlsx").into(),
            database_path: IN_MEMORY.to_string(),
            ..ImportConfig::default()
        };
        let mut session = DataImporter::new(config).open().await.unwrap();
        let err = session.import_routes().await.unwrap_err();
        assert!(matches!(err, ImportError::SourceNotFound(_)));

        let report = session.close().await;
        assert_eq!(report.routes_imported, 0);
        assert!(report.finished_at.is_some());
    }
}
