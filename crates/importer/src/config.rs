//! Import configuration.

use serde::Serialize;
use std::path::PathBuf;

pub const DEFAULT_DATABASE_PATH: &str = "ratp.db";
pub const DEFAULT_ROUTES_FILE: &str = "data/routes_axs.xls";
pub const DEFAULT_STOPS_FILE: &str = "data/stops_axs.xls";
pub const DEFAULT_ROUTES_SHEET: &str = "Accessibilité Lignes";
pub const DEFAULT_STOPS_SHEET: &str = "Bus";

/// What to do when the previous database file cannot be removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum StaleStorePolicy {
    /// Log the failure and import on top of the old rows.
    #[default]
    Warn,
    /// Abort the rebuild.
    Fail,
}

/// Where to read the spreadsheets from and where to write the database.
#[derive(Debug, Clone, Serialize)]
pub struct ImportConfig {
    pub routes_file: PathBuf,
    pub stops_file: PathBuf,
    pub routes_sheet: String,
    pub stops_sheet: String,
    pub database_path: String,
    pub stale_store_policy: StaleStorePolicy,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            routes_file: PathBuf::from(DEFAULT_ROUTES_FILE),
            stops_file: PathBuf::from(DEFAULT_STOPS_FILE),
            routes_sheet: DEFAULT_ROUTES_SHEET.to_string(),
            stops_sheet: DEFAULT_STOPS_SHEET.to_string(),
            database_path: DEFAULT_DATABASE_PATH.to_string(),
            stale_store_policy: StaleStorePolicy::default(),
        }
    }
}
