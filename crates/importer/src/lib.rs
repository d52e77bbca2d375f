//! Import pipeline for the RATP bus accessibility spreadsheets.
//!
//! Rows flow from the sheet reader through the normalizer, the accessibility
//! mapper and the record builder before the data importer persists them.

pub mod accessibility;
pub mod config;
pub mod data_importer;
pub mod error;
pub mod normalizer;
pub mod record_builder;
pub mod report;
pub mod sheet_reader;

pub use config::{ImportConfig, StaleStorePolicy};
pub use data_importer::{rebuild_database, DataImporter, ImportSession};
pub use error::{FieldError, ImportError};
pub use report::{append_import_report, ImportReport};
pub use sheet_reader::{Cell, SheetGrid};
