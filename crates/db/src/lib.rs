//! Database layer for the RATP accessibility data.
//!
//! Provides SQLite storage for bus routes, bus stops and their accessibility
//! labels, created from a statically declared schema.

pub mod inserts;
pub mod models;
pub mod pool;
pub mod queries;
pub mod schema;

pub use models::{AccessibilityLabel, Direction, NewRoute, NewStop, Route, Stop};
pub use pool::DbPool;
pub use schema::SCHEMA;
