//! preventivo-core
//!
//! Pure domain types for quote ("preventivo") generation: the store's record
//! shape, typed entities, table/field names and display formatters.
//! No network dependency: this is the shared vocabulary of the workspace.

pub mod artifacts;
pub mod filename;
pub mod format;
pub mod models;
pub mod record;
pub mod tables;
