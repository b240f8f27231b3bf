//! `SQLite` schema for studylog.
//!
//! Only the migrations live here; the session log's SQL lives with the
//! feature in `features::history::storage`.

mod migrations;

pub use migrations::{get_version as schema_version, run as migrate};
