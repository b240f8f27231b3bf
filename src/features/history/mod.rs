//! Study session history.
//!
//! - Session records with validated energy levels
//! - Interchangeable stores: `SQLite`, JSON file, in-memory
//! - Newest-first log with CSV export and bulk reset

pub mod export;
pub mod log;
pub mod record;
pub mod storage;
pub mod store;

pub use export::{render_csv, CsvLayout, DEFAULT_EXPORT_FILE};
pub use log::SessionLog;
pub use record::{EnergyLevel, NewSession, SessionRecord};
pub use storage::SqliteStore;
pub use store::{JsonFileStore, MemoryStore, SessionStore};
