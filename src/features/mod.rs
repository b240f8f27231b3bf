//! Feature modules for studylog.
//!
//! - `focus`: countdown engine, modes, and technique rotation
//! - `history`: session records, stores, and CSV export
//! - `session`: driver state tying the timer to the log

pub mod focus;
pub mod history;
pub mod session;
