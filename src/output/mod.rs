//! Output formatting for studylog.
//!
//! This module provides formatters for displaying session data in various formats.

mod json;
mod pretty;

use crate::cli::args::OutputFormat;
use crate::error::StudyError;
use crate::features::focus::Technique;
use crate::features::history::SessionRecord;

pub use json::*;
pub use pretty::*;

/// Format session records based on output format
///
/// # Errors
///
/// Returns `StudyError::Parse` if JSON serialization fails.
pub fn format_records(
    records: &[SessionRecord],
    title: &str,
    format: OutputFormat,
) -> Result<String, StudyError> {
    match format {
        OutputFormat::Pretty => Ok(format_records_pretty(records, title)),
        OutputFormat::Json => format_records_json(records, title),
    }
}

/// Format a single record based on output format
///
/// # Errors
///
/// Returns `StudyError::Parse` if JSON serialization fails.
pub fn format_record(record: &SessionRecord, format: OutputFormat) -> Result<String, StudyError> {
    match format {
        OutputFormat::Pretty => Ok(format_record_pretty(record)),
        OutputFormat::Json => to_json(record),
    }
}

/// Format the technique rotation based on output format
///
/// # Errors
///
/// Returns `StudyError::Parse` if JSON serialization fails.
pub fn format_techniques(
    techniques: &[Technique],
    current: Technique,
    format: OutputFormat,
) -> Result<String, StudyError> {
    match format {
        OutputFormat::Pretty => Ok(format_techniques_pretty(techniques, current)),
        OutputFormat::Json => format_techniques_json(techniques, current),
    }
}
