//! JSON output formatting for studylog.

use serde::Serialize;
use serde_json::json;

use crate::error::StudyError;
use crate::features::focus::Technique;
use crate::features::history::SessionRecord;

/// Format records as JSON
///
/// # Errors
///
/// Returns `StudyError::Parse` if JSON serialization fails.
pub fn format_records_json(records: &[SessionRecord], title: &str) -> Result<String, StudyError> {
    let output = json!({
        "list": title,
        "count": records.len(),
        "items": records
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format the technique rotation as JSON
///
/// # Errors
///
/// Returns `StudyError::Parse` if JSON serialization fails.
pub fn format_techniques_json(
    techniques: &[Technique],
    current: Technique,
) -> Result<String, StudyError> {
    let items: Vec<_> = techniques
        .iter()
        .map(|t| {
            json!({
                "id": t,
                "name": t.display_name(),
                "prompt": t.prompt(),
                "current": *t == current,
            })
        })
        .collect();
    let output = json!({
        "count": items.len(),
        "items": items
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Generic JSON formatter for any serializable type
///
/// # Errors
///
/// Returns `StudyError::Parse` if JSON serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, StudyError> {
    Ok(serde_json::to_string_pretty(value)?)
}
