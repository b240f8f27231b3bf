//! CSV export of the session log.
//!
//! Fields are written literally. Nothing is escaped: a subject containing a
//! comma, or notes containing a double quote, shift the columns of that row
//! when the file is read back by a spreadsheet. Existing exports and the
//! tools reading them rely on this exact layout.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::record::SessionRecord;
use crate::error::StudyError;

/// Default export file name.
pub const DEFAULT_EXPORT_FILE: &str = "historico_estudos.csv";

/// Column set of the export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CsvLayout {
    /// `Data,Materia,Energia,Notas`
    #[default]
    Basic,
    /// `Data,Materia,Energia,Tipo,Notas` (adds the mode label)
    Extended,
}

impl CsvLayout {
    #[must_use]
    pub const fn header(self) -> &'static str {
        match self {
            Self::Basic => "Data,Materia,Energia,Notas",
            Self::Extended => "Data,Materia,Energia,Tipo,Notas",
        }
    }

    /// One data row, without the line terminator.
    #[must_use]
    pub fn row(self, record: &SessionRecord) -> String {
        let date = record.formatted_timestamp();
        match self {
            Self::Basic => format!(
                "{},{},{},\"{}\"",
                date, record.subject, record.energy, record.notes
            ),
            Self::Extended => format!(
                "{},{},{},{},\"{}\"",
                date, record.subject, record.energy, record.mode, record.notes
            ),
        }
    }
}

/// Render `records` (already in export order) as CSV text.
///
/// Every line, the header included, ends with `\n`.
#[must_use]
pub fn render_csv(records: &[SessionRecord], layout: CsvLayout) -> String {
    let mut out = String::with_capacity(64 * (records.len() + 1));
    out.push_str(layout.header());
    out.push('\n');
    for record in records {
        out.push_str(&layout.row(record));
        out.push('\n');
    }
    out
}

/// Write the CSV rendering of `records` to `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_csv(path: &Path, records: &[SessionRecord], layout: CsvLayout) -> Result<(), StudyError> {
    fs::write(path, render_csv(records, layout))?;
    info!(path = %path.display(), rows = records.len(), "exported session log");
    Ok(())
}
