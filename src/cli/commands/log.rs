//! Session log command implementation.

use std::path::{Path, PathBuf};

use colored::Colorize;
use serde_json::json;

use crate::cli::args::{LogCommands, OutputFormat};
use crate::cli::commands::AppContext;
use crate::error::StudyError;
use crate::features::history::{CsvLayout, NewSession, SessionLog, SessionStore};
use crate::features::session::{open_log, DynSessionLog};
use crate::output::{format_record, format_records, to_json};

/// Execute log subcommands.
///
/// # Errors
///
/// Returns an error if the store cannot be opened, the input is invalid,
/// or output formatting fails.
pub fn log(ctx: &AppContext, cmd: LogCommands, format: OutputFormat) -> Result<String, StudyError> {
    let mut log = open_log(&ctx.config, &ctx.paths)?;

    match cmd {
        LogCommands::Add {
            subject,
            energy,
            mode,
            notes,
        } => {
            let record = log.append(NewSession::new(subject.trim(), energy, mode, notes.trim()))?;
            format_record(&record, format)
        }

        LogCommands::Recent { limit } => {
            let n = limit.unwrap_or(ctx.config.history.recent_count);
            format_records(log.recent(n), "Recent sessions", format)
        }

        LogCommands::List => format_records(log.all(), "All sessions", format),

        LogCommands::Export {
            file,
            stdout,
            extended,
        } => {
            let layout = if extended {
                CsvLayout::Extended
            } else {
                ctx.config.history.csv_layout
            };
            if stdout {
                // main adds the final newline
                let csv = log.export_csv_with(layout);
                return Ok(csv.trim_end_matches('\n').to_string());
            }
            let path = file.unwrap_or_else(|| PathBuf::from(&ctx.config.history.export_file));
            export_to_file(&log, &path, layout, format)
        }

        LogCommands::Clear { force } => clear(&mut log, force, format),
    }
}

fn export_to_file<S: SessionStore>(
    log: &SessionLog<S>,
    path: &Path,
    layout: CsvLayout,
    format: OutputFormat,
) -> Result<String, StudyError> {
    log.write_csv(path, layout)?;

    match format {
        OutputFormat::Json => to_json(&json!({
            "path": path.display().to_string(),
            "count": log.len(),
        })),
        OutputFormat::Pretty => Ok(format!(
            "{} {} sessions to {}",
            "Exported".green(),
            log.len(),
            path.display()
        )),
    }
}

fn clear(log: &mut DynSessionLog, force: bool, format: OutputFormat) -> Result<String, StudyError> {
    if !force {
        return Err(StudyError::Validation(format!(
            "This will permanently delete all {} logged sessions.\nUse --force to confirm.",
            log.len()
        )));
    }

    let removed = log.clear_all()?;

    match format {
        OutputFormat::Json => to_json(&json!({ "removed": removed })),
        OutputFormat::Pretty => Ok(format!("Session history cleared ({removed} removed).")),
    }
}
