//! Command implementations for studylog.
//!
//! This module contains the implementation of all CLI commands.

mod completions;
mod log;

pub use completions::{completions, generate_completions, shell_from_str};
pub use log::log;

use std::path::PathBuf;

use serde_json::json;

use crate::cli::args::{ConfigCommands, OutputFormat};
use crate::config::{Config, Paths};
use crate::error::StudyError;
use crate::features::focus::{Mode, Technique, TechniqueRotation};
use crate::output::{format_techniques, to_json};

/// Resolved configuration and file locations for one invocation.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub config: Config,
    pub paths: Paths,
    /// The config file that was (or would be) loaded.
    pub config_path: PathBuf,
}

impl AppContext {
    /// Resolve paths and load the config file.
    ///
    /// # Errors
    ///
    /// Returns an error if no data directory can be determined or the config
    /// file exists but is invalid.
    pub fn load(data_dir: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<Self, StudyError> {
        let paths = match data_dir {
            Some(root) => Paths::with_root(root),
            None => Paths::new()?,
        };
        let config_path = config_path.unwrap_or_else(|| paths.config_file.clone());
        let config = Config::load_from_path(&config_path)?;

        Ok(Self {
            config,
            paths,
            config_path,
        })
    }
}

/// Execute the timer command
///
/// `focus` and `rest` override the configured lengths, in seconds.
///
/// # Errors
///
/// Returns an error if the store cannot be opened or the terminal fails.
pub fn timer(
    ctx: &AppContext,
    mode: Option<Mode>,
    focus: Option<u32>,
    rest: Option<u32>,
) -> Result<String, StudyError> {
    let mut durations = ctx.config.timer.durations();
    if let Some(seconds) = focus {
        durations.focus = seconds;
    }
    if let Some(seconds) = rest {
        durations.rest = seconds;
    }
    crate::tui::run(ctx, mode.unwrap_or(ctx.config.timer.start_mode), durations)?;
    Ok(String::new())
}

/// Execute techniques command
///
/// `next` advances the saved rotation and shows only the new technique.
///
/// # Errors
///
/// Returns an error if the rotation file cannot be read or written, or if
/// output formatting fails.
pub fn techniques(ctx: &AppContext, next: bool, format: OutputFormat) -> Result<String, StudyError> {
    let path = &ctx.paths.technique_state;
    let mut rotation = TechniqueRotation::load(path)?;
    if next {
        let technique = rotation.advance();
        rotation.save(path)?;
        return match format {
            OutputFormat::Json => to_json(&json!({
                "id": technique,
                "name": technique.display_name(),
                "prompt": technique.prompt(),
            })),
            OutputFormat::Pretty => Ok(format!(
                "{}\n  {}",
                technique.display_name(),
                technique.prompt()
            )),
        };
    }
    format_techniques(&Technique::ALL, rotation.current(), format)
}

/// Execute config subcommands
///
/// # Errors
///
/// Returns an error if the config cannot be serialized or written.
pub fn config(
    ctx: &AppContext,
    cmd: ConfigCommands,
    format: OutputFormat,
) -> Result<String, StudyError> {
    match cmd {
        ConfigCommands::Show => match format {
            OutputFormat::Json => to_json(&ctx.config),
            OutputFormat::Pretty => ctx.config.to_yaml(),
        },
        ConfigCommands::Path => Ok(ctx.config_path.display().to_string()),
        ConfigCommands::Init { force } => {
            if ctx.config_path.exists() && !force {
                return Err(StudyError::Config(format!(
                    "{} already exists. Use --force to overwrite.",
                    ctx.config_path.display()
                )));
            }
            if let Some(parent) = ctx.config_path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            Config::default().save_to_path(&ctx.config_path)?;
            Ok(format!("Wrote {}", ctx.config_path.display()))
        }
    }
}
