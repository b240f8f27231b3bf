use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::core::datetime::parse_duration;
use crate::features::focus::Mode;

#[derive(Parser)]
#[command(name = "studylog")]
#[command(about = "A study timer with focus/rest blocks and a session log")]
#[command(long_about = "studylog - focus timer and study journal

Alternate focus and rest countdowns, then log what you studied and how
much energy you had left. The log is kept on disk and can be exported
as CSV.

QUICK START:
  studylog timer                               Open the interactive timer
  studylog log add -s Math -e 4                Log a session by hand
  studylog log recent                          Show the latest sessions
  studylog log export                          Write historico_estudos.csv

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting

For more information on a specific command, run:
  studylog <command> --help")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Use 'pretty' for human-readable colored output,
    /// or 'json' for machine-readable output suitable for scripting.
    /// Defaults to `general.default_output` from the config file.
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Path to the config file (default: <data-dir>/config.yaml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Data directory (default: ~/.studylog)
    #[arg(long, global = true, value_name = "DIR", env = "STUDYLOG_HOME")]
    pub data_dir: Option<PathBuf>,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the interactive countdown
    ///
    /// Opens a full-screen timer. The countdown starts paused.
    ///
    /// # Keys
    ///
    ///   space     Start / pause
    ///   m         Switch between focus and rest
    ///   r         Reset the current countdown
    ///   t         Skip to the next study technique
    ///   l         Open the log form
    ///   e         Export the log as CSV
    ///   ?         Show key help
    ///   q         Quit
    ///
    /// Pausing or finishing a focus block opens the log form.
    /// In the form: Tab moves between fields, 1-5 or arrows set the
    /// energy level, Enter saves, Esc closes.
    ///
    /// # Examples
    ///
    ///   studylog timer
    ///   studylog timer --mode rest
    ///   studylog timer --focus 25m --rest 5m
    #[command(alias = "t")]
    Timer {
        /// Mode to open in (focus, rest); defaults to `timer.start_mode`
        #[arg(long, short = 'm', value_parser = parse_mode)]
        mode: Option<Mode>,

        /// Focus block length for this run (e.g. 25m, 1h, 50)
        #[arg(long, value_parser = parse_length)]
        focus: Option<u32>,

        /// Rest block length for this run (e.g. 5m, 300s)
        #[arg(long, value_parser = parse_length)]
        rest: Option<u32>,
    },

    /// Add, list, export, or clear logged sessions
    #[command(alias = "l")]
    Log(LogArgs),

    /// Show the study-technique rotation
    ///
    /// # Examples
    ///
    ///   studylog techniques
    ///   studylog techniques --next
    Techniques {
        /// Advance the rotation and show the new technique
        #[arg(long)]
        next: bool,
    },

    /// Show or create the config file
    Config(ConfigArgs),

    /// Generate shell completions
    ///
    /// Outputs a completion script for the given shell.
    ///
    /// Example: studylog completions bash > ~/.bash_completion.d/studylog
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        shell: String,

        /// Show installation instructions instead of the script
        #[arg(long, short = 'i')]
        install: bool,
    },
}

/// Arguments for the session log.
#[derive(Args)]
pub struct LogArgs {
    #[command(subcommand)]
    pub command: LogCommands,
}

/// Session log subcommands.
#[derive(Subcommand)]
pub enum LogCommands {
    /// Log a study session
    ///
    /// Records the current time with the given subject and energy level.
    ///
    /// Examples:
    ///   studylog log add --subject Math --energy 4
    ///   studylog log add -s History -e 2 --notes "chapter 3"
    Add {
        /// What was studied (empty is allowed)
        #[arg(long, short = 's', default_value = "")]
        subject: String,

        /// Energy level from 1 (exhausted) to 5 (peak)
        #[arg(long, short = 'e', allow_negative_numbers = true)]
        energy: i64,

        /// Mode the session belongs to (focus, rest)
        #[arg(long, short = 'm', value_parser = parse_mode, default_value = "focus")]
        mode: Mode,

        /// Free-form notes
        #[arg(long, short = 'n', default_value = "")]
        notes: String,
    },

    /// Show the most recent sessions
    Recent {
        /// Number of sessions to show (default: `history.recent_count`)
        #[arg(long, short = 'n')]
        limit: Option<usize>,
    },

    /// Show every session, newest first
    List,

    /// Export the log as CSV
    ///
    /// Writes `Data,Materia,Energia,Notas` rows, newest first.
    ///
    /// Examples:
    ///   studylog log export
    ///   studylog log export --file ~/sessions.csv --extended
    ///   studylog log export --stdout | head
    Export {
        /// Output file (default: `history.export_file`)
        #[arg(long, short = 'f', conflicts_with = "stdout")]
        file: Option<PathBuf>,

        /// Print to stdout instead of writing a file
        #[arg(long)]
        stdout: bool,

        /// Add the mode column
        #[arg(long)]
        extended: bool,
    },

    /// Delete every logged session
    ///
    /// This cannot be undone.
    Clear {
        /// Confirm the deletion
        #[arg(long)]
        force: bool,
    },
}

/// Arguments for config management.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,
    /// Print the config file location
    Path,
    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn parse_mode(s: &str) -> Result<Mode, String> {
    Mode::parse(s).ok_or_else(|| format!("unknown mode '{s}' (expected focus or rest)"))
}

fn parse_length(s: &str) -> Result<u32, String> {
    parse_duration(s).ok_or_else(|| format!("invalid duration '{s}' (try 25m, 1h30m, or 90s)"))
}
