use clap::Parser;
use colored::Colorize;

use studylog::cli::args::{Cli, Commands};
use studylog::cli::commands::{self, AppContext};
use studylog::config::ColorSetting;
use studylog::error::StudyError;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), StudyError> {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let ctx = AppContext::load(cli.data_dir, cli.config)?;
    match ctx.config.general.color {
        ColorSetting::Always => colored::control::set_override(true),
        ColorSetting::Never => colored::control::set_override(false),
        ColorSetting::Auto => {}
    }
    let format = cli.output.unwrap_or(ctx.config.general.default_output);

    let output = match cli.command {
        Commands::Timer { mode, focus, rest } => commands::timer(&ctx, mode, focus, rest)?,
        Commands::Log(args) => commands::log(&ctx, args.command, format)?,
        Commands::Techniques { next } => commands::techniques(&ctx, next, format)?,
        Commands::Config(args) => commands::config(&ctx, args.command, format)?,
        Commands::Completions { shell, install } => commands::completions(&shell, install)?,
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}

fn init_tracing(quiet: bool, verbose: bool) -> Result<(), StudyError> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("STUDYLOG_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| StudyError::Config(format!("Failed to initialize logging: {e}")))
}
