//! Terminal User Interface (TUI) for studylog.
//!
//! Full-screen countdown with the log form and recent history.
//! Built with ratatui and crossterm.

mod app;
mod event;
mod ui;

pub use app::{App, FormField, LogForm};

use std::io::{self, Write};
use std::time::{Duration, Instant};

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tracing::debug;

use crate::cli::commands::AppContext;
use crate::error::StudyError;
use crate::features::focus::{Mode, ModeDurations};
use event::Action;

/// Run the TUI application.
///
/// # Errors
///
/// Returns an error if the session store cannot be opened or the terminal
/// fails to initialize or draw.
pub fn run(ctx: &AppContext, mode: Mode, durations: ModeDurations) -> Result<(), StudyError> {
    // Open the store before touching the terminal so errors print normally
    let mut app = App::new(ctx, mode, durations)?;

    enable_raw_mode()
        .map_err(|e| StudyError::Terminal(format!("Failed to enable raw mode: {e}")))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| StudyError::Terminal(format!("Failed to setup terminal: {e}")))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)
        .map_err(|e| StudyError::Terminal(format!("Failed to create terminal: {e}")))?;

    let result = run_app(&mut terminal, &mut app, event::handle_events);

    // Restore terminal
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    result
}

/// Run the main application loop.
///
/// `next_action` waits up to the given timeout for input; the terminal run
/// passes [`event::handle_events`].
fn run_app<B, F>(terminal: &mut Terminal<B>, app: &mut App, mut next_action: F) -> Result<(), StudyError>
where
    B: Backend + Write,
    F: FnMut(&mut App, Duration) -> Result<Option<Action>, StudyError>,
{
    while !app.should_quit {
        app.on_tick(Instant::now());

        if app.take_bell() {
            terminal.backend_mut().write_all(b"\x07")?;
            Write::flush(terminal.backend_mut())?;
        }

        terminal
            .draw(|frame| ui::render(frame, app))
            .map_err(|e| StudyError::Terminal(format!("Failed to draw: {e}")))?;

        let timeout = app.poll_timeout(Instant::now());
        if let Some(action) = next_action(app, timeout)? {
            debug!(?action, "tui action");
            apply(app, action);
        }
    }

    Ok(())
}

fn apply(app: &mut App, action: Action) {
    match action {
        Action::Quit => app.should_quit = true,
        Action::Toggle => app.toggle(Instant::now()),
        Action::SwitchMode => app.switch_mode(),
        Action::Reset => app.reset(),
        Action::NextTechnique => app.next_technique(),
        Action::OpenForm => app.open_form(),
        Action::CloseForm => app.close_form(),
        Action::Save => app.save_form(),
        Action::Export => app.export(),
    }
}
