//! Event handling for the TUI.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::error::StudyError;
use crate::tui::app::{App, FormField};

/// Action to take after handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Quit the application.
    Quit,
    /// Start or pause the countdown.
    Toggle,
    /// Switch between focus and rest.
    SwitchMode,
    /// Reset the current countdown.
    Reset,
    /// Skip to the next technique.
    NextTechnique,
    /// Open the log form.
    OpenForm,
    /// Close the log form.
    CloseForm,
    /// Save the log form.
    Save,
    /// Export the log as CSV.
    Export,
}

/// Handle terminal events.
///
/// Waits up to `timeout` for input. Returns an action to take, or None if
/// no action is needed.
///
/// # Errors
///
/// Returns an error if event polling fails.
pub fn handle_events(app: &mut App, timeout: Duration) -> Result<Option<Action>, StudyError> {
    if event::poll(timeout).map_err(|e| StudyError::Terminal(format!("Event poll failed: {e}")))? {
        if let Event::Key(key) =
            event::read().map_err(|e| StudyError::Terminal(format!("Event read failed: {e}")))?
        {
            if key.kind == KeyEventKind::Press {
                return Ok(handle_key(app, key));
            }
        }
    }

    Ok(None)
}

/// Map a key press to an action, editing the form in place when it is open.
pub fn handle_key(app: &mut App, key: KeyEvent) -> Option<Action> {
    // Handle Ctrl+C
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    if app.session().form_visible() {
        return handle_form_key(app, key);
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char(' ') | KeyCode::Enter => Some(Action::Toggle),
        KeyCode::Char('m') => Some(Action::SwitchMode),
        KeyCode::Char('r') => Some(Action::Reset),
        KeyCode::Char('t') => Some(Action::NextTechnique),
        KeyCode::Char('l') => Some(Action::OpenForm),
        KeyCode::Char('e') => Some(Action::Export),
        KeyCode::Char('?') => {
            app.status = Some(
                "space:start/pause | m:mode | r:reset | t:technique | l:log | e:export | q:quit"
                    .to_string(),
            );
            None
        }
        _ => None,
    }
}

fn handle_form_key(app: &mut App, key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Esc => Some(Action::CloseForm),
        KeyCode::Enter => Some(Action::Save),
        KeyCode::Tab => {
            app.form.next_field();
            None
        }
        KeyCode::BackTab => {
            app.form.previous_field();
            None
        }
        KeyCode::Up | KeyCode::Right if app.form.field == FormField::Energy => {
            app.form.raise_energy();
            None
        }
        KeyCode::Down | KeyCode::Left if app.form.field == FormField::Energy => {
            app.form.lower_energy();
            None
        }
        KeyCode::Backspace => {
            app.form.backspace();
            None
        }
        KeyCode::Char(c) => {
            app.form.push_char(c);
            None
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::AppContext;
    use crate::config::{Config, Paths};
    use crate::features::focus::{Mode, ModeDurations, TimerEngine};
    use crate::features::history::{MemoryStore, SessionLog, SessionStore};
    use crate::features::session::StudySession;

    fn app() -> App {
        let paths = Paths::with_root(std::env::temp_dir().join("studylog-event-tests"));
        let ctx = AppContext {
            config_path: paths.config_file.clone(),
            config: Config::default(),
            paths,
        };
        let store: Box<dyn SessionStore> = Box::new(MemoryStore::new());
        let log = SessionLog::open(store).unwrap();
        let timer = TimerEngine::new(ModeDurations::uniform(60), Mode::Focus);
        App::with_session(StudySession::new(timer, log), &ctx)
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_timer_keys() {
        let mut app = app();
        assert_eq!(handle_key(&mut app, press(KeyCode::Char(' '))), Some(Action::Toggle));
        assert_eq!(handle_key(&mut app, press(KeyCode::Char('m'))), Some(Action::SwitchMode));
        assert_eq!(handle_key(&mut app, press(KeyCode::Char('l'))), Some(Action::OpenForm));
        assert_eq!(handle_key(&mut app, press(KeyCode::Char('q'))), Some(Action::Quit));
        assert_eq!(handle_key(&mut app, press(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_ctrl_c_quits_from_form() {
        let mut app = app();
        app.open_form();
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key(&mut app, key), Some(Action::Quit));
    }

    #[test]
    fn test_form_captures_text() {
        let mut app = app();
        app.open_form();

        // Letters that are shortcuts outside the form are typed instead
        for c in "qm l".chars() {
            assert_eq!(handle_key(&mut app, press(KeyCode::Char(c))), None);
        }
        assert_eq!(app.form.subject, "qm l");

        handle_key(&mut app, press(KeyCode::Backspace));
        assert_eq!(app.form.subject, "qm ");
    }

    #[test]
    fn test_form_energy_keys() {
        let mut app = app();
        app.open_form();
        handle_key(&mut app, press(KeyCode::Tab));
        assert_eq!(app.form.field, FormField::Energy);

        handle_key(&mut app, press(KeyCode::Char('3')));
        assert_eq!(app.form.energy, 3);
        handle_key(&mut app, press(KeyCode::Down));
        assert_eq!(app.form.energy, 2);
        handle_key(&mut app, press(KeyCode::Up));
        handle_key(&mut app, press(KeyCode::Up));
        assert_eq!(app.form.energy, 4);

        handle_key(&mut app, press(KeyCode::BackTab));
        assert_eq!(app.form.field, FormField::Subject);
    }

    #[test]
    fn test_form_enter_and_esc() {
        let mut app = app();
        app.open_form();
        assert_eq!(handle_key(&mut app, press(KeyCode::Enter)), Some(Action::Save));
        assert_eq!(handle_key(&mut app, press(KeyCode::Esc)), Some(Action::CloseForm));
    }
}
