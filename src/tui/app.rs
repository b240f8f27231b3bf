//! Application state for the TUI.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use tracing::warn;

use crate::cli::commands::AppContext;
use crate::error::StudyError;
use crate::features::focus::{Mode, ModeDurations, TechniqueRotation, TimerEngine};
use crate::features::history::{CsvLayout, EnergyLevel, SessionStore};
use crate::features::session::{open_log, StudySession, Ticker};

/// Longest wait for input before redrawing.
const MAX_POLL: Duration = Duration::from_millis(250);

/// Field of the log form that receives key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Subject,
    Energy,
    Notes,
}

impl FormField {
    const fn next(self) -> Self {
        match self {
            Self::Subject => Self::Energy,
            Self::Energy => Self::Notes,
            Self::Notes => Self::Subject,
        }
    }

    const fn previous(self) -> Self {
        match self {
            Self::Subject => Self::Notes,
            Self::Energy => Self::Subject,
            Self::Notes => Self::Energy,
        }
    }
}

/// Contents of the log form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogForm {
    pub subject: String,
    pub energy: u8,
    pub notes: String,
    pub field: FormField,
}

impl Default for LogForm {
    fn default() -> Self {
        Self {
            subject: String::new(),
            energy: EnergyLevel::MAX,
            notes: String::new(),
            field: FormField::Subject,
        }
    }
}

impl LogForm {
    pub fn next_field(&mut self) {
        self.field = self.field.next();
    }

    pub fn previous_field(&mut self) {
        self.field = self.field.previous();
    }

    pub fn set_energy(&mut self, level: u8) {
        self.energy = level.clamp(EnergyLevel::MIN, EnergyLevel::MAX);
    }

    pub fn raise_energy(&mut self) {
        self.set_energy(self.energy.saturating_add(1));
    }

    pub fn lower_energy(&mut self) {
        self.set_energy(self.energy.saturating_sub(1));
    }

    /// Type a character into the focused text field.
    pub fn push_char(&mut self, c: char) {
        match self.field {
            FormField::Subject => self.subject.push(c),
            FormField::Notes => self.notes.push(c),
            FormField::Energy => {
                if let Some(level) = c.to_digit(10).and_then(|d| u8::try_from(d).ok()) {
                    if (EnergyLevel::MIN..=EnergyLevel::MAX).contains(&level) {
                        self.energy = level;
                    }
                }
            }
        }
    }

    pub fn backspace(&mut self) {
        match self.field {
            FormField::Subject => {
                self.subject.pop();
            }
            FormField::Notes => {
                self.notes.pop();
            }
            FormField::Energy => {}
        }
    }

    /// Clear the text fields after a save. The energy level is kept.
    pub fn clear_text(&mut self) {
        self.subject.clear();
        self.notes.clear();
        self.field = FormField::Subject;
    }
}

/// Application state.
pub struct App {
    session: StudySession<Box<dyn SessionStore>>,
    ticker: Ticker,
    /// Log form contents.
    pub form: LogForm,
    /// Status message to display.
    pub status: Option<String>,
    /// Whether the app should quit.
    pub should_quit: bool,
    /// Number of history rows to show.
    pub recent_count: usize,
    bell_enabled: bool,
    bell_pending: bool,
    export_path: PathBuf,
    csv_layout: CsvLayout,
    rotation_path: PathBuf,
}

impl App {
    /// Create a new app instance.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store cannot be opened.
    pub fn new(ctx: &AppContext, mode: Mode, durations: ModeDurations) -> Result<Self, StudyError> {
        let log = open_log(&ctx.config, &ctx.paths)?;
        let rotation = TechniqueRotation::load(&ctx.paths.technique_state)?;
        let timer = TimerEngine::new(durations, mode);
        let session = StudySession::new(timer, log).with_rotation(rotation);
        Ok(Self::with_session(session, ctx))
    }

    /// Create an app around an existing session.
    #[must_use]
    pub fn with_session(session: StudySession<Box<dyn SessionStore>>, ctx: &AppContext) -> Self {
        Self {
            session,
            ticker: Ticker::every_second(),
            form: LogForm::default(),
            status: Some("space:start | ?:help".to_string()),
            should_quit: false,
            recent_count: ctx.config.history.recent_count,
            bell_enabled: ctx.config.timer.bell,
            bell_pending: false,
            export_path: PathBuf::from(&ctx.config.history.export_file),
            csv_layout: ctx.config.history.csv_layout,
            rotation_path: ctx.paths.technique_state.clone(),
        }
    }

    #[must_use]
    pub const fn session(&self) -> &StudySession<Box<dyn SessionStore>> {
        &self.session
    }

    /// Advance the countdown if a pulse is due at `now`.
    pub fn on_tick(&mut self, now: Instant) {
        if !self.ticker.poll(now) {
            return;
        }
        if let Some(expiry) = self.session.on_pulse() {
            self.ticker.disarm();
            self.bell_pending = self.bell_enabled;
            self.status = Some(match expiry.mode {
                Mode::Focus => "Time's up! Log your session.".to_string(),
                Mode::Rest => "Time's up! Back to focus with m.".to_string(),
            });
        }
    }

    /// How long to wait for input before the next redraw.
    #[must_use]
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        self.ticker.until_next(now).map_or(MAX_POLL, |d| d.min(MAX_POLL))
    }

    /// Whether an expiry bell is waiting to be rung. Clears the flag.
    pub fn take_bell(&mut self) -> bool {
        std::mem::take(&mut self.bell_pending)
    }

    pub fn toggle(&mut self, now: Instant) {
        if !self.session.toggle() {
            self.status = Some("Countdown finished: r to reset, m to switch mode".to_string());
            return;
        }
        self.sync_ticker(now);
        self.status = Some(if self.session.timer().is_running() {
            "Running".to_string()
        } else {
            "Paused".to_string()
        });
    }

    pub fn switch_mode(&mut self) {
        let before = self.session.rotation();
        self.session.toggle_mode();
        self.ticker.disarm();
        self.status = Some(self.session.timer().mode().description().to_string());
        if self.session.rotation() != before {
            self.save_rotation();
        }
    }

    pub fn reset(&mut self) {
        self.session.reset();
        self.ticker.disarm();
        self.status = Some("Reset".to_string());
    }

    pub fn next_technique(&mut self) {
        let technique = self.session.next_technique();
        self.status = Some(format!("Technique: {}", technique.display_name()));
        self.save_rotation();
    }

    pub fn open_form(&mut self) {
        self.session.show_form();
    }

    pub fn close_form(&mut self) {
        self.session.hide_form();
    }

    /// Save the form as a new session.
    ///
    /// Failures are reported in the status bar and leave the form open.
    pub fn save_form(&mut self) {
        let result = self.session.save(
            &self.form.subject,
            i64::from(self.form.energy),
            &self.form.notes,
        );
        match result {
            Ok(record) => {
                self.status = Some(format!("Saved: {}", record.display_subject()));
                self.form.clear_text();
            }
            Err(e) => self.status = Some(format!("Not saved: {e}")),
        }
    }

    /// Write the CSV export to the configured file.
    pub fn export(&mut self) {
        let log = self.session.log();
        self.status = Some(match log.write_csv(&self.export_path, self.csv_layout) {
            Ok(()) => format!("Exported {} sessions to {}", log.len(), self.export_path.display()),
            Err(e) => format!("Export failed: {e}"),
        });
    }

    /// Keep the rotation position for the next run. A failed write only logs.
    fn save_rotation(&self) {
        if let Err(e) = self.session.rotation().save(&self.rotation_path) {
            warn!(error = %e, "could not save technique rotation");
        }
    }

    fn sync_ticker(&mut self, now: Instant) {
        if self.session.timer().is_running() {
            self.ticker.arm(now);
        } else {
            self.ticker.disarm();
        }
    }
}
