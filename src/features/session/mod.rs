//! Driver-side state for an interactive study session.
//!
//! [`StudySession`] owns the countdown, the log, and the technique rotation.
//! It is the only thing that connects them: the timer never writes to the
//! log, and the log never looks at the timer.

pub mod ticker;

pub use ticker::Ticker;

use tracing::{debug, info};

use crate::config::{Config, Paths, StorageBackend};
use crate::error::StudyError;
use crate::features::focus::{Expiry, Mode, Technique, TechniqueRotation, TimerEngine};
use crate::features::history::{
    JsonFileStore, NewSession, SessionLog, SessionRecord, SessionStore, SqliteStore,
};

/// Session log over whichever store the configuration selects.
pub type DynSessionLog = SessionLog<Box<dyn SessionStore>>;

/// Open the configured session store.
///
/// # Errors
///
/// Returns an error if the data directory or the store cannot be opened.
pub fn open_store(config: &Config, paths: &Paths) -> Result<Box<dyn SessionStore>, StudyError> {
    paths.ensure_dirs()?;
    let path = config.storage.resolve_path(paths);
    debug!(backend = ?config.storage.backend, path = %path.display(), "opening session store");

    Ok(match config.storage.backend {
        StorageBackend::Sqlite => Box::new(SqliteStore::open_at(&path)?),
        StorageBackend::Json => Box::new(JsonFileStore::new(path)),
    })
}

/// Open the session log using the configured store.
///
/// # Errors
///
/// Returns an error if the store cannot be opened or read.
pub fn open_log(config: &Config, paths: &Paths) -> Result<DynSessionLog, StudyError> {
    SessionLog::open(open_store(config, paths)?)
}

/// Timer, log, and technique rotation for one interactive run.
pub struct StudySession<S: SessionStore> {
    timer: TimerEngine,
    log: SessionLog<S>,
    techniques: TechniqueRotation,
    form_visible: bool,
}

impl<S: SessionStore> StudySession<S> {
    #[must_use]
    pub const fn new(timer: TimerEngine, log: SessionLog<S>) -> Self {
        Self {
            timer,
            log,
            techniques: TechniqueRotation::new(),
            form_visible: false,
        }
    }

    /// Continue a saved technique rotation instead of starting at the first.
    #[must_use]
    pub fn with_rotation(mut self, techniques: TechniqueRotation) -> Self {
        self.techniques = techniques;
        self
    }

    /// Handle one scheduler pulse.
    ///
    /// An expired focus countdown opens the log form.
    pub fn on_pulse(&mut self) -> Option<Expiry> {
        let expiry = self.timer.tick();
        if let Some(e) = expiry {
            info!(mode = %e.mode, "countdown expired");
            if e.mode == Mode::Focus {
                self.form_visible = true;
            }
        }
        expiry
    }

    /// Start or pause the countdown.
    ///
    /// Pausing a focus countdown opens the log form; starting closes it.
    pub fn toggle(&mut self) -> bool {
        let changed = self.timer.toggle();
        if changed {
            self.form_visible = !self.timer.is_running() && self.timer.mode() == Mode::Focus;
        }
        changed
    }

    /// Switch to `mode`, stopping any countdown.
    pub fn switch_mode(&mut self, mode: Mode) {
        let previous = self.timer.mode();
        self.timer.switch_mode(mode);
        self.form_visible = false;
        if mode == Mode::Focus && previous != Mode::Focus {
            self.techniques.advance();
        }
    }

    /// Switch between focus and rest.
    pub fn toggle_mode(&mut self) {
        self.switch_mode(self.timer.mode().toggled());
    }

    /// Re-arm the current mode with its configured duration.
    pub fn reset(&mut self) {
        let seconds = self.timer.durations().for_mode(self.timer.mode());
        self.timer.reset(seconds);
        self.form_visible = false;
    }

    pub fn next_technique(&mut self) -> Technique {
        self.techniques.advance()
    }

    pub fn show_form(&mut self) {
        self.form_visible = true;
    }

    pub fn hide_form(&mut self) {
        self.form_visible = false;
    }

    /// Log a session in the current mode.
    ///
    /// The form closes on success and stays open on failure so the input
    /// can be corrected or retried.
    ///
    /// # Errors
    ///
    /// Returns validation or persistence errors from the log.
    pub fn save(
        &mut self,
        subject: &str,
        energy: i64,
        notes: &str,
    ) -> Result<SessionRecord, StudyError> {
        let input = NewSession::new(subject.trim(), energy, self.timer.mode(), notes.trim());
        let record = self.log.append(input)?;
        self.form_visible = false;
        Ok(record)
    }

    /// Delete the entire history.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be cleared.
    pub fn clear_history(&mut self) -> Result<usize, StudyError> {
        self.log.clear_all()
    }

    #[must_use]
    pub const fn timer(&self) -> &TimerEngine {
        &self.timer
    }

    #[must_use]
    pub const fn log(&self) -> &SessionLog<S> {
        &self.log
    }

    #[must_use]
    pub const fn technique(&self) -> Technique {
        self.techniques.current()
    }

    #[must_use]
    pub const fn rotation(&self) -> TechniqueRotation {
        self.techniques
    }

    #[must_use]
    pub const fn form_visible(&self) -> bool {
        self.form_visible
    }
}
