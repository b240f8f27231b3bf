//! Countdown engine for study sessions.
//!
//! The engine never reads a clock. Something outside it calls [`TimerEngine::tick`]
//! once per elapsed second while the countdown runs; every tick counts as
//! exactly one second, so scheduling delays show up as drift.

use serde::{Deserialize, Serialize};

use super::mode::{Mode, ModeDurations};
use crate::core::datetime::format_mmss;

/// Countdown state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    /// Not running; time unconsumed or paused.
    Idle,
    /// Counting down.
    Running,
    /// Reached zero. Stays here until a mode switch or reset.
    Expired,
}

impl std::fmt::Display for TimerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Running => write!(f, "Running"),
            Self::Expired => write!(f, "Expired"),
        }
    }
}

/// Signal emitted once when a running countdown reaches zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expiry {
    /// Mode whose countdown expired.
    pub mode: Mode,
}

/// Point-in-time view of the engine, for display and JSON output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub remaining_seconds: u32,
    pub mode: Mode,
    pub state: TimerState,
}

/// Countdown with three states and a current mode.
#[derive(Debug, Clone)]
pub struct TimerEngine {
    durations: ModeDurations,
    mode: Mode,
    remaining_seconds: u32,
    state: TimerState,
}

impl TimerEngine {
    /// Create an idle engine armed with `mode`'s configured duration.
    #[must_use]
    pub const fn new(durations: ModeDurations, mode: Mode) -> Self {
        Self {
            durations,
            mode,
            remaining_seconds: durations.for_mode(mode),
            state: TimerState::Idle,
        }
    }

    /// Start counting down.
    ///
    /// Only valid from `Idle` with time left. Returns false (and does
    /// nothing) otherwise.
    pub fn start(&mut self) -> bool {
        if self.state != TimerState::Idle || self.remaining_seconds == 0 {
            return false;
        }
        self.state = TimerState::Running;
        true
    }

    /// Pause a running countdown, keeping the remaining time.
    pub fn pause(&mut self) -> bool {
        if self.state != TimerState::Running {
            return false;
        }
        self.state = TimerState::Idle;
        true
    }

    /// Start when idle, pause when running.
    pub fn toggle(&mut self) -> bool {
        match self.state {
            TimerState::Idle => self.start(),
            TimerState::Running => self.pause(),
            TimerState::Expired => false,
        }
    }

    /// Advance one second.
    ///
    /// Returns the expiry signal on the tick that reaches zero. Outside
    /// `Running` this is a no-op.
    pub fn tick(&mut self) -> Option<Expiry> {
        if self.state != TimerState::Running {
            return None;
        }

        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);

        if self.remaining_seconds == 0 {
            self.state = TimerState::Expired;
            Some(Expiry { mode: self.mode })
        } else {
            None
        }
    }

    /// Change mode from any state, re-arming with the new mode's duration.
    pub fn switch_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.remaining_seconds = self.durations.for_mode(mode);
        self.state = TimerState::Idle;
    }

    /// Re-arm with an explicit duration, keeping the mode.
    pub fn reset(&mut self, duration_seconds: u32) {
        self.remaining_seconds = duration_seconds;
        self.state = TimerState::Idle;
    }

    #[must_use]
    pub const fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    #[must_use]
    pub const fn state(&self) -> TimerState {
        self.state
    }

    #[must_use]
    pub const fn durations(&self) -> ModeDurations {
        self.durations
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.state == TimerState::Expired
    }

    /// Whether the countdown still holds the mode's full duration.
    #[must_use]
    pub const fn is_fresh(&self) -> bool {
        self.remaining_seconds == self.durations.for_mode(self.mode)
    }

    #[must_use]
    pub const fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            remaining_seconds: self.remaining_seconds,
            mode: self.mode,
            state: self.state,
        }
    }

    /// Remaining time as zero-padded `MM:SS`.
    #[must_use]
    pub fn format_remaining(&self) -> String {
        format_mmss(self.remaining_seconds)
    }

    /// Fraction of the mode's configured duration already consumed (0.0 - 1.0).
    #[must_use]
    pub fn progress(&self) -> f64 {
        let total = self.durations.for_mode(self.mode);
        if total == 0 {
            return 1.0;
        }
        let consumed = total.saturating_sub(self.remaining_seconds);
        (f64::from(consumed) / f64::from(total)).min(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(seconds: u32) -> TimerEngine {
        TimerEngine::new(ModeDurations::uniform(seconds), Mode::Focus)
    }

    #[test]
    fn test_new_engine_is_idle() {
        let timer = engine(1200);
        assert_eq!(timer.state(), TimerState::Idle);
        assert_eq!(timer.remaining_seconds(), 1200);
        assert_eq!(timer.mode(), Mode::Focus);
        assert!(timer.is_fresh());
    }

    #[test]
    fn test_start_only_from_idle() {
        let mut timer = engine(10);
        assert!(timer.start());
        assert!(!timer.start());
        assert!(timer.is_running());
    }

    #[test]
    fn test_zero_duration_cannot_start() {
        let mut timer = engine(0);
        assert!(!timer.start());
        assert_eq!(timer.state(), TimerState::Idle);
    }

    #[test]
    fn test_pause_preserves_remaining() {
        let mut timer = engine(10);
        timer.start();
        timer.tick();
        timer.tick();
        assert!(timer.pause());
        assert_eq!(timer.state(), TimerState::Idle);
        assert_eq!(timer.remaining_seconds(), 8);

        // Idle ticks change nothing
        assert!(timer.tick().is_none());
        assert_eq!(timer.remaining_seconds(), 8);

        assert!(!timer.pause());
    }

    #[test]
    fn test_remaining_non_increasing_while_running() {
        let mut timer = engine(50);
        timer.start();
        let mut last = timer.remaining_seconds();
        for step in 0..60 {
            timer.tick();
            let now = timer.remaining_seconds();
            assert!(now <= last);
            if step % 7 == 0 {
                timer.pause();
                timer.tick();
                assert_eq!(timer.remaining_seconds(), now);
                timer.start();
            }
            last = now;
        }
        assert_eq!(timer.remaining_seconds(), 0);
    }

    #[test]
    fn test_expiry_fires_exactly_once() {
        let mut timer = engine(5);
        timer.start();

        let mut expiries = 0;
        for _ in 0..5 {
            if timer.tick().is_some() {
                expiries += 1;
            }
        }
        assert_eq!(expiries, 1);
        assert!(timer.is_expired());
        assert_eq!(timer.remaining_seconds(), 0);

        // Further ticks stay silent
        for _ in 0..3 {
            assert!(timer.tick().is_none());
        }
        assert_eq!(timer.remaining_seconds(), 0);
    }

    #[test]
    fn test_expired_rejects_start_and_toggle() {
        let mut timer = engine(1);
        timer.start();
        assert_eq!(timer.tick(), Some(Expiry { mode: Mode::Focus }));
        assert!(!timer.start());
        assert!(!timer.toggle());
        assert!(!timer.pause());
        assert!(timer.is_expired());
    }

    #[test]
    fn test_toggle_alternates() {
        let mut timer = engine(10);
        assert!(timer.toggle());
        assert!(timer.is_running());
        assert!(timer.toggle());
        assert_eq!(timer.state(), TimerState::Idle);
    }

    #[test]
    fn test_switch_mode_resets_from_any_state() {
        let durations = ModeDurations { focus: 3, rest: 7 };

        let mut idle = TimerEngine::new(durations, Mode::Focus);
        idle.switch_mode(Mode::Rest);
        assert_eq!(idle.snapshot(), TimerSnapshot { remaining_seconds: 7, mode: Mode::Rest, state: TimerState::Idle });

        let mut running = TimerEngine::new(durations, Mode::Focus);
        running.start();
        running.tick();
        running.switch_mode(Mode::Rest);
        assert_eq!(running.state(), TimerState::Idle);
        assert_eq!(running.remaining_seconds(), 7);

        let mut expired = TimerEngine::new(durations, Mode::Focus);
        expired.start();
        for _ in 0..3 {
            expired.tick();
        }
        assert!(expired.is_expired());
        expired.switch_mode(Mode::Focus);
        assert_eq!(expired.state(), TimerState::Idle);
        assert_eq!(expired.remaining_seconds(), 3);
    }

    #[test]
    fn test_reset_keeps_mode() {
        let mut timer = TimerEngine::new(ModeDurations::default(), Mode::Rest);
        timer.start();
        timer.tick();
        timer.reset(90);
        assert_eq!(timer.mode(), Mode::Rest);
        assert_eq!(timer.remaining_seconds(), 90);
        assert_eq!(timer.state(), TimerState::Idle);
    }

    #[test]
    fn test_full_focus_then_rest_scenario() {
        let mut timer = TimerEngine::new(ModeDurations::uniform(1200), Mode::Focus);
        timer.start();

        let mut expiries = 0;
        for _ in 0..1200 {
            if timer.tick().is_some() {
                expiries += 1;
            }
        }
        assert_eq!(expiries, 1);
        assert_eq!(timer.state(), TimerState::Expired);
        assert_eq!(timer.remaining_seconds(), 0);

        timer.switch_mode(Mode::Rest);
        assert_eq!(timer.state(), TimerState::Idle);
        assert_eq!(timer.remaining_seconds(), 1200);
        assert_eq!(timer.mode(), Mode::Rest);
    }

    #[test]
    fn test_format_remaining() {
        let mut timer = engine(1200);
        assert_eq!(timer.format_remaining(), "20:00");
        timer.reset(65);
        assert_eq!(timer.format_remaining(), "01:05");
    }

    #[test]
    fn test_progress() {
        let mut timer = engine(100);
        assert!(timer.progress().abs() < f64::EPSILON);
        timer.start();
        for _ in 0..50 {
            timer.tick();
        }
        assert!((timer.progress() - 0.5).abs() < 0.01);
    }
}
