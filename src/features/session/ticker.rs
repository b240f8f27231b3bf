//! One-second pulse source for the countdown.
//!
//! The ticker does not catch up on missed time. When the event loop is late,
//! the next pulse is simply late and the countdown drifts, like a browser
//! interval timer.

use std::time::{Duration, Instant};

/// Pulse source polled by an event loop.
#[derive(Debug, Clone)]
pub struct Ticker {
    period: Duration,
    last: Option<Instant>,
}

impl Ticker {
    #[must_use]
    pub const fn new(period: Duration) -> Self {
        Self { period, last: None }
    }

    /// A ticker pulsing once per second.
    #[must_use]
    pub const fn every_second() -> Self {
        Self::new(Duration::from_secs(1))
    }

    /// Begin measuring from `now`. Re-arming an armed ticker keeps its phase.
    pub fn arm(&mut self, now: Instant) {
        if self.last.is_none() {
            self.last = Some(now);
        }
    }

    pub fn disarm(&mut self) {
        self.last = None;
    }

    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.last.is_some()
    }

    /// Report whether a pulse is due at `now`.
    ///
    /// A due pulse restarts the period from `now`, so at most one pulse is
    /// reported per call.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.last {
            Some(last) if now.saturating_duration_since(last) >= self.period => {
                self.last = Some(now);
                true
            }
            _ => false,
        }
    }

    /// Time until the next pulse, for sizing an input poll timeout.
    #[must_use]
    pub fn until_next(&self, now: Instant) -> Option<Duration> {
        self.last
            .map(|last| self.period.saturating_sub(now.saturating_duration_since(last)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disarmed_never_pulses() {
        let mut ticker = Ticker::every_second();
        let now = Instant::now();
        assert!(!ticker.poll(now + Duration::from_secs(5)));
        assert!(ticker.until_next(now).is_none());
    }

    #[test]
    fn test_pulses_after_period() {
        let mut ticker = Ticker::every_second();
        let start = Instant::now();
        ticker.arm(start);

        assert!(!ticker.poll(start + Duration::from_millis(999)));
        assert!(ticker.poll(start + Duration::from_millis(1000)));
        assert!(!ticker.poll(start + Duration::from_millis(1500)));
        assert!(ticker.poll(start + Duration::from_millis(2000)));
    }

    #[test]
    fn test_late_poll_gives_single_pulse() {
        let mut ticker = Ticker::every_second();
        let start = Instant::now();
        ticker.arm(start);

        // Three seconds late: one pulse, then the period restarts
        let late = start + Duration::from_secs(3);
        assert!(ticker.poll(late));
        assert!(!ticker.poll(late));
        assert!(!ticker.poll(late + Duration::from_millis(500)));
        assert!(ticker.poll(late + Duration::from_secs(1)));
    }

    #[test]
    fn test_rearm_keeps_phase() {
        let mut ticker = Ticker::every_second();
        let start = Instant::now();
        ticker.arm(start);
        ticker.arm(start + Duration::from_millis(900));
        assert!(ticker.poll(start + Duration::from_secs(1)));
    }

    #[test]
    fn test_disarm_then_arm_restarts() {
        let mut ticker = Ticker::every_second();
        let start = Instant::now();
        ticker.arm(start);
        ticker.disarm();
        assert!(!ticker.is_armed());

        let later = start + Duration::from_secs(10);
        ticker.arm(later);
        assert!(!ticker.poll(later + Duration::from_millis(100)));
        assert_eq!(
            ticker.until_next(later + Duration::from_millis(400)),
            Some(Duration::from_millis(600))
        );
    }
}
