//! Countdown timer and study-technique rotation.
//!
//! - Three-state countdown driven by an external one-second pulse
//! - Focus/rest modes with per-mode durations
//! - Fixed rotation of study-technique prompts

pub mod mode;
pub mod technique;
pub mod timer;

pub use mode::{Mode, ModeDurations, DEFAULT_PHASE_SECONDS};
pub use technique::{Technique, TechniqueRotation};
pub use timer::{Expiry, TimerEngine, TimerSnapshot, TimerState};
