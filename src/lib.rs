//! studylog - a study timer with a session log
//!
//! This crate provides a focus/rest countdown, a validated and persistent
//! log of study sessions, and a terminal front end for both.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod features;
pub mod output;
pub mod storage;
pub mod tui;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::StudyError;
pub use features::focus::{Mode, TimerEngine, TimerState};
pub use features::history::{SessionLog, SessionRecord, SessionStore};
pub use features::session::StudySession;
