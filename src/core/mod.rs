//! Shared utilities for studylog.

pub mod datetime;

pub use datetime::{
    format_duration, format_mmss, format_timestamp, now_local, parse_duration, parse_timestamp,
    TIMESTAMP_FORMAT,
};
