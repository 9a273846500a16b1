//! Services around the UI: persistence, search, clock and logging

pub mod log_dirs;
pub mod persistence;
pub mod search;
pub mod time_source;
pub mod tracing_setup;
