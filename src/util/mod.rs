//! Utility modules for hdtop.

mod format;

pub use format::{format_datetime, format_elapsed_time, format_memory, format_percent};
