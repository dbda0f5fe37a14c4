//! Log record types for chlog.
//!
//! This crate provides the data model shared by every stage of changelog
//! generation:
//! - [`LogRecord`]: One commit entry parsed from a `git log` line
//! - [`LogFormat`]: The pretty-format layouts a log line can be split by

mod format;
mod record;

pub use format::{FIELD_SEPARATOR, LogFormat, UnknownLogFormat};
pub use record::LogRecord;
