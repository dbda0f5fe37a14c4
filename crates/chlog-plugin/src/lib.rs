//! Pluggable pipeline stages for chlog.
//!
//! This crate provides the seams of the changelog pipeline:
//! - [`LineParser`]: Turns one raw log line into a [`LogRecord`](chlog_record::LogRecord)
//! - [`ItemFilter`]: Accepts or rejects parsed records
//! - [`GroupMatcher`]: Classifies a commit message into a named group
//! - [`Formatter`]: Renders a record into a changelog line
//! - [`LogSource`]: Fetches raw log text for a revision range

mod error;
mod traits;

pub use error::{PluginError, PluginResult};
pub use traits::Plugin;
pub use traits::filter::ItemFilter;
pub use traits::formatter::{FormattedLine, Formatter};
pub use traits::matcher::{DEFAULT_GROUP, GroupMatcher};
pub use traits::parser::LineParser;
pub use traits::source::LogSource;
