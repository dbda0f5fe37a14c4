//! Changelog engine for chlog.
//!
//! This crate turns raw `git log` text into a grouped changelog:
//! parse, filter, dedupe, group, format and assemble.

mod changelog;
mod error;
mod factory;
mod filters;

pub use changelog::{Changelog, State};
pub use error::{CoreError, CoreResult};
pub use factory::{create_filters, create_formatter, create_matcher, create_parser};
pub use filters::{Keyword, Keywords, MinMessageLength, MinWordCount, build_filters};
