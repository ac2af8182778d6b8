//! Append-aware tailing of log files.
//!
//! A fetch resolves a log name under the configured directory, decides where to
//! start reading (first load, poll, or rollover), reads the complete lines that
//! follow, and runs each through the filter pipeline. The only state carried
//! between calls is the byte offset handed back to the client.
//!
//! name --> offset --> reader --> filter --> TailResult

mod error;
mod filter;
mod name;
mod offset;
mod reader;
mod request;
mod tailer;
#[cfg(test)]
mod tests;

pub use error::TailError;
pub use filter::{FilterSpec, HIGHLIGHT_PREFIX_CHARS, LINE_BREAK, STAGES, Stage};
pub use name::{DEFAULT_LOG_NAME, LOG_SUFFIX, ResolveError, normalize_log_name, resolve_log_path};
pub use offset::{ResolvedStart, resolve_start};
pub use reader::{LineReader, RawLine};
pub use request::{TailRequest, params};
pub use tailer::{TailResult, Tailer};
