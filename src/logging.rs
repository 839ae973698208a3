//! Logging setup for host processes.

use crate::errors::TableError;

/// Map a verbosity count to a log level.
pub fn log_level(verbosity: u8) -> log::LevelFilter {
    match verbosity {
        0 => log::LevelFilter::Info,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    }
}

/// Send all log records of the rate engine to `path`.
///
/// Loaded tables and classification decisions are logged at debug level.
pub fn setup_logger(path: &str, verbosity: u8) -> Result<(), TableError> {
    simple_logging::log_to_file(path, log_level(verbosity))
        .map_err(|err| TableError::IoError(path.to_string(), err))
}
