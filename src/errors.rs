//! All errors that can occur in the epirates library.

use std::fmt;
use std::sync::Arc;

/// Errors raised while loading rate tables, engine settings or naming rules.
///
/// These are configuration errors: the engine cannot produce any rate without its tables, so a
/// host usually aborts the run when it sees one.
#[derive(Debug)]
pub enum TableError {
    IoError(String, std::io::Error),
    CsvError(String, csv::Error),
    /// Path, line number in the file (starting at 1) and offending value.
    ParseError(String, usize, String),
    MissingValue(String, String),
    YamlError(serde_yaml::Error),
    PatternError(String, regex::Error),
}

/// Errors raised while evaluating a rate callback.
#[derive(Debug)]
pub enum RateError {
    /// Rate tables could not be loaded. The first failure is kept and returned on every call.
    Config(Arc<TableError>),
    /// No rate is tabulated for the calendar year.
    UnknownYearRate { table: &'static str, year: usize },
    /// A transition name could not be mapped to an age class.
    UnknownAgeClass(String),
    /// A transition name matched no contact pattern or no rate category.
    UnclassifiedTransition(String),
    /// An age class has no individuals while a rate is normalized by its size.
    EmptyAgeClass(usize),
    /// The transition index is outside of the net.
    UnknownTransition(usize),
    /// A place referenced by name does not exist in the net.
    UnknownPlace(String),
}

pub type Result<T> = std::result::Result<T, RateError>;

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TableError::IoError(path, error) => write!(f, "Unable to open {path}: {error}"),
            TableError::CsvError(path, error) => write!(f, "Unable to read {path}: {error}"),
            TableError::ParseError(path, line, value) => {
                write!(f, "Invalid value {value:?} in {path} at line {line}")
            }
            TableError::MissingValue(path, what) => write!(f, "Missing {what} in {path}"),
            TableError::YamlError(error) => write!(f, "YAML error: {error}"),
            TableError::PatternError(pattern, error) => {
                write!(f, "Invalid naming pattern {pattern:?}: {error}")
            }
        }
    }
}

impl std::error::Error for TableError {}

impl fmt::Display for RateError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RateError::Config(error) => write!(f, "ConfigLoadError: {error}"),
            RateError::UnknownYearRate { table, year } => {
                write!(f, "UnknownYearRate: no {table} rate for year {year}")
            }
            RateError::UnknownAgeClass(transition) => {
                write!(f, "UnknownAgeClass: no age class for transition {transition}")
            }
            RateError::UnclassifiedTransition(transition) => {
                write!(f, "UnclassifiedTransition: transition {transition} not found")
            }
            RateError::EmptyAgeClass(class) => {
                write!(f, "EmptyAgeClass: age class {} has no population", class + 1)
            }
            RateError::UnknownTransition(index) => {
                write!(f, "UnknownTransition: no transition with index {index}")
            }
            RateError::UnknownPlace(name) => write!(f, "UnknownPlace: no place named {name}"),
        }
    }
}

impl std::error::Error for RateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RateError::Config(error) => Some(error.as_ref()),
            _ => None,
        }
    }
}

impl From<TableError> for RateError {
    fn from(error: TableError) -> Self {
        RateError::Config(Arc::new(error))
    }
}
