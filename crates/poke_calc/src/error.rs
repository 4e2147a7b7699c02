//! Error types for building calculation inputs.
//!
//! The damage and KO calculations never fail: malformed distributions and
//! unexpected hit counts are reported through [`soft_error`] and degrade to a
//! safe default. Errors here only come from turning attribute bags into
//! entities.

use std::fmt;

/// Failure while converting an attribute bag into an entity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CalcError {
    UnknownType(String),
    UnknownNature(String),
    UnknownStat(String),
    UnknownStatus(String),
    UnsupportedGeneration(u8),
    InvalidSet { field: &'static str, reason: String },
}

impl fmt::Display for CalcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalcError::UnknownType(name) => write!(f, "unknown type: {name}"),
            CalcError::UnknownNature(name) => write!(f, "unknown nature: {name}"),
            CalcError::UnknownStat(name) => write!(f, "unknown stat: {name}"),
            CalcError::UnknownStatus(name) => write!(f, "unknown status: {name}"),
            CalcError::UnsupportedGeneration(gen) => {
                write!(f, "generation {gen} is not supported by the damage pipeline")
            }
            CalcError::InvalidSet { field, reason } => write!(f, "invalid {field}: {reason}"),
        }
    }
}

impl std::error::Error for CalcError {}

pub type Result<T> = std::result::Result<T, CalcError>;

/// Report a recoverable calculation problem.
///
/// When `err` is set the message is logged at error level, otherwise it is
/// only visible at debug level. Callers continue with their fallback value.
pub fn soft_error(err: bool, message: &str) {
    if err {
        log::error!("{message}");
    } else {
        log::debug!("suppressed: {message}");
    }
}
