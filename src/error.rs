//! Error types for employee record operations
//!
//! Each kind is recoverable and reported to the immediate caller.

use crate::models::{EmployeeId, Field};
use std::path::PathBuf;
use thiserror::Error;

/// A field value failed its constraint
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("found empty field: {0}")]
    EmptyField(Field),

    #[error("invalid age {0}: must be between 18 and 65")]
    AgeOutOfRange(i32),

    #[error("invalid salary {0}: must be a non-negative amount")]
    InvalidSalary(f64),

    #[error("invalid date of joining {0:?}: expected DD-MMM-YYYY")]
    MalformedDate(String),

    #[error("invalid phone number {0:?}: expected exactly 10 digits")]
    MalformedPhone(String),
}

impl ValidationError {
    /// The field that failed
    pub fn field(&self) -> Field {
        match self {
            ValidationError::EmptyField(field) => *field,
            ValidationError::AgeOutOfRange(_) => Field::Age,
            ValidationError::InvalidSalary(_) => Field::BasicSalary,
            ValidationError::MalformedDate(_) => Field::DateOfJoining,
            ValidationError::MalformedPhone(_) => Field::PhoneNumber,
        }
    }
}

/// No record carries the requested employee number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("employee {0} not found")]
pub struct NotFound(pub EmployeeId);

/// `Store::add` refused a new record
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AddError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("no employee numbers left to assign")]
    IdsExhausted,
}

/// Text input could not be converted to the expected number
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {what}: {input:?} is not {expected}")]
pub struct ParseError {
    pub what: String,
    pub input: String,
    pub expected: &'static str,
}

/// Persisted file could not be read or written
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} line {line}: {source}")]
    Malformed {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("{path} line {line}: not valid UTF-8")]
    InvalidUtf8 { path: PathBuf, line: usize },

    #[error("{path} is not an employee record file (missing header)")]
    MissingHeader { path: PathBuf },

    #[error("{path} has unsupported format version {found} (expected {expected})")]
    UnsupportedVersion {
        path: PathBuf,
        found: u32,
        expected: u32,
    },

    #[error("{path} line {line}: duplicate employee number {id}")]
    DuplicateId {
        path: PathBuf,
        line: usize,
        id: EmployeeId,
    },

    #[error("{path} is in use by another session")]
    Locked { path: PathBuf },
}

impl PersistError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PersistError::Io {
            path: path.into(),
            source,
        }
    }

    /// True when the file exists but its contents cannot be trusted
    pub fn is_corrupt(&self) -> bool {
        matches!(
            self,
            PersistError::Malformed { .. }
                | PersistError::InvalidUtf8 { .. }
                | PersistError::MissingHeader { .. }
                | PersistError::UnsupportedVersion { .. }
                | PersistError::DuplicateId { .. }
        )
    }
}
