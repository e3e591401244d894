//! SQLite storage binding for nullable values.
//!
//! # Responsibility
//! - Scan SQLite values (including `NULL`) into typed nullable containers.
//! - Produce bind parameters from nullable containers.
//!
//! # Invariants
//! - Type conversion rules are rusqlite's own `FromSql`/`ToSql` rules;
//!   this layer only adapts the validity flag.
//! - A failed scan leaves the target container untouched.
//!
//! # See also
//! - `rusqlite::types::FromSql`

use rusqlite::types::{FromSqlError, Type};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod binding;
pub mod null;

pub type ScanResult<T> = Result<T, ScanError>;

/// Error returned when a SQLite value cannot be converted into `T`.
#[derive(Debug)]
pub enum ScanError {
    /// The stored value has a storage class `T` does not accept.
    InvalidType { sql_type: Type },
    /// The stored integer does not fit in `T`.
    OutOfRange(i64),
    /// Any other conversion failure reported by `T::column_result`.
    Conversion(FromSqlError),
}

impl ScanError {
    pub(crate) fn from_conversion(err: FromSqlError, sql_type: Type) -> Self {
        match err {
            FromSqlError::InvalidType => Self::InvalidType { sql_type },
            FromSqlError::OutOfRange(value) => Self::OutOfRange(value),
            other => Self::Conversion(other),
        }
    }
}

impl Display for ScanError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidType { sql_type } => {
                write!(f, "cannot scan sqlite {sql_type} value into target type")
            }
            Self::OutOfRange(value) => {
                write!(f, "sqlite integer {value} is out of range for target type")
            }
            Self::Conversion(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ScanError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Conversion(err) => Some(err),
            Self::InvalidType { .. } | Self::OutOfRange(_) => None,
        }
    }
}

impl From<ScanError> for FromSqlError {
    fn from(value: ScanError) -> Self {
        match value {
            ScanError::InvalidType { .. } => Self::InvalidType,
            ScanError::OutOfRange(value) => Self::OutOfRange(value),
            ScanError::Conversion(err) => err,
        }
    }
}
