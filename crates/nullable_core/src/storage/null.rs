//! Generic null-aware SQLite primitive.

use super::{ScanError, ScanResult};
use crate::logging::sanitize_message;
use log::debug;
use rusqlite::types::{FromSql, FromSqlResult, ToSql, ToSqlOutput, ValueRef};

const MAX_ERROR_CHARS: usize = 160;

/// A SQLite column value of `T` that may be `NULL`.
///
/// The held value is only meaningful when valid; otherwise it is
/// `T::default()`. Fields stay private so that holds for every instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SqlNull<T> {
    pub(crate) value: T,
    pub(crate) valid: bool,
}

impl<T> SqlNull<T> {
    /// Creates a non-null column value.
    pub fn valid(value: T) -> Self {
        Self { value, valid: true }
    }

    /// Creates a `NULL` column value holding `T::default()`.
    pub fn null() -> Self
    where
        T: Default,
    {
        Self {
            value: T::default(),
            valid: false,
        }
    }

    /// Returns whether the column value is non-null.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Returns the stored value, which is `T::default()` when null.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Overwrites `self` with the converted form of `raw`.
    ///
    /// `NULL` resets to the zero placeholder. Any other value goes through
    /// `T::column_result`; on failure `self` is left unchanged.
    pub fn scan(&mut self, raw: ValueRef<'_>) -> ScanResult<()>
    where
        T: FromSql + Default,
    {
        if let ValueRef::Null = raw {
            *self = Self::null();
            return Ok(());
        }

        let sql_type = raw.data_type();
        match T::column_result(raw) {
            Ok(value) => {
                *self = Self::valid(value);
                Ok(())
            }
            Err(err) => {
                let err = ScanError::from_conversion(err, sql_type);
                debug!(
                    "event=nullable_scan module=storage status=error sql_type={} error={}",
                    sql_type,
                    sanitize_message(&err.to_string(), MAX_ERROR_CHARS)
                );
                Err(err)
            }
        }
    }
}

impl<T: FromSql + Default> FromSql for SqlNull<T> {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let mut scanned = Self::null();
        scanned.scan(value)?;
        Ok(scanned)
    }
}

/// Binds the held value; a null container binds `T::default()`.
impl<T: ToSql + Default> ToSql for SqlNull<T> {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        if self.valid {
            return self.value.to_sql();
        }
        zero_value_output::<T>()
    }
}

/// Converts `T::default()` into an owned bind value.
pub(crate) fn zero_value_output<T: ToSql + Default>() -> rusqlite::Result<ToSqlOutput<'static>> {
    let zero = T::default();
    let output = zero.to_sql()?;
    let owned = match output {
        ToSqlOutput::Borrowed(value) => ToSqlOutput::Owned(value.into()),
        ToSqlOutput::Owned(value) => ToSqlOutput::Owned(value),
        _ => {
            return Err(rusqlite::Error::ToSqlConversionFailure(
                "zero value does not bind to a plain sqlite value".into(),
            ))
        }
    };
    Ok(owned)
}

#[cfg(test)]
mod tests {
    use super::SqlNull;
    use crate::storage::ScanError;
    use rusqlite::types::{Type, ValueRef};

    #[test]
    fn scan_null_resets_to_placeholder() {
        let mut target = SqlNull::valid(9_i64);
        target.scan(ValueRef::Null).expect("NULL should scan");
        assert_eq!(target, SqlNull::null());
    }

    #[test]
    fn scan_integer_into_i64() {
        let mut target = SqlNull::<i64>::null();
        target
            .scan(ValueRef::Integer(42))
            .expect("integer should scan");
        assert_eq!(target, SqlNull::valid(42));
    }

    #[test]
    fn scan_failure_keeps_prior_state() {
        let mut target = SqlNull::valid(5_i64);
        let err = target
            .scan(ValueRef::Text(b"abc"))
            .expect_err("text must not scan into i64");
        assert!(matches!(
            err,
            ScanError::InvalidType {
                sql_type: Type::Text
            }
        ));
        assert_eq!(target, SqlNull::valid(5));
    }

    #[test]
    fn null_to_sql_binds_default_even_with_stale_value() {
        use rusqlite::types::{ToSql, ToSqlOutput, Value};

        let stale = SqlNull {
            value: 5_i64,
            valid: false,
        };
        assert_eq!(
            stale.to_sql().expect("null should bind"),
            ToSqlOutput::Owned(Value::Integer(0))
        );
    }

    #[test]
    fn scan_narrowing_overflow_is_out_of_range() {
        let mut target = SqlNull::<i8>::null();
        let err = target
            .scan(ValueRef::Integer(1_000))
            .expect_err("1000 does not fit in i8");
        assert!(matches!(err, ScanError::OutOfRange(1_000)));
        assert!(!target.valid);
    }
}
