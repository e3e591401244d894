//! `Nullable<T>` as a SQLite row value and bind parameter.
//!
//! # Invariants
//! - Scanning delegates entirely to the contained `SqlNull<T>`.
//! - Producing a bind value never emits SQL `NULL` on its own: a null
//!   container yields `T::default()`. Callers writing nullable columns must
//!   check `is_valid()` (or bind `Option<T>`) when `NULL` must be stored.

use super::null::zero_value_output;
use super::ScanResult;
use crate::model::nullable::Nullable;
use rusqlite::types::{FromSql, FromSqlResult, ToSql, ToSqlOutput, ValueRef};

impl<T> Nullable<T> {
    /// Overwrites `self` from a raw SQLite value.
    ///
    /// # Errors
    /// - Returns `ScanError` when `raw` cannot be converted into `T`; the
    ///   container keeps its prior state in that case.
    pub fn scan(&mut self, raw: ValueRef<'_>) -> ScanResult<()>
    where
        T: FromSql + Default,
    {
        self.inner.scan(raw)
    }

    /// Returns the value handed to the storage layer.
    ///
    /// A null container returns `T::default()`, so the receiver cannot
    /// distinguish "was null" from "was zero".
    pub fn storage_value(&self) -> T
    where
        T: Clone + Default,
    {
        if !self.inner.valid {
            return T::default();
        }
        self.inner.value.clone()
    }
}

impl<T: FromSql + Default> FromSql for Nullable<T> {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let mut scanned = Self::empty();
        scanned.scan(value)?;
        Ok(scanned)
    }
}

/// Mirrors `storage_value`: a null container binds `T::default()`.
impl<T: ToSql + Default> ToSql for Nullable<T> {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        if !self.inner.valid {
            return zero_value_output::<T>();
        }
        self.inner.value.to_sql()
    }
}

#[cfg(test)]
mod tests {
    use crate::model::nullable::Nullable;
    use crate::storage::null::SqlNull;
    use rusqlite::types::{ToSql, ToSqlOutput, Value, ValueRef};

    #[test]
    fn storage_value_of_empty_string_is_zero_value() {
        assert_eq!(Nullable::<String>::empty().storage_value(), "");
    }

    #[test]
    fn to_sql_of_empty_binds_zero_not_null() {
        let empty = Nullable::<i64>::empty();
        let output = empty.to_sql().expect("empty should bind");
        assert_eq!(output, ToSqlOutput::Owned(Value::Integer(0)));
    }

    #[test]
    fn to_sql_agrees_with_storage_value_for_stale_null() {
        let stale = Nullable {
            inner: SqlNull {
                value: 5_i64,
                valid: false,
            },
        };
        assert_eq!(stale.storage_value(), 0);
        assert_eq!(
            stale.to_sql().expect("null should bind"),
            ToSqlOutput::Owned(Value::Integer(stale.storage_value()))
        );
    }

    #[test]
    fn to_sql_of_empty_text_binds_owned_empty_string() {
        let empty = Nullable::<String>::empty();
        assert_eq!(
            empty.to_sql().expect("empty text should bind"),
            ToSqlOutput::Owned(Value::Text(String::new()))
        );
    }

    #[test]
    fn to_sql_of_valid_text_borrows_value() {
        let value = Nullable::of_value("hello".to_string());
        let output = value.to_sql().expect("text should bind");
        assert_eq!(output, ToSqlOutput::Borrowed(ValueRef::Text(b"hello")));
    }
}
