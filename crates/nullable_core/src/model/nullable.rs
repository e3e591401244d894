//! Nullable value container.
//!
//! # Responsibility
//! - Hold either a present value or an explicit absence marker.
//! - Provide construction, default extraction and display rendering.
//!
//! # Invariants
//! - `is_valid() == false` implies the stored value equals `T::default()`.
//! - State only changes through `decode` (text codec) or `scan` (storage).
//!
//! # See also
//! - `crate::codec::json` for the JSON protocol.
//! - `crate::storage::binding` for the SQLite protocol.

use crate::storage::null::SqlNull;
use std::fmt::{Display, Formatter};

/// A value of `T` that may be null.
///
/// Storage conversion lives in the contained [`SqlNull`]; this type layers
/// the JSON codec and read accessors on top of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Nullable<T> {
    pub(crate) inner: SqlNull<T>,
}

impl<T> Nullable<T> {
    /// Creates a valid container holding `value`.
    pub fn of_value(value: T) -> Self {
        Self {
            inner: SqlNull::valid(value),
        }
    }

    /// Creates an invalid container with the zero value as placeholder.
    pub fn empty() -> Self
    where
        T: Default,
    {
        Self {
            inner: SqlNull::null(),
        }
    }

    /// Returns whether a value is present.
    pub fn is_valid(&self) -> bool {
        self.inner.valid
    }

    /// Returns a shared reference to the value, or `None` when null.
    pub fn ptr(&self) -> Option<&T> {
        if !self.inner.valid {
            return None;
        }
        Some(&self.inner.value)
    }

    /// Returns the value when present, otherwise `default` unchanged.
    pub fn value_or(&self, default: T) -> T
    where
        T: Clone,
    {
        if !self.inner.valid {
            return default;
        }
        self.inner.value.clone()
    }

    /// Converts into `Option<T>`, dropping the placeholder when null.
    pub fn into_option(self) -> Option<T> {
        if !self.inner.valid {
            return None;
        }
        Some(self.inner.value)
    }

    /// Borrows the storage-level representation.
    pub fn as_sql_null(&self) -> &SqlNull<T> {
        &self.inner
    }
}

impl<T: Default> Default for Nullable<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: Default> From<Option<T>> for Nullable<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Self::of_value(value),
            None => Self::empty(),
        }
    }
}

impl<T> From<Nullable<T>> for Option<T> {
    fn from(value: Nullable<T>) -> Self {
        value.into_option()
    }
}

impl<T: Default> From<SqlNull<T>> for Nullable<T> {
    fn from(inner: SqlNull<T>) -> Self {
        if !inner.valid {
            return Self::empty();
        }
        Self { inner }
    }
}

/// Debug rendering: `null` when absent, otherwise `T`'s own `Display`.
///
/// No quoting or escaping is applied; this is not a data format.
impl<T: Display> Display for Nullable<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.ptr() {
            Some(value) => write!(f, "{value}"),
            None => f.write_str("null"),
        }
    }
}
