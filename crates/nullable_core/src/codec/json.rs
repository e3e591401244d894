//! JSON encoding for `Nullable<T>`.
//!
//! # Responsibility
//! - Implement `serde` traits so nullable fields embed in derived records.
//! - Provide in-place `encode`/`decode` over raw JSON bytes.
//!
//! # Invariants
//! - Only the exact 4-byte literal `null` is treated as absence by `decode`.
//! - `decode` marks the container valid before decoding the payload; a
//!   failed decode leaves an unusable container.

use crate::logging::sanitize_message;
use crate::model::nullable::Nullable;
use crate::storage::null::SqlNull;
use log::debug;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error;
use std::fmt::{Display, Formatter};

const NULL_LITERAL: &[u8] = b"null";
const MAX_ERROR_CHARS: usize = 160;

/// Error raised when JSON cannot be mapped to or from `T`.
#[derive(Debug)]
pub enum DecodeError {
    /// Input bytes are malformed or do not match `T`.
    Json(serde_json::Error),
    /// `T`'s `Serialize` impl rejected the held value.
    Encode(serde_json::Error),
}

impl Display for DecodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(err) => write!(f, "invalid nullable json: {err}"),
            Self::Encode(err) => write!(f, "cannot encode nullable value: {err}"),
        }
    }
}

impl Error for DecodeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) | Self::Encode(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for DecodeError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl<T> Nullable<T> {
    /// Encodes to JSON bytes: `null` when absent, `T`'s encoding otherwise.
    ///
    /// A present value whose own encoding is `null` (non-finite floats,
    /// `None` inside `Option<U>`, `()`) still encodes as `null` and decodes
    /// back as absent. Such values do not round-trip.
    ///
    /// # Errors
    /// - Returns `DecodeError::Encode` when `T`'s `Serialize` impl fails.
    pub fn encode(&self) -> Result<Vec<u8>, DecodeError>
    where
        T: Serialize,
    {
        match self.ptr() {
            Some(value) => serde_json::to_vec(value).map_err(DecodeError::Encode),
            None => Ok(NULL_LITERAL.to_vec()),
        }
    }

    /// Overwrites `self` from JSON bytes.
    ///
    /// # Errors
    /// - Returns `DecodeError::Json` when `data` is malformed or does not
    ///   match `T`. The validity flag has already been set at that point, so
    ///   the container must be discarded by the caller.
    pub fn decode(&mut self, data: &[u8]) -> Result<(), DecodeError>
    where
        T: DeserializeOwned + Default,
    {
        if data == NULL_LITERAL {
            self.inner = SqlNull::null();
            return Ok(());
        }

        self.inner.valid = true;
        match serde_json::from_slice::<T>(data) {
            Ok(value) => {
                self.inner.value = value;
                Ok(())
            }
            Err(err) => {
                debug!(
                    "event=nullable_decode module=codec status=error input_len={} error={}",
                    data.len(),
                    sanitize_message(&err.to_string(), MAX_ERROR_CHARS)
                );
                Err(err.into())
            }
        }
    }
}

impl<T: Serialize> Serialize for Nullable<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.ptr() {
            Some(value) => serializer.serialize_some(value),
            None => serializer.serialize_none(),
        }
    }
}

/// Accepts `null` (or a missing struct field) as absence.
impl<'de, T> Deserialize<'de> for Nullable<T>
where
    T: Deserialize<'de> + Default,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(Self::from)
    }
}

#[cfg(test)]
mod tests {
    use super::DecodeError;
    use crate::model::nullable::Nullable;

    #[test]
    fn decode_exact_null_resets_value() {
        let mut target = Nullable::of_value(3_i32);
        target.decode(b"null").expect("null literal should decode");
        assert_eq!(target, Nullable::empty());
    }

    #[test]
    fn failed_decode_leaves_valid_flag_set() {
        let mut target = Nullable::<i32>::empty();
        let err = target
            .decode(b"\"not a number\"")
            .expect_err("string must not decode into i32");
        assert!(matches!(err, DecodeError::Json(_)));
        assert!(target.is_valid());
    }

    #[test]
    fn padded_null_is_not_the_null_literal() {
        let mut target = Nullable::<i32>::empty();
        assert!(target.decode(b" null").is_err());
    }

    #[test]
    fn encode_non_string_map_key_is_an_encode_error() {
        let mut map = std::collections::BTreeMap::new();
        map.insert(vec![1_u8], 1_i32);
        let err = Nullable::of_value(map)
            .encode()
            .expect_err("sequence keys cannot be json object keys");
        assert!(matches!(err, DecodeError::Encode(_)));
        assert!(err.to_string().starts_with("cannot encode nullable value"));
    }

    #[test]
    fn non_finite_float_encodes_as_null_and_decodes_absent() {
        let encoded = Nullable::of_value(f64::NAN)
            .encode()
            .expect("nan encodes through serde_json");
        assert_eq!(encoded, b"null");

        let mut decoded = Nullable::of_value(1.0_f64);
        decoded.decode(&encoded).expect("null literal should decode");
        assert!(!decoded.is_valid());
    }

    #[test]
    fn encode_string_is_quoted() {
        let encoded = Nullable::of_value("a\"b".to_string())
            .encode()
            .expect("string should encode");
        assert_eq!(encoded, br#""a\"b""#.to_vec());
    }
}
