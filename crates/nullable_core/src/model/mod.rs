//! Value model for nullable data.
//!
//! # Responsibility
//! - Define the container that distinguishes "absent" from "zero value".
//! - Keep construction and read access free of codec concerns.
//!
//! # Invariants
//! - An invalid container always holds `T::default()` as its placeholder.

pub mod nullable;
