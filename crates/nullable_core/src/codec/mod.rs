//! Text codecs for nullable values.
//!
//! # Responsibility
//! - Map absence to the JSON `null` token and presence to `T`'s own encoding.
//!
//! # Invariants
//! - Encoding an empty container always yields exactly `null`.

pub mod json;
