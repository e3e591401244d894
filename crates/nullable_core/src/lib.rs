//! Null-aware value wrapper shared by JSON payloads and SQLite rows.
//! This crate is the single source of truth for null/zero-value semantics.

pub mod codec;
pub mod logging;
pub mod model;
pub mod storage;

pub use codec::json::DecodeError;
pub use logging::{default_log_level, init_logging, logging_status, LogConfig, LoggingError};
pub use model::nullable::Nullable;
pub use storage::null::SqlNull;
pub use storage::{ScanError, ScanResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
