//! Error types produced by the ingest crate.
//!
//! Decoding never fails: bytes that are not UTF-8 fall back to Latin-1 (see
//! [`crate::decode_bytes`]). What can fail is reading the file, a bad
//! configuration, or a document above the configured ceilings.
//!
//! | Error | Category | Description |
//! |-------|----------|-------------|
//! | [`PayloadTooLarge`](IngestError::PayloadTooLarge) | Limit | Raw byte length above `max_bytes` |
//! | [`TooManyLines`](IngestError::TooManyLines) | Limit | Line count above `max_lines` |
//! | [`Io`](IngestError::Io) | I/O | File could not be read |
//! | [`InvalidConfig`](IngestError::InvalidConfig) | Config | [`crate::IngestConfig::validate`] failed |
//!
//! ```rust
//! use ingest::IngestError;
//!
//! fn exit_code(error: &IngestError) -> i32 {
//!     match error {
//!         IngestError::PayloadTooLarge { .. } | IngestError::TooManyLines { .. } => 3,
//!         _ => 2,
//!     }
//! }
//!
//! assert_eq!(exit_code(&IngestError::TooManyLines { lines: 9, limit: 5 }), 3);
//! ```
use thiserror::Error;

/// Errors that stop a document from entering the pipeline.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum IngestError {
    /// Raw input is larger than `max_bytes`.
    #[error("payload of {size} bytes exceeds limit of {limit} bytes")]
    PayloadTooLarge { size: usize, limit: usize },

    /// Decoded text has more lines than `max_lines`.
    #[error("document has {lines} lines, limit is {limit}")]
    TooManyLines { lines: usize, limit: usize },

    /// Reading the source failed. Carries the path and the OS message.
    #[error("failed to read {0}")]
    Io(String),

    /// The ingest configuration is not usable.
    #[error("invalid ingest configuration: {0}")]
    InvalidConfig(String),
}
