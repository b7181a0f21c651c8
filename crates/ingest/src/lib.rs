//! SQL document ingest.
//!
//! This is where source files enter the pipeline. We take raw bytes plus an
//! optional filename and hand back a [`Document`] the later stages can work
//! with.
//!
//! ## What we do here
//!
//! - **Decode** - UTF-8 first, Latin-1 when the bytes are not valid UTF-8.
//!   Decoding never fails; a leading BOM is dropped.
//! - **Classify** - `.sql`, `.csv`, anything else is plain text.
//! - **Flatten CSV** - header dropped, one comma-joined line per data row.
//! - **Enforce ceilings** - byte and line limits, checked before any of the
//!   quadratic diff work happens downstream.
//! - **Log** - structured events via tracing (`ingest_success`,
//!   `decode_fallback`, `ingest_failure`).
//!
//! ## Example
//!
//! ```
//! use ingest::{ingest_bytes, IngestConfig, SourceFormat, TextEncoding};
//!
//! let doc = ingest_bytes(Some("orders.sql"), b"SELECT TOP 5 * FROM t", &IngestConfig::default()).unwrap();
//! assert_eq!(doc.format, SourceFormat::Sql);
//! assert_eq!(doc.encoding, TextEncoding::Utf8);
//! assert_eq!(doc.text, "SELECT TOP 5 * FROM t");
//! ```
use std::path::Path;
use std::time::Instant;

use tracing::{info, warn, Level};

mod config;
mod csv;
mod decode;
mod error;
mod types;

pub use crate::config::{IngestConfig, DEFAULT_MAX_BYTES, DEFAULT_MAX_LINES};
pub use crate::csv::flatten_csv;
pub use crate::decode::decode_bytes;
pub use crate::error::IngestError;
pub use crate::types::{DecodedText, Document, SourceFormat, TextEncoding};

/// Builds a document from raw bytes.
pub fn ingest_bytes(
    name: Option<&str>,
    bytes: &[u8],
    cfg: &IngestConfig,
) -> Result<Document, IngestError> {
    let start = Instant::now();
    let span = tracing::span!(
        Level::INFO,
        "ingest.document",
        name = name.unwrap_or("<input>"),
        raw_len = bytes.len()
    );
    let _guard = span.enter();

    match ingest_inner(name, bytes, cfg) {
        Ok(doc) => {
            let elapsed_micros = start.elapsed().as_micros();
            info!(
                format = doc.format.as_str(),
                encoding = doc.encoding.as_str(),
                text_len = doc.text.len(),
                elapsed_micros,
                "ingest_success"
            );
            Ok(doc)
        }
        Err(err) => {
            let elapsed_micros = start.elapsed().as_micros();
            warn!(error = %err, elapsed_micros, "ingest_failure");
            Err(err)
        }
    }
}

/// Builds a document from text that is already decoded.
pub fn ingest_text(
    name: Option<&str>,
    text: &str,
    cfg: &IngestConfig,
) -> Result<Document, IngestError> {
    ingest_bytes(name, text.as_bytes(), cfg)
}

/// Reads a file and builds a document named after its path.
pub fn ingest_path(path: &Path, cfg: &IngestConfig) -> Result<Document, IngestError> {
    let name = path.to_string_lossy();
    let bytes = std::fs::read(path).map_err(|err| {
        let err = IngestError::Io(format!("{name}: {err}"));
        warn!(error = %err, "ingest_failure");
        err
    })?;
    ingest_bytes(Some(name.as_ref()), &bytes, cfg)
}

fn ingest_inner(
    name: Option<&str>,
    bytes: &[u8],
    cfg: &IngestConfig,
) -> Result<Document, IngestError> {
    cfg.validate()?;

    if let Some(limit) = cfg.max_bytes {
        if bytes.len() > limit {
            return Err(IngestError::PayloadTooLarge {
                size: bytes.len(),
                limit,
            });
        }
    }

    let decoded = decode_bytes(bytes);
    if decoded.encoding == TextEncoding::Latin1Fallback {
        warn!(encoding = decoded.encoding.as_str(), "decode_fallback");
    }

    if let Some(limit) = cfg.max_lines {
        let lines = decoded.text.lines().count();
        if lines > limit {
            return Err(IngestError::TooManyLines { lines, limit });
        }
    }

    let format = SourceFormat::from_name(name);
    let text = if format == SourceFormat::Csv && cfg.flatten_csv {
        flatten_csv(&decoded.text)
    } else {
        decoded.text
    };

    Ok(Document {
        name: name.map(str::to_string),
        text,
        format,
        encoding: decoded.encoding,
    })
}
