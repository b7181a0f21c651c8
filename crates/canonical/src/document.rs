//! Output type of the normalizer.
//!
//! A [`NormalizedDocument`] is the canonical comparison form of one input
//! plus the configuration snapshot and identity hash that produced it. Two
//! documents with equal `sha256_hex` have byte-identical canonical forms under
//! the same configuration version.
//!
//! ```rust
//! use canonical::{normalize_document, NameMapping, NormalizationConfig};
//!
//! let cfg = NormalizationConfig::default();
//! let a = normalize_document(Some("a.sql"), "SELECT 1", &cfg, &NameMapping::new()).unwrap();
//! let b = normalize_document(None, "select   1 -- same", &cfg, &NameMapping::new()).unwrap();
//! assert_eq!(a.canonical_text, "select 1");
//! assert_eq!(a.sha256_hex, b.sha256_hex);
//! ```

use serde::{Deserialize, Serialize};

use crate::config::NormalizationConfig;

/// Canonical comparison form of a document.
///
/// ```text
/// NormalizedDocument
/// ├── name: Option<String>          # originating filename, if any
/// ├── canonical_text: String        # output of the enabled stages
/// ├── sha256_hex: String            # version-aware identity hash
/// ├── canonical_version: u32        # config version used
/// └── config: NormalizationConfig   # config snapshot
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NormalizedDocument {
    pub name: Option<String>,
    pub canonical_text: String,
    pub sha256_hex: String,
    pub canonical_version: u32,
    pub config: NormalizationConfig,
}

impl NormalizedDocument {
    /// Whether both canonical forms are byte-identical under the same version.
    pub fn same_canonical_form(&self, other: &NormalizedDocument) -> bool {
        self.canonical_version == other.canonical_version && self.sha256_hex == other.sha256_hex
    }
}
