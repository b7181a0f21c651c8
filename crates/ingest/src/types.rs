use std::path::Path;

use serde::{Deserialize, Serialize};

/// Kind of document, inferred from the file extension.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    Sql,
    #[default]
    Text,
    Csv,
}

impl SourceFormat {
    /// `.sql` and `.csv` are recognised case-insensitively; anything else,
    /// including no name, is plain text.
    pub fn from_name(name: Option<&str>) -> Self {
        let ext = name
            .and_then(|n| Path::new(n).extension())
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("sql") => SourceFormat::Sql,
            Some("csv") => SourceFormat::Csv,
            _ => SourceFormat::Text,
        }
    }

    /// Only SQL and plain-text documents are fed to the translator.
    pub fn is_translatable(&self) -> bool {
        matches!(self, SourceFormat::Sql | SourceFormat::Text)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceFormat::Sql => "sql",
            SourceFormat::Text => "text",
            SourceFormat::Csv => "csv",
        }
    }
}

/// Encoding the bytes were decoded with.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TextEncoding {
    Utf8,
    /// Bytes were not valid UTF-8 and were read as ISO-8859-1.
    Latin1Fallback,
}

impl TextEncoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Latin1Fallback => "latin-1",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedText {
    pub text: String,
    pub encoding: TextEncoding,
}

/// An immutable block of text plus the name it came from.
///
/// ```text
/// Document
/// ├── name: Option<String>     # originating filename, if any
/// ├── text: String             # decoded (and, for CSV, flattened) text
/// ├── format: SourceFormat     # sql | text | csv
/// └── encoding: TextEncoding   # utf8 | latin1_fallback
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Document {
    pub name: Option<String>,
    pub text: String,
    pub format: SourceFormat,
    pub encoding: TextEncoding,
}

impl Document {
    /// A UTF-8 document whose format is inferred from `name`, with no
    /// decoding or flattening applied.
    pub fn new(name: Option<&str>, text: impl Into<String>) -> Self {
        Self {
            name: name.map(str::to_string),
            text: text.into(),
            format: SourceFormat::from_name(name),
            encoding: TextEncoding::Utf8,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<input>")
    }
}
