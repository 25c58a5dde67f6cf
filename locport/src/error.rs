//! All error types for the locport crate.
//!
//! These are returned from every fallible operation (decoding, encoding,
//! reading and writing localization files).

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("unknown platform `{0}`")]
    UnknownPlatform(String),

    #[error("unsupported file extension: {0}")]
    UnsupportedExtension(String),

    #[error("strings parse error at line {line}: {message}")]
    Strings { line: usize, message: String },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("invalid resource: {0}")]
    InvalidResource(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("translation unavailable for {} ({language})", path.display())]
    TranslationUnavailable { path: PathBuf, language: String },
}

impl Error {
    /// Creates a `.strings` syntax error located at `line` (1-based).
    pub fn strings(line: usize, message: impl Into<String>) -> Self {
        Error::Strings {
            line,
            message: message.into(),
        }
    }

    /// Returns `true` when the source content was structurally malformed.
    pub fn is_parse(&self) -> bool {
        matches!(
            self,
            Error::Strings { .. } | Error::Json(_) | Error::Xml(_) | Error::InvalidResource(_)
        )
    }
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(value: quick_xml::events::attributes::AttrError) -> Self {
        Error::Xml(quick_xml::Error::InvalidAttr(value))
    }
}
