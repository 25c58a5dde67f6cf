//! Core, format-agnostic types for locport.
//! Decoders produce these; encoders serialize these.

use std::{
    fmt::{Display, Formatter},
    path::Path,
    str::FromStr,
};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// An insertion-ordered set of localization entries.
///
/// Keys are unique: inserting an existing key replaces its value but keeps
/// the position of the first occurrence, so re-encoded files stay diffable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct LocalizationTable {
    entries: IndexMap<String, String>,
}

impl LocalizationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an entry, returning the value it replaced, if any.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for LocalizationTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = LocalizationTable::new();
        for (key, value) in iter {
            table.insert(key, value);
        }
        table
    }
}

impl IntoIterator for LocalizationTable {
    type Item = (String, String);
    type IntoIter = indexmap::map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// The localization file families locport understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Apple `.strings` string tables.
    Ios,
    /// Android `strings.xml` resources.
    Android,
    /// Flat JSON objects of key to text.
    Portal,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Ios, Platform::Android, Platform::Portal];

    /// Returns the file extension for this platform, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Platform::Ios => "strings",
            Platform::Android => "xml",
            Platform::Portal => "json",
        }
    }

    /// Infers the platform from a file extension (case-insensitive).
    pub fn from_extension(extension: &str) -> Option<Platform> {
        Platform::ALL
            .into_iter()
            .find(|platform| platform.extension().eq_ignore_ascii_case(extension))
    }

    /// Infers the platform from the extension of `path`.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Platform, Error> {
        let path = path.as_ref();
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Platform::from_extension)
            .ok_or_else(|| Error::UnsupportedExtension(path.display().to_string()))
    }
}

/// Renders the lowercase platform name: `ios`, `android` or `portal`.
impl Display for Platform {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Platform::Ios => write!(f, "ios"),
            Platform::Android => write!(f, "android"),
            Platform::Portal => write!(f, "portal"),
        }
    }
}

/// Accepts platform names and their file extensions, case-insensitively.
///
/// ```rust
/// use locport::Platform;
/// assert_eq!("iOS".parse::<Platform>().unwrap(), Platform::Ios);
/// assert_eq!("xml".parse::<Platform>().unwrap(), Platform::Android);
/// assert!("desktop".parse::<Platform>().is_err());
/// ```
impl FromStr for Platform {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        match s.trim_start_matches('.') {
            "ios" | "apple" | "strings" => Ok(Platform::Ios),
            "android" | "xml" => Ok(Platform::Android),
            "portal" | "json" => Ok(Platform::Portal),
            _ => Err(Error::UnknownPlatform(s)),
        }
    }
}

/// A non-fatal finding reported while decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub message: String,
}

impl Diagnostic {
    pub fn new(message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
        }
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// The outcome of decoding a file: its entries and any warnings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Decoded {
    pub table: LocalizationTable,
    pub diagnostics: Vec<Diagnostic>,
}

impl From<LocalizationTable> for Decoded {
    fn from(table: LocalizationTable) -> Self {
        Decoded {
            table,
            diagnostics: Vec::new(),
        }
    }
}
