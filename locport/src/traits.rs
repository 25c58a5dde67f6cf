//! Traits for format-agnostic parsing and serialization in locport.

use std::{
    io::{BufRead, Cursor, Write},
    path::Path,
};

use crate::error::Error;

/// A trait for parsing and writing one localization file.
///
/// # Example
///
/// ```rust,no_run
/// use locport::traits::Parser;
/// let format = locport::formats::strings::Format::read_from("en.lproj/Localizable.strings")?;
/// println!("{}", format.encode_to_string()?);
/// Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait Parser {
    /// Parse from any reader.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error>
    where
        Self: Sized;

    /// Parse from file path.
    ///
    /// The file is decoded BOM-aware: UTF-16 files with a byte order mark
    /// (as Xcode often writes `.strings`) are transcoded to UTF-8 first.
    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error>
    where
        Self: Sized,
    {
        let decoded = crate::codec::read_text(path)?;
        Self::from_str(&decoded)
    }

    /// Write to any writer (file, memory, etc.).
    fn to_writer<W: Write>(&self, writer: W) -> Result<(), Error>;

    /// Parse from a string.
    fn from_str(s: &str) -> Result<Self, Error>
    where
        Self: Sized,
    {
        Self::from_reader(Cursor::new(s))
    }

    /// Serialize into a UTF-8 string.
    fn encode_to_string(&self) -> Result<String, Error> {
        let mut buffer = Vec::new();
        self.to_writer(&mut buffer)?;
        String::from_utf8(buffer)
            .map_err(|e| Error::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
    }
}
