//! Routes a single file through extraction or re-emission.
//!
//! A job starts in the forward direction (decode the source into a table that
//! can be sent for translation) and, once the caller has a translated table,
//! finishes in reverse (encode that table next to the source). The router
//! never talks to a translation service itself.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::{
    codec,
    error::Error,
    paths,
    types::{Decoded, LocalizationTable, Platform},
};

/// One source file to be translated into one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionJob {
    pub source: PathBuf,
    pub platform: Platform,
    pub language: String,
}

/// Which half of the pipeline to run for a job.
#[derive(Debug, Clone, Copy)]
pub enum Direction<'a> {
    /// Decode the source file.
    Forward,
    /// Encode a translated table to the job's destination.
    Reverse(&'a LocalizationTable),
}

/// What a routed job produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Routed {
    Extracted(Decoded),
    Written(PathBuf),
}

impl ConversionJob {
    pub fn new(source: impl Into<PathBuf>, platform: Platform, language: impl Into<String>) -> Self {
        ConversionJob {
            source: source.into(),
            platform,
            language: language.into(),
        }
    }

    /// Builds a job whose platform is inferred from the source extension.
    pub fn for_path(source: impl Into<PathBuf>, language: impl Into<String>) -> Result<Self, Error> {
        let source = source.into();
        let platform = Platform::from_path(&source)?;
        Ok(ConversionJob::new(source, platform, language))
    }

    /// The file this job writes in the reverse direction.
    pub fn destination(&self) -> Result<PathBuf, Error> {
        paths::resolve_destination(&self.source, self.platform, &self.language)
    }

    /// Forward direction: decode the source file.
    pub fn extract(&self) -> Result<Decoded, Error> {
        let decoded = codec::read_file(&self.source, self.platform)?;
        debug!(
            source = %self.source.display(),
            platform = %self.platform,
            entries = decoded.table.len(),
            "extracted"
        );
        Ok(decoded)
    }

    /// Reverse direction: encode `table` and write it to [`Self::destination`].
    pub fn emit(&self, table: &LocalizationTable) -> Result<PathBuf, Error> {
        let destination = self.destination()?;
        paths::ensure_destination_dir(&destination)?;
        let content = codec::encode(self.platform, table, paths::effective_language(&self.language))?;
        std::fs::write(&destination, content)?;
        info!(
            "Converted: {} → {}",
            self.source.display(),
            destination.display()
        );
        Ok(destination)
    }
}

/// Runs one direction of `job`.
pub fn route(job: &ConversionJob, direction: Direction<'_>) -> Result<Routed, Error> {
    match direction {
        Direction::Forward => job.extract().map(Routed::Extracted),
        Direction::Reverse(table) => job.emit(table).map(Routed::Written),
    }
}

/// Returns `true` when `path` has an extension locport can decode.
pub fn is_supported<P: AsRef<Path>>(path: P) -> bool {
    Platform::from_path(path).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_forward_then_reverse_for_ios() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("en.lproj").join("Localizable.strings");
        fs::create_dir_all(source.parent().unwrap()).unwrap();
        fs::write(&source, "/* comment */\n\"a\" = \"b\";\n// note\n\"c\" = \"d\";\n").unwrap();

        let job = ConversionJob::for_path(&source, "fr").unwrap();
        let Routed::Extracted(decoded) = route(&job, Direction::Forward).unwrap() else {
            panic!("forward must extract");
        };
        assert_eq!(decoded.table.len(), 2);

        let translated: LocalizationTable = [("a", "bé"), ("c", "dé")].into_iter().collect();
        let Routed::Written(dest) = route(&job, Direction::Reverse(&translated)).unwrap() else {
            panic!("reverse must write");
        };
        assert!(dest.ends_with("fr.lproj/Localizable.strings"));
        assert_eq!(
            fs::read_to_string(&dest).unwrap(),
            "\"a\" = \"bé\";\n\"c\" = \"dé\";\n"
        );
    }

    #[test]
    fn test_reverse_for_android_creates_values_dir() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("res").join("values").join("strings.xml");
        fs::create_dir_all(source.parent().unwrap()).unwrap();
        fs::write(&source, r#"<resources><string name="k">v</string></resources>"#).unwrap();

        let job = ConversionJob::for_path(&source, "hi").unwrap();
        let table: LocalizationTable = [("k", "it's")].into_iter().collect();
        let dest = job.emit(&table).unwrap();

        assert_eq!(dest, dir.path().join("res").join("values-hi").join("strings.xml"));
        assert!(fs::read_to_string(&dest).unwrap().contains(r"it\'s"));
    }

    #[test]
    fn test_forward_parse_error_surfaces() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("Localization").join("broken.json");
        fs::create_dir_all(source.parent().unwrap()).unwrap();
        fs::write(&source, "{ not json").unwrap();

        let job = ConversionJob::for_path(&source, "fr").unwrap();
        let err = route(&job, Direction::Forward).unwrap_err();
        assert!(err.is_parse());
    }

    #[test]
    fn test_missing_source_is_io_error() {
        let job = ConversionJob::new("/definitely/missing/en.lproj/L.strings", Platform::Ios, "fr");
        assert!(matches!(job.extract(), Err(Error::Io(_))));
    }

    #[test]
    fn test_is_supported() {
        assert!(is_supported("a/b.strings"));
        assert!(!is_supported("a/b.txt"));
    }
}
