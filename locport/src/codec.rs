//! Platform dispatch for decoding and encoding localization content.
//!
//! [`decode`] and [`encode`] work on in-memory text; [`read_file`] and
//! [`write_file`] add the file system, and [`convert`] chains the two to move
//! a file from one platform's format to another's.

use std::{fs, io::Read, path::Path};

use tracing::trace;

use crate::{
    error::Error,
    formats::{AndroidStringsFormat, PortalFormat, StringsFormat},
    traits::Parser,
    types::{Decoded, LocalizationTable, Platform},
};

/// Decodes platform-native `content` into a table of unescaped values.
///
/// Fails with a parse error when the content is structurally malformed.
/// Recoverable oddities (an Android file without `<resources>`) are reported
/// through [`Decoded::diagnostics`] instead.
pub fn decode(platform: Platform, content: &str) -> Result<Decoded, Error> {
    Ok(match platform {
        Platform::Ios => StringsFormat::from_str(content)?.into(),
        Platform::Android => AndroidStringsFormat::from_str(content)?.into(),
        Platform::Portal => PortalFormat::from_str(content)?.into(),
    })
}

/// Encodes `table` in the native format of `platform`.
///
/// `language` is the target language code. Escaping never depends on it; it
/// is accepted so callers can route every job through one signature.
pub fn encode(
    platform: Platform,
    table: &LocalizationTable,
    language: &str,
) -> Result<String, Error> {
    trace!(%platform, language, entries = table.len(), "encoding table");
    match platform {
        Platform::Ios => StringsFormat::from(table).encode_to_string(),
        Platform::Android => AndroidStringsFormat::from(table).encode_to_string(),
        Platform::Portal => PortalFormat::from(table).encode_to_string(),
    }
}

/// Reads a text file as UTF-8.
///
/// UTF-16 files with a byte order mark (as Xcode often writes `.strings`)
/// are transcoded first.
pub fn read_text<P: AsRef<Path>>(path: P) -> Result<String, Error> {
    let file = fs::File::open(path)?;
    let mut decoder = encoding_rs_io::DecodeReaderBytesBuilder::new()
        .bom_override(true)
        .build(file);

    let mut decoded = String::new();
    decoder.read_to_string(&mut decoded)?;
    Ok(decoded)
}

/// Reads and decodes a file, BOM-aware.
pub fn read_file<P: AsRef<Path>>(path: P, platform: Platform) -> Result<Decoded, Error> {
    let path = path.as_ref();
    Ok(match platform {
        Platform::Ios => StringsFormat::read_from(path)?.into(),
        Platform::Android => AndroidStringsFormat::read_from(path)?.into(),
        Platform::Portal => PortalFormat::read_from(path)?.into(),
    })
}

/// Encodes `table` and writes it to `path`, creating parent directories.
pub fn write_file<P: AsRef<Path>>(
    path: P,
    platform: Platform,
    table: &LocalizationTable,
    language: &str,
) -> Result<(), Error> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let content = encode(platform, table, language)?;
    fs::write(path, content)?;
    Ok(())
}

/// Converts a localization file between platforms.
///
/// Platforms default to the ones implied by each path's extension.
///
/// # Example
/// ```rust,no_run
/// use locport::convert;
/// convert("en.lproj/Localizable.strings", None, "values/strings.xml", None, "en")?;
/// Ok::<(), locport::Error>(())
/// ```
pub fn convert<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    input_platform: Option<Platform>,
    output: Q,
    output_platform: Option<Platform>,
    language: &str,
) -> Result<Decoded, Error> {
    let input_platform = match input_platform {
        Some(platform) => platform,
        None => Platform::from_path(&input)?,
    };
    let output_platform = match output_platform {
        Some(platform) => platform,
        None => Platform::from_path(&output)?,
    };

    let decoded = read_file(&input, input_platform)?;
    write_file(&output, output_platform, &decoded.table, language)?;
    Ok(decoded)
}
