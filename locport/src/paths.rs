//! Destination paths for translated files.
//!
//! | platform | source                         | destination (language `fr`)     |
//! |----------|--------------------------------|---------------------------------|
//! | iOS      | `App/en.lproj/Localizable.strings` | `App/fr.lproj/Localizable.strings` |
//! | Android  | `res/values/strings.xml`       | `res/values-fr/strings.xml`     |
//! | portal   | `Localization/common.json`     | `Localization/common_fr.json`   |

use std::{
    fs,
    path::{Path, PathBuf},
};

use lazy_static::lazy_static;
use regex::Regex;
use unic_langid::LanguageIdentifier;

use crate::{error::Error, types::Platform};

/// Language used when a job carries no language code.
pub const DEFAULT_LANGUAGE: &str = "ar";

lazy_static! {
    static ref PORTAL_DIR_REGEX: Regex = Regex::new(r"(?i)locali[sz]ation").unwrap();
}

/// Returns `language`, or [`DEFAULT_LANGUAGE`] when it is blank.
pub fn effective_language(language: &str) -> &str {
    let trimmed = language.trim();
    if trimmed.is_empty() {
        DEFAULT_LANGUAGE
    } else {
        trimmed
    }
}

/// Computes the output file for `source` translated into `language`.
///
/// Relative sources are resolved against the current directory first, so a
/// bare `Localizable.strings` still has a parent to place siblings next to.
pub fn resolve_destination<P: AsRef<Path>>(
    source: P,
    platform: Platform,
    language: &str,
) -> Result<PathBuf, Error> {
    let source = std::path::absolute(source.as_ref())?;
    let language = effective_language(language);
    let file_name = source.file_name().unwrap_or_default();
    let dir = source.parent().unwrap_or(Path::new("/"));
    let parent = dir.parent().unwrap_or(dir);

    Ok(match platform {
        Platform::Ios => parent.join(format!("{language}.lproj")).join(file_name),
        Platform::Android => parent
            .join(format!("values-{}", android_qualifier(language)))
            .join(file_name),
        Platform::Portal => {
            let stem = source
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            let name = match source.extension() {
                Some(ext) => format!("{stem}_{language}.{}", ext.to_string_lossy()),
                None => format!("{stem}_{language}"),
            };
            dir.join(name)
        }
    })
}

/// Creates the directory that will hold `destination`. Safe to repeat.
pub fn ensure_destination_dir<P: AsRef<Path>>(destination: P) -> Result<(), Error> {
    if let Some(parent) = destination.as_ref().parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Converts a BCP 47 tag into an Android resource qualifier.
///
/// ```rust
/// use locport::paths::android_qualifier;
/// assert_eq!(android_qualifier("fr"), "fr");
/// assert_eq!(android_qualifier("pt-BR"), "pt-rBR");
/// assert_eq!(android_qualifier("zh-Hans"), "b+zh+Hans");
/// ```
pub fn android_qualifier(language: &str) -> String {
    let Ok(id) = language.parse::<LanguageIdentifier>() else {
        return language.to_string();
    };

    match (id.script, id.region) {
        (None, None) => id.language.to_string(),
        (None, Some(region)) => format!("{}-r{}", id.language, region),
        (Some(script), region) => {
            let mut qualifier = format!("b+{}+{}", id.language, script);
            if let Some(region) = region {
                qualifier.push('+');
                qualifier.push_str(region.as_str());
            }
            qualifier
        }
    }
}

/// Returns `true` when `file` sits where source-language files live:
/// `en.lproj` for iOS, `values` for Android, or anywhere below a
/// `Localization`/`Localisation` directory for portal JSON.
pub fn is_source_location<P: AsRef<Path>>(file: P, platform: Platform) -> bool {
    let Some(dir) = file.as_ref().parent() else {
        return false;
    };
    let dir_name = dir.file_name().and_then(|n| n.to_str()).unwrap_or_default();

    match platform {
        Platform::Ios => dir_name == "en.lproj",
        Platform::Android => dir_name == "values",
        Platform::Portal => PORTAL_DIR_REGEX.is_match(&dir.to_string_lossy()),
    }
}
