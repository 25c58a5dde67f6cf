//! Finds the source-language files a run should translate.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use locport::{Platform, codec, paths};
use rayon::prelude::*;
use serde_json::Value;
use tracing::{debug, warn};

/// Characters outside ASCII that still count as English text.
const ALLOWED_NON_ASCII: [char; 10] = [
    '\u{2018}', // ‘
    '\u{2019}', // ’
    '\u{201C}', // “
    '\u{201D}', // ”
    '\u{2022}', // •
    '\u{00A9}', // ©
    '\u{2014}', // —
    '\u{2028}', // line separator
    '\u{00A0}', // no-break space
    '\u{2026}', // …
];

/// Splits a comma-separated list of paths.
pub fn split_inputs(raw: &str) -> Vec<PathBuf> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .collect()
}

/// Builds one matcher for every `--exclude` pattern.
pub fn build_excludes(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .with_context(|| format!("Invalid exclude pattern '{}'", pattern))?;
        builder.add(glob);
    }
    Ok(builder.build()?)
}

/// Returns the first character that is not English-only text, with its
/// character index.
pub fn first_foreign_char(text: &str) -> Option<(usize, char)> {
    text.chars()
        .enumerate()
        .find(|(_, c)| !c.is_ascii() && !ALLOWED_NON_ASCII.contains(c) && (*c as u32) <= 0xFFFF)
}

pub fn is_english_only(text: &str) -> bool {
    first_foreign_char(text).is_none()
}

/// Collects translatable source files under `inputs`.
///
/// Directories are walked (honoring `.gitignore`) and keep only files in a
/// source-language location. Explicit files skip the location rule, except
/// portal JSON, which is only picked up from directories. Every candidate
/// must hold English-only text. The result is sorted and free of duplicates.
pub fn discover(
    inputs: &[PathBuf],
    platform: Option<Platform>,
    excludes: &GlobSet,
) -> Result<Vec<PathBuf>> {
    let mut candidates = Vec::new();

    for input in inputs {
        let metadata = std::fs::metadata(input)
            .with_context(|| format!("Cannot read source path {}", input.display()))?;

        if metadata.is_file() {
            match Platform::from_path(input) {
                Ok(Platform::Portal) => {
                    debug!(path = %input.display(), "Skipping explicit portal file");
                }
                Ok(_) => candidates.push(input.clone()),
                Err(_) => bail!("Unsupported source file {}", input.display()),
            }
            continue;
        }

        for entry in WalkBuilder::new(input).hidden(false).build() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };
            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }
            if is_walk_candidate(entry.path()) {
                candidates.push(entry.into_path());
            }
        }
    }

    let mut files: Vec<PathBuf> = candidates
        .into_par_iter()
        .filter(|path| platform.is_none_or(|p| Platform::from_path(path).is_ok_and(|f| f == p)))
        .filter(|path| !excludes.is_match(path))
        .filter(|path| has_english_content(path))
        .collect();

    files.sort();
    files.dedup();
    Ok(files)
}

fn is_walk_candidate(path: &Path) -> bool {
    let Ok(platform) = Platform::from_path(path) else {
        return false;
    };
    if !paths::is_source_location(path, platform) {
        return false;
    }
    platform != Platform::Portal || is_flat_portal_file(path)
}

/// A portal file is a non-empty JSON object whose values are not all objects.
fn is_flat_portal_file(path: &Path) -> bool {
    let value = match codec::read_text(path)
        .map_err(|e| e.to_string())
        .and_then(|text| serde_json::from_str::<Value>(&text).map_err(|e| e.to_string()))
    {
        Ok(value) => value,
        Err(e) => {
            debug!(path = %path.display(), "Skipping JSON file: {}", e);
            return false;
        }
    };

    match value {
        Value::Object(map) => !map.is_empty() && !map.values().all(Value::is_object),
        _ => false,
    }
}

fn has_english_content(path: &Path) -> bool {
    let text = match codec::read_text(path) {
        Ok(text) => text,
        Err(e) => {
            warn!(path = %path.display(), "Cannot read file: {}", e);
            return false;
        }
    };
    match first_foreign_char(&text) {
        None => true,
        Some((index, c)) => {
            warn!(
                path = %path.display(),
                "Character not supported at {}: {:?} (U+{:04X})",
                index,
                c,
                c as u32
            );
            false
        }
    }
}
