//! Maintenance helpers for localization directory trees.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use tracing::{info, warn};

pub const DEFAULT_MISSING_LOCALE: &str = "zh.lproj";
pub const DEFAULT_RENAME_FROM: &str = "no.lproj";
pub const DEFAULT_RENAME_TO: &str = "nb.lproj";

fn is_localization_dir(dir: &Path) -> bool {
    dir.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.to_ascii_lowercase().ends_with("localization"))
}

/// Lists every directory under `roots` whose name ends in `Localization` and
/// that has no child named `locale_dir`.
pub fn find_missing_locales<P: AsRef<Path>>(roots: &[P], locale_dir: &str) -> io::Result<Vec<PathBuf>> {
    let mut missing = Vec::new();
    let mut stack = Vec::with_capacity(roots.len());
    for root in roots {
        let root = root.as_ref();
        if fs::metadata(root)?.is_dir() {
            stack.push(root.to_path_buf());
        }
    }

    while let Some(dir) = stack.pop() {
        let mut has_locale = false;
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            if entry.file_name() == locale_dir {
                has_locale = true;
            }
            if entry.file_type()?.is_dir() {
                stack.push(entry.path());
            }
        }

        if is_localization_dir(&dir) && !has_locale {
            info!("Missing {} in: {}", locale_dir, dir.display());
            missing.push(dir);
        }
    }

    missing.sort();
    Ok(missing)
}

/// Renames every directory named `from` under `root` to `to`, returning the
/// `(old, new)` pairs that were renamed. Renamed directories are not
/// searched further.
pub fn rename_locale_dirs<P: AsRef<Path>>(
    root: P,
    from: &str,
    to: &str,
) -> io::Result<Vec<(PathBuf, PathBuf)>> {
    let mut renamed = Vec::new();
    let mut stack = vec![root.as_ref().to_path_buf()];

    while let Some(dir) = stack.pop() {
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }

            let path = entry.path();
            if entry.file_name() != from {
                stack.push(path);
                continue;
            }

            let target = dir.join(to);
            if target.exists() {
                warn!("Not renaming {}: {} already exists", path.display(), target.display());
                continue;
            }
            match fs::rename(&path, &target) {
                Ok(()) => {
                    info!("Renamed: {} -> {}", path.display(), target.display());
                    renamed.push((path, target));
                }
                Err(e) => warn!("Error renaming {}: {}", path.display(), e),
            }
        }
    }

    renamed.sort();
    Ok(renamed)
}
