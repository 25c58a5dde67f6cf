use std::path::Path;

use anyhow::{Context, Result};
use locport::{Platform, convert};
use tracing::warn;

use crate::languages::validate_code;

#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    pub input_platform: Option<String>,
    pub output_platform: Option<String>,
    pub language: Option<String>,
}

pub fn parse_platform(value: Option<&str>) -> Result<Option<Platform>> {
    value
        .map(|v| v.parse::<Platform>().map_err(anyhow::Error::from))
        .transpose()
}

/// Converts one localization file into another platform's format.
pub fn run_convert_command(input: &Path, output: &Path, options: &ConvertOptions) -> Result<()> {
    let input_platform = parse_platform(options.input_platform.as_deref())?;
    let output_platform = parse_platform(options.output_platform.as_deref())?;
    let language = options.language.as_deref().unwrap_or("en");
    validate_code(language)?;

    let decoded = convert(input, input_platform, output, output_platform, language)
        .with_context(|| format!("Failed to convert {}", input.display()))?;

    for diagnostic in &decoded.diagnostics {
        warn!(path = %input.display(), "{}", diagnostic);
    }
    println!(
        "✅ Converted {} entries: {} → {}",
        decoded.table.len(),
        input.display(),
        output.display()
    );
    Ok(())
}
