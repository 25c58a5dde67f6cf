use std::{io, path::PathBuf, sync::Arc};

use anyhow::{Result, bail};
use tracing::info;

use crate::{
    config::{FileConfig, Overrides, Settings},
    convert::parse_platform,
    discovery::{build_excludes, discover, split_inputs},
    languages,
    pipeline::Pipeline,
    report::RunReport,
    translator::{HttpTranslator, Translator},
};

#[derive(Debug, Clone, Default)]
pub struct TranslateOptions {
    pub source: String,
    pub platform: Option<String>,
    pub language: Option<String>,
    pub batch_size: Option<usize>,
    pub endpoint: Option<String>,
    pub config: Option<PathBuf>,
    pub exclude: Vec<String>,
}

/// Resolves settings, discovers files and translates them with an
/// [`HttpTranslator`].
pub async fn run_translate_command(options: TranslateOptions, env_endpoint: Option<String>) -> Result<RunReport> {
    let file = FileConfig::load(options.config.as_deref())?;
    let settings = Settings::resolve(
        file,
        env_endpoint,
        Overrides {
            endpoint: options.endpoint.clone(),
            batch_size: options.batch_size,
        },
    )?;
    let translator = HttpTranslator::from_settings(&settings)?;
    translate_with(Arc::new(translator), &settings, &options).await
}

/// Runs a translation with any [`Translator`]; per-file failures end up in
/// the returned report, only setup problems are errors.
pub async fn translate_with(
    translator: Arc<dyn Translator>,
    settings: &Settings,
    options: &TranslateOptions,
) -> Result<RunReport> {
    let inputs = split_inputs(&options.source);
    if inputs.is_empty() {
        bail!("No source paths given");
    }
    let platform = parse_platform(options.platform.as_deref())?;
    let targets = languages::select(options.language.as_deref(), &settings.languages)?;
    let excludes = build_excludes(&options.exclude)?;

    let files = discover(&inputs, platform, &excludes)?;
    let message = format!("Found {} files", files.len());
    info!("{}\n{}", message, "*".repeat(message.len()));

    let pipeline = Pipeline::new(translator, settings.batch_size);
    let report = pipeline.run(&files, &targets).await;
    report.write_summary(io::stdout().lock())?;
    Ok(report)
}
