//! Batched decode, translate and encode of discovered files.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
    time::Instant,
};

use locport::{ConversionJob, Error};
use tracing::{info, warn};

use crate::{
    languages::Language,
    report::{JobOutcome, RunReport},
    translator::{Translator, request_id},
};

/// Runs every file of a language through the translator, `batch_size`
/// files at a time.
pub struct Pipeline {
    translator: Arc<dyn Translator>,
    batch_size: usize,
}

impl Pipeline {
    pub fn new(translator: Arc<dyn Translator>, batch_size: usize) -> Self {
        Pipeline {
            translator,
            batch_size: batch_size.max(1),
        }
    }

    /// Translates `files` into each of `languages`, one language after another.
    pub async fn run(&self, files: &[PathBuf], languages: &[Language]) -> RunReport {
        let mut report = RunReport::new();
        for &language in languages {
            info!("Starting Translation Files To {}", language.name);
            self.run_language(files, language, &mut report).await;
            info!("Completed translations for {}", language.name);
        }
        report
    }

    /// Translates `files` into `language`, merging outcomes into `report`
    /// after each batch.
    pub async fn run_language(&self, files: &[PathBuf], language: Language, report: &mut RunReport) {
        let started = Instant::now();

        for batch in files.chunks(self.batch_size) {
            let handles: Vec<_> = batch
                .iter()
                .map(|path| {
                    let translator = Arc::clone(&self.translator);
                    let path = path.clone();
                    let id = request_id();
                    let task_id = id.clone();
                    let handle = tokio::spawn(async move {
                        process_file(translator.as_ref(), path, language, task_id).await
                    });
                    (handle, id)
                })
                .collect();

            let mut outcomes = Vec::with_capacity(handles.len());
            for ((handle, id), path) in handles.into_iter().zip(batch) {
                let outcome = match handle.await {
                    Ok(outcome) => outcome,
                    Err(e) => {
                        warn!(path = %path.display(), "Translation task aborted: {}", e);
                        JobOutcome::failed(path.clone(), id, format!("task aborted: {e}"))
                    }
                };
                outcomes.push(outcome);
            }
            report.merge(language.name, outcomes);
        }

        report.finish_language(language.name, started.elapsed());
    }
}

async fn process_file(
    translator: &dyn Translator,
    path: PathBuf,
    language: Language,
    request_id: String,
) -> JobOutcome {
    match translate_file(translator, &path, language, &request_id).await {
        Ok(destination) => JobOutcome::succeeded(path, request_id, destination),
        Err(e) => {
            warn!(
                path = %path.display(),
                request_id = %request_id,
                "Error translating file to {}: {}",
                language.name,
                e
            );
            JobOutcome::failed(path, request_id, e.to_string())
        }
    }
}

async fn translate_file(
    translator: &dyn Translator,
    path: &Path,
    language: Language,
    request_id: &str,
) -> Result<PathBuf, Error> {
    let job = ConversionJob::for_path(path, language.code)?;
    let decoded = job.extract()?;
    for diagnostic in &decoded.diagnostics {
        warn!(path = %path.display(), "{}", diagnostic);
    }
    if decoded.table.is_empty() {
        return Err(Error::InvalidResource(format!(
            "no entries to translate in {}",
            path.display()
        )));
    }

    let translated = translator
        .translate(&decoded.table, language, request_id)
        .await
        .ok_or_else(|| Error::TranslationUnavailable {
            path: path.to_path_buf(),
            language: language.name.to_string(),
        })?;

    job.emit(&translated)
}
