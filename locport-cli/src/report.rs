//! Per-language tally of a `translate` run.

use std::{
    io::{self, Write},
    path::PathBuf,
    time::Duration,
};

use indexmap::IndexMap;

/// One file handled during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub path: PathBuf,
    pub request_id: String,
}

/// The result of one file's decode, translate and encode chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobOutcome {
    pub record: FileRecord,
    /// The written destination, or why the file failed.
    pub result: Result<PathBuf, String>,
}

impl JobOutcome {
    pub fn succeeded(path: PathBuf, request_id: String, destination: PathBuf) -> Self {
        JobOutcome {
            record: FileRecord { path, request_id },
            result: Ok(destination),
        }
    }

    pub fn failed(path: PathBuf, request_id: String, reason: impl Into<String>) -> Self {
        JobOutcome {
            record: FileRecord { path, request_id },
            result: Err(reason.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageReport {
    pub success: Vec<FileRecord>,
    pub failure: Vec<FileRecord>,
    pub elapsed: Duration,
}

/// Results keyed by language name, in the order languages were processed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    languages: IndexMap<String, LanguageReport>,
}

impl RunReport {
    pub fn new() -> Self {
        RunReport::default()
    }

    /// Folds a finished batch into the report.
    pub fn merge(&mut self, language: &str, outcomes: impl IntoIterator<Item = JobOutcome>) {
        let entry = self.languages.entry(language.to_string()).or_default();
        for outcome in outcomes {
            match outcome.result {
                Ok(_) => entry.success.push(outcome.record),
                Err(_) => entry.failure.push(outcome.record),
            }
        }
    }

    /// Records how long `language` took.
    pub fn finish_language(&mut self, language: &str, elapsed: Duration) {
        self.languages
            .entry(language.to_string())
            .or_default()
            .elapsed = elapsed;
    }

    pub fn language(&self, language: &str) -> Option<&LanguageReport> {
        self.languages.get(language)
    }

    pub fn languages(&self) -> impl Iterator<Item = (&str, &LanguageReport)> {
        self.languages.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn saved(&self) -> usize {
        self.languages.values().map(|l| l.success.len()).sum()
    }

    pub fn failed(&self) -> usize {
        self.languages.values().map(|l| l.failure.len()).sum()
    }

    pub fn total_elapsed(&self) -> Duration {
        self.languages.values().map(|l| l.elapsed).sum()
    }

    /// Writes the end-of-run summary.
    pub fn write_summary<W: Write>(&self, mut out: W) -> io::Result<()> {
        let banner = "✔ Translation complete for all languages! Files saved!";
        let rule = "=".repeat(banner.chars().count());

        writeln!(out, "{rule}")?;
        writeln!(out, "{banner}")?;
        for (language, report) in &self.languages {
            writeln!(out, "* {language}:")?;
            writeln!(out, "   • Saved Files: {}", report.success.len())?;
            writeln!(out, "   • Failed Files: {}", report.failure.len())?;
            for failure in &report.failure {
                writeln!(out, "     ✖ {} - {}", failure.request_id, failure.path.display())?;
            }
            writeln!(out, "   • Total Time: {} mins", minutes(report.elapsed))?;
        }
        writeln!(out, "• Total Mins: {} mins", minutes(self.total_elapsed()))?;
        writeln!(out, "{rule}")?;
        Ok(())
    }
}

fn minutes(elapsed: Duration) -> String {
    format!("{:.2}", elapsed.as_secs_f64() / 60.0)
}
