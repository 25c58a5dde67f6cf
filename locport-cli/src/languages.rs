//! The catalogue of target languages.
//!
//! A language has a display name, sent to the translation service and used
//! to key the run report, and a code, used to name destination directories.

use std::fmt::{Display, Formatter};

use anyhow::{Result, bail};
use unic_langid::LanguageIdentifier;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Language {
    pub name: &'static str,
    pub code: &'static str,
}

impl Language {
    const fn new(name: &'static str, code: &'static str) -> Self {
        Language { name, code }
    }
}

impl Display for Language {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.code)
    }
}

/// Every language a `translate` run targets, in processing order.
pub const CATALOGUE: &[Language] = &[
    Language::new("Hindi", "hi"),
    Language::new("French", "fr"),
    Language::new("Urdu", "ur"),
    Language::new("Filipino", "fil"),
    Language::new("Persian", "fa"),
    Language::new("Punjabi", "pa"),
    Language::new("Bengali", "bn"),
    Language::new("Russian", "ru"),
    Language::new("Chinese", "zh"),
    Language::new("Nepali", "ne"),
    Language::new("Marathi", "mr"),
    Language::new("Malay", "ms"),
    Language::new("Albanian", "sq"),
    Language::new("Armenian", "hy"),
    Language::new("Azerbaijani", "az"),
    Language::new("Basque", "eu"),
    Language::new("Bosnian", "bs"),
    Language::new("Brazilian Portuguese", "pt-BR"),
    Language::new("Bulgarian", "bg"),
    Language::new("Catalan", "ca"),
    Language::new("Croatian", "hr"),
    Language::new("Czech", "cs"),
    Language::new("Danish", "da"),
    Language::new("Dutch", "nl"),
    Language::new("Estonian", "et"),
    Language::new("Finnish", "fi"),
    Language::new("Galician", "gl"),
    Language::new("Georgian", "ka"),
    Language::new("German", "de"),
    Language::new("Greek", "el"),
    Language::new("Gujarati", "gu"),
    Language::new("Hungarian", "hu"),
    Language::new("Indonesian", "id"),
    Language::new("Italian", "it"),
    Language::new("Japanese", "ja"),
    Language::new("Kannada", "kn"),
    Language::new("Kazakh", "kk"),
    Language::new("Korean", "ko"),
    Language::new("Latvian", "lv"),
    Language::new("Lithuanian", "lt"),
    Language::new("Macedonian", "mk"),
    Language::new("Maltese", "mt"),
    Language::new("Mandarin", "zh-CN"),
    Language::new("Mongolian", "mn"),
    Language::new("Norwegian", "nb"),
    Language::new("Oriya", "or"),
    Language::new("Pashto", "ps"),
    Language::new("Polish", "pl"),
    Language::new("Portuguese", "pt"),
    Language::new("Romanian", "ro"),
    Language::new("Serbian", "sr"),
    Language::new("Sinhala", "si"),
    Language::new("Slovak", "sk"),
    Language::new("Slovene", "sl"),
    Language::new("Ukrainian", "uk"),
    Language::new("Uzbek", "uz"),
    Language::new("Vietnamese", "vi"),
    Language::new("Welsh", "cy"),
    Language::new("zh-Hans", "zh-Hans"),
    Language::new("zh-Hant", "zh-Hant"),
];

/// Looks a language up by code, or by name, ignoring case.
pub fn find(query: &str) -> Option<Language> {
    let query = query.trim();
    CATALOGUE
        .iter()
        .find(|l| l.code.eq_ignore_ascii_case(query))
        .or_else(|| CATALOGUE.iter().find(|l| l.name.eq_ignore_ascii_case(query)))
        .copied()
}

/// Chooses the languages for a run.
///
/// An explicit `requested` language wins. Otherwise the whole catalogue is
/// used, narrowed to `allowed` when that list is non-empty. Unknown codes in
/// either place are errors.
pub fn select(requested: Option<&str>, allowed: &[String]) -> Result<Vec<Language>> {
    if let Some(requested) = requested {
        return match find(requested) {
            Some(language) => Ok(vec![language]),
            None => bail!("Unknown language '{}'. Run `locport languages` for the list", requested),
        };
    }

    if allowed.is_empty() {
        return Ok(CATALOGUE.to_vec());
    }

    let mut selected = Vec::with_capacity(allowed.len());
    for code in allowed {
        let Some(language) = find(code) else {
            bail!("Unknown language '{}' in configuration", code);
        };
        if !selected.contains(&language) {
            selected.push(language);
        }
    }
    // Keep catalogue order regardless of how the list was written.
    selected.sort_by_key(|l| CATALOGUE.iter().position(|c| c == l));
    Ok(selected)
}

/// Validates a free-form language code for local conversions.
pub fn validate_code(code: &str) -> Result<()> {
    if find(code).is_some() {
        return Ok(());
    }
    match code.parse::<LanguageIdentifier>() {
        Ok(_) => Ok(()),
        Err(e) => bail!("Invalid language code '{}': {}", code, e),
    }
}
