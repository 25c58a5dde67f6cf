//! Command line front end for locport: discovery, translation runs and
//! localization tree maintenance.

pub mod config;
pub mod convert;
pub mod discovery;
pub mod languages;
pub mod layout;
pub mod pipeline;
pub mod report;
pub mod translate;
pub mod translator;

pub use config::{FileConfig, Settings};
pub use languages::Language;
pub use pipeline::Pipeline;
pub use report::{JobOutcome, RunReport};
pub use translator::{HttpTranslator, Translator};
