#![forbid(unsafe_code)]
//! Round-trip conversion of localization files.
//!
//! Decodes iOS `.strings`, Android `strings.xml` and portal JSON files into one
//! ordered [`LocalizationTable`], and encodes tables back into each format
//! under a language-specific destination path.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use locport::{ConversionJob, Direction, Routed, route};
//!
//! let job = ConversionJob::for_path("App/en.lproj/Localizable.strings", "fr")?;
//! if let Routed::Extracted(decoded) = route(&job, Direction::Forward)? {
//!     // ... translate decoded.table ...
//!     route(&job, Direction::Reverse(&decoded.table))?;
//! }
//! # Ok::<(), locport::Error>(())
//! ```
//!
//! # Supported Formats
//!
//! - **iOS `.strings`**: string tables, with block and line comments
//! - **Android `strings.xml`**: `<string>` resources
//! - **Portal JSON**: a flat object of key to text

pub mod codec;
pub mod error;
pub mod formats;
pub mod paths;
pub mod router;
pub mod traits;
pub mod types;

// Re-export most used types for easy consumption
pub use crate::{
    codec::{convert, decode, encode},
    error::Error,
    paths::resolve_destination,
    router::{ConversionJob, Direction, Routed, route},
    types::{Decoded, Diagnostic, LocalizationTable, Platform},
};
