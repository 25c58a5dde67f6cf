//! All supported localization file formats for locport.
//!
//! Each submodule exposes a `Format` type implementing [`crate::traits::Parser`],
//! convertible into [`crate::types::Decoded`] and buildable from a
//! [`crate::types::LocalizationTable`].

pub mod android_strings;
pub mod portal;
pub mod strings;

// Reexporting the formats for easier access
pub use android_strings::Format as AndroidStringsFormat;
pub use portal::Format as PortalFormat;
pub use strings::Format as StringsFormat;
