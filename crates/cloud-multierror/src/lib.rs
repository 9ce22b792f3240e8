#![doc = include_str!("../README.md")]
//!
//! ---
//!
//! ## API Reference
//!
//! # Types
//!
//! - [`Prefixed`] — Labeled, flattening error list returned by validation
//! - [`MultiError`] — Unprefixed error list, spliced as-is into a [`Prefixed`]
//! - [`Entry`] — One error of a list, with optional structured fields
//! - [`Structured`] — Capability of an error to decompose into JSON fields
//! - [`StructuredError`] — Carries a [`Structured`] error's fields through a plain append
//! - [`Format`] — Named output format (`text` or `json`)
//!
//! # Format strategies
//!
//! - [`list_format`] — `N errors occurred:` bullet list (default)
//! - [`json_format`] — `{"errors": [...]}` document
//! - [`set_format`] — Switch a boxed [`Prefixed`] to JSON by name

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod entry;
mod format;
mod multi;
mod prefixed;

pub use entry::{
    fields_of, BoxError, Entry, Fields, PrefixedError, Structured, StructuredError,
};
#[cfg(feature = "anyhow")]
pub use format::set_format_anyhow;
pub use format::{
    json_format, list_format, set_format, Format, FormatFn, UnknownFormat, JSON_FORMAT,
};
pub use multi::MultiError;
pub use prefixed::Prefixed;
