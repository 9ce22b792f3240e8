//! Format strategies that turn an error list into display text.
//!
//! - [`list_format`]: the default `N errors occurred:` bullet list
//! - [`json_format`]: a `{"errors": [...]}` JSON document
//! - [`Format`]: selects one of the two by name, e.g. from a config file
//! - [`set_format`]: switches a boxed [`Prefixed`] to JSON in place

mod json;
mod list;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use json::json_format;
pub use list::list_format;

use crate::{BoxError, Entry, Prefixed};

/// Renders an ordered list of entries into a single string.
pub type FormatFn = fn(&[Entry]) -> String;

/// Name of the JSON output format.
pub const JSON_FORMAT: &str = "json";

/// Named output format for error lists.
///
/// Deserializes from (and parses as) `"text"` or `"json"`, so consumers can
/// carry it in their own configuration:
///
/// ```
/// use cloud_multierror::Format;
///
/// #[derive(serde::Deserialize)]
/// struct Output {
///     format: Format,
/// }
///
/// let output: Output = serde_json::from_str(r#"{ "format": "json" }"#).unwrap();
/// assert_eq!(output.format, Format::Json);
/// assert_eq!("TEXT".parse::<Format>().unwrap(), Format::Text);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum Format {
    /// Bullet list rendered by [`list_format`].
    #[default]
    Text,
    /// JSON document rendered by [`json_format`].
    Json,
}

impl Format {
    /// The strategy function for this format.
    #[must_use]
    pub fn format_fn(self) -> FormatFn {
        match self {
            Self::Text => list_format,
            Self::Json => json_format,
        }
    }

    /// The lowercase name of this format.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => JSON_FORMAT,
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A format name that is neither `"text"` nor `"json"`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown error format '{0}'; expected \"text\" or \"json\"")]
pub struct UnknownFormat(pub String);

impl FromStr for Format {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("text") {
            Ok(Self::Text)
        } else if s.eq_ignore_ascii_case(JSON_FORMAT) {
            Ok(Self::Json)
        } else {
            Err(UnknownFormat(s.to_owned()))
        }
    }
}

/// Switch a boxed [`Prefixed`] to JSON rendering when `format == "json"`.
///
/// Any other format name, or an error that is not a [`Prefixed`], leaves the
/// error untouched.
///
/// ```
/// use cloud_multierror::{set_format, BoxError, Prefixed};
///
/// let mut err: BoxError = Box::new(Prefixed::with_errors("cfg", ["a"]));
/// set_format(&mut err, "json");
/// assert!(err.to_string().starts_with("cfg: {"));
/// ```
pub fn set_format(err: &mut BoxError, format: &str) {
    if let Some(prefixed) = err.downcast_mut::<Prefixed>() {
        apply(prefixed, format);
    }
}

/// [`set_format`] for errors carried as [`anyhow::Error`].
#[cfg(feature = "anyhow")]
pub fn set_format_anyhow(err: &mut anyhow::Error, format: &str) {
    if let Some(prefixed) = err.downcast_mut::<Prefixed>() {
        apply(prefixed, format);
    }
}

fn apply(prefixed: &mut Prefixed, format: &str) {
    if format == JSON_FORMAT {
        prefixed.set_format(Format::Json);
    } else {
        tracing::trace!(format, "format left unchanged");
    }
}
