//! Error list entries and the structured-error capability.

use std::error::Error as StdError;
use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

/// Boxed error carried by every list in this crate.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Structured JSON payload of an error (`{"code": ..., "message": ...}`).
pub type Fields = Map<String, Value>;

/// An error that can decompose itself into machine-readable key/value fields.
///
/// Errors appended with [`Prefixed::append_structured`](crate::Prefixed::append_structured),
/// [`Prefixed::check_structured`](crate::Prefixed::check_structured), or wrapped
/// in a [`StructuredError`] before a plain append keep these fields, and [`json_format`](crate::json_format) renders them
/// instead of the `{"message": ...}` fallback.
///
/// Most implementations derive [`Serialize`] and delegate to [`fields_of`]:
///
/// ```
/// use cloud_multierror::{fields_of, Fields, Structured};
///
/// #[derive(Debug, serde::Serialize)]
/// struct MissingField {
///     field: &'static str,
/// }
///
/// impl std::fmt::Display for MissingField {
///     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
///         write!(f, "{} is not specified and is required", self.field)
///     }
/// }
///
/// impl std::error::Error for MissingField {}
///
/// impl Structured for MissingField {
///     fn fields(&self) -> Option<Fields> {
///         fields_of(self)
///     }
/// }
///
/// let fields = MissingField { field: "region" }.fields().unwrap();
/// assert_eq!(fields["field"], "region");
/// ```
pub trait Structured: StdError + Send + Sync + 'static {
    /// Returns the error's fields, or `None` when it has no structured form.
    fn fields(&self) -> Option<Fields>;
}

/// Serialize `value` and return its fields when it is a non-empty JSON object.
///
/// Values that serialize to `{}`, to a non-object, or that fail to serialize
/// are not decomposable and yield `None`.
#[must_use]
pub fn fields_of<T: Serialize + ?Sized>(value: &T) -> Option<Fields> {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) if !map.is_empty() => Some(map),
        Ok(other) => {
            tracing::debug!(kind = json_kind(&other), "error is not decomposable into fields");
            None
        }
        Err(err) => {
            tracing::debug!(%err, "failed to serialize error fields");
            None
        }
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "empty object",
    }
}

/// One error of a [`Prefixed`](crate::Prefixed) or [`MultiError`](crate::MultiError) list.
#[derive(Debug)]
pub struct Entry {
    error: BoxError,
    fields: Option<Fields>,
}

impl Entry {
    /// Wrap a boxed error.
    ///
    /// A boxed [`StructuredError`] is unwrapped and keeps its fields; any
    /// other error has none.
    #[must_use]
    pub fn new(error: BoxError) -> Self {
        match error.downcast::<StructuredError>() {
            Ok(structured) => Self {
                error: structured.error,
                fields: structured.fields,
            },
            Err(error) => Self {
                error,
                fields: None,
            },
        }
    }

    /// Wrap a [`Structured`] error, capturing its fields.
    #[must_use]
    pub fn structured<E: Structured>(error: E) -> Self {
        let StructuredError { error, fields } = StructuredError::new(error);
        Self { error, fields }
    }

    pub(crate) fn into_parts(self) -> (BoxError, Option<Fields>) {
        (self.error, self.fields)
    }

    pub(crate) const fn from_parts(error: BoxError, fields: Option<Fields>) -> Self {
        Self { error, fields }
    }

    /// The underlying error.
    #[must_use]
    pub fn error(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self.error.as_ref()
    }

    /// Structured fields captured when the entry was appended, if any.
    #[must_use]
    pub const fn fields(&self) -> Option<&Fields> {
        self.fields.as_ref()
    }

    /// The rendered error message.
    #[must_use]
    pub fn message(&self) -> String {
        self.error.to_string()
    }

    /// Consumes the entry and returns the underlying error.
    #[must_use]
    pub fn into_error(self) -> BoxError {
        self.error
    }

    /// Re-label this entry as `"<label>: <error>"`, keeping its fields.
    pub(crate) fn labeled(self, label: &str) -> Self {
        Self {
            error: Box::new(PrefixedError {
                prefix: label.to_owned(),
                inner: self.error,
            }),
            fields: self.fields,
        }
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.error, f)
    }
}

/// A [`Structured`] error carried as a plain boxed error.
///
/// Once boxed, an error no longer tells whether it implements
/// [`Structured`]. Wrapping it first captures its fields, and every append
/// path of [`Prefixed`](crate::Prefixed) and [`MultiError`](crate::MultiError)
/// unwraps the carrier again:
///
/// ```
/// use cloud_multierror::{fields_of, Fields, Prefixed, Structured, StructuredError};
///
/// #[derive(Debug, serde::Serialize)]
/// struct Quota {
///     limit: u32,
/// }
///
/// impl std::fmt::Display for Quota {
///     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
///         write!(f, "quota of {} exceeded", self.limit)
///     }
/// }
///
/// impl std::error::Error for Quota {}
///
/// impl Structured for Quota {
///     fn fields(&self) -> Option<Fields> {
///         fields_of(self)
///     }
/// }
///
/// let mut merr = Prefixed::new("scale");
/// merr.append(StructuredError::new(Quota { limit: 8 }));
/// assert_eq!(merr.entries()[0].fields().unwrap()["limit"], 8);
/// assert_eq!(merr.entries()[0].message(), "quota of 8 exceeded");
/// ```
#[derive(Debug)]
pub struct StructuredError {
    error: BoxError,
    fields: Option<Fields>,
}

impl StructuredError {
    /// Capture the fields of `error` and box it.
    #[must_use]
    pub fn new<E: Structured>(error: E) -> Self {
        let fields = error.fields();
        Self {
            error: Box::new(error),
            fields,
        }
    }

    /// The captured fields.
    #[must_use]
    pub const fn fields(&self) -> Option<&Fields> {
        self.fields.as_ref()
    }

    /// The wrapped error.
    #[must_use]
    pub fn inner(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self.error.as_ref()
    }
}

impl<E: Structured> From<E> for StructuredError {
    fn from(error: E) -> Self {
        Self::new(error)
    }
}

impl fmt::Display for StructuredError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.error, f)
    }
}

impl StdError for StructuredError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.error.source()
    }
}

/// A leaf error lifted out of a nested list, labeled with that list's prefix.
///
/// Renders as `"<prefix>: <inner>"` and reports the inner error as its source.
#[derive(Debug)]
pub struct PrefixedError {
    prefix: String,
    inner: BoxError,
}

impl PrefixedError {
    /// The label of the list this error was lifted out of.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The original, unlabeled error.
    #[must_use]
    pub fn inner(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self.inner.as_ref()
    }
}

impl fmt::Display for PrefixedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.prefix, self.inner)
    }
}

impl StdError for PrefixedError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(self.inner.as_ref())
    }
}
