//! Prefixed error list, the aggregate returned by parameter validation.

use std::error::Error as StdError;
use std::fmt;
use std::panic::Location;

use crate::format::{list_format, Format, FormatFn};
use crate::{BoxError, Entry, MultiError, Structured};

/// An ordered list of errors rendered as one error under a descriptive prefix.
///
/// Built fresh for every validation attempt: errors are appended while
/// checking a compound input, then the list is handed back with
/// [`error_or_none`](Prefixed::error_or_none) or
/// [`into_result`](Prefixed::into_result).
///
/// Nested lists are flattened when appended. Every entry of an appended
/// `Prefixed` is relabeled `"<child prefix>: <entry>"`; the members of an
/// appended [`MultiError`] are unpacked one by one with the same rules. No
/// nested list survives inside an entry.
///
/// A boxed error cannot reveal whether it is [`Structured`]. Use
/// [`append_structured`](Prefixed::append_structured),
/// [`check_structured`](Prefixed::check_structured), or wrap it in a
/// [`StructuredError`](crate::StructuredError) to keep its JSON fields.
///
/// # Rendering
///
/// An empty list renders as `""`. Otherwise the output is
/// `"<prefix>: "` followed by the format strategy's output, by default
/// [`list_format`]:
///
/// ```
/// use cloud_multierror::Prefixed;
///
/// let err = Prefixed::with_errors("cfg", ["a", "b"]);
/// assert_eq!(err.to_string(), "cfg: 2 errors occurred:\n\t* a\n\t* b\n\n");
/// ```
///
/// # Examples
///
/// A typical validation routine:
///
/// ```
/// use cloud_multierror::Prefixed;
///
/// fn validate(id: &str, region: &str) -> Result<(), Prefixed> {
///     let mut merr = Prefixed::new("invalid deployment template create params");
///     if id.len() != 32 {
///         merr.append("id must consist of 32 characters");
///     }
///     if region.is_empty() {
///         merr.append("region not specified and is required for this operation");
///     }
///     merr.into_result()
/// }
///
/// assert!(validate("0123456789abcdef0123456789abcdef", "us-east-1").is_ok());
/// assert_eq!(validate("short", "").unwrap_err().len(), 2);
/// ```
pub struct Prefixed {
    prefix: String,
    errors: Vec<Entry>,
    format: FormatFn,
    skip_prefixing: bool,
}

impl Prefixed {
    /// Create an empty list with the given prefix.
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            errors: Vec::new(),
            format: list_format,
            skip_prefixing: false,
        }
    }

    /// Create a list with the given prefix and initial errors.
    ///
    /// The initial errors are unpacked exactly as [`append`](Prefixed::append)
    /// would unpack them.
    #[must_use]
    #[track_caller]
    pub fn with_errors<I, E>(prefix: impl Into<String>, errs: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<BoxError>,
    {
        let origin = Location::caller();
        let mut merr = Self::new(prefix);
        for err in errs {
            merr.push_boxed(err.into(), origin);
        }
        merr
    }

    /// Do not label entries of nested lists with the nested list's prefix.
    ///
    /// Useful when this list's prefix is generic and the nested messages are
    /// already self-explanatory.
    #[must_use]
    pub const fn skip_prefixing(mut self, skip: bool) -> Self {
        self.skip_prefixing = skip;
        self
    }

    /// Render with a custom format strategy.
    #[must_use]
    pub fn with_format(mut self, format: FormatFn) -> Self {
        self.format = format;
        self
    }

    /// Switch to one of the named format strategies in place.
    pub fn set_format(&mut self, format: Format) {
        self.format = format.format_fn();
    }

    /// Switch to a custom format strategy in place.
    pub fn set_format_fn(&mut self, format: FormatFn) {
        self.format = format;
    }

    /// Append one error, flattening it if it is itself an error list.
    ///
    /// When a nested `Prefixed` has an empty prefix, its entries are labeled
    /// with the source location of this call instead.
    #[track_caller]
    pub fn append(&mut self, err: impl Into<BoxError>) -> &mut Self {
        self.push_boxed(err.into(), Location::caller());
        self
    }

    /// Append every error yielded by `errs`, in order.
    ///
    /// An `Option` is an iterator of zero or one items, so `None` appends
    /// nothing:
    ///
    /// ```
    /// use cloud_multierror::Prefixed;
    ///
    /// let missing: Option<&str> = None;
    /// let mut merr = Prefixed::new("params");
    /// merr.append_all(missing).append_all(Some("region is required"));
    /// assert_eq!(merr.len(), 1);
    /// ```
    #[track_caller]
    pub fn append_all<I, E>(&mut self, errs: I) -> &mut Self
    where
        I: IntoIterator<Item = E>,
        E: Into<BoxError>,
    {
        let origin = Location::caller();
        for err in errs {
            self.push_boxed(err.into(), origin);
        }
        self
    }

    /// Append an error together with its structured fields.
    ///
    /// The fields are what [`json_format`](crate::json_format) renders for
    /// this entry.
    pub fn append_structured<E: Structured>(&mut self, err: E) -> &mut Self {
        self.errors.push(Entry::structured(err));
        self
    }

    /// [`check`](Prefixed::check) for results whose error is [`Structured`].
    ///
    /// The error keeps its fields for [`json_format`](crate::json_format).
    pub fn check_structured<T, E: Structured>(&mut self, result: Result<T, E>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.append_structured(err);
                None
            }
        }
    }

    /// Append the error of `result`, if any, and return its success value.
    ///
    /// ```
    /// use cloud_multierror::Prefixed;
    ///
    /// let mut merr = Prefixed::new("invalid size");
    /// let size = merr.check("8g".parse::<u32>());
    /// assert_eq!(size, None);
    /// assert_eq!(merr.len(), 1);
    /// ```
    #[track_caller]
    pub fn check<T, E: Into<BoxError>>(&mut self, result: Result<T, E>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.push_boxed(err.into(), Location::caller());
                None
            }
        }
    }

    /// The label describing what was being validated.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Number of flattened entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Whether no error has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// The flattened entries, in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.errors
    }

    /// Iterate over the flattened errors, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &(dyn StdError + Send + Sync + 'static)> {
        self.errors.iter().map(Entry::error)
    }

    /// Consumes the list and returns its entries.
    #[must_use]
    pub fn into_entries(self) -> Vec<Entry> {
        self.errors
    }

    /// `None` when the list is empty, otherwise the list itself.
    #[must_use]
    pub fn error_or_none(self) -> Option<Self> {
        if self.errors.is_empty() {
            None
        } else {
            Some(self)
        }
    }

    /// `Ok(())` when the list is empty, otherwise `Err` with the list itself.
    ///
    /// # Errors
    ///
    /// Returns the list when at least one error was appended.
    pub fn into_result(self) -> Result<(), Self> {
        match self.error_or_none() {
            None => Ok(()),
            Some(merr) => Err(merr),
        }
    }

    fn push_boxed(&mut self, err: BoxError, origin: &'static Location<'static>) {
        self.push_entry(Entry::new(err), origin);
    }

    fn push_entry(&mut self, entry: Entry, origin: &'static Location<'static>) {
        let (err, fields) = entry.into_parts();
        let err = match err.downcast::<Self>() {
            Ok(child) => return self.absorb(*child, origin),
            Err(err) => err,
        };
        match err.downcast::<MultiError>() {
            Ok(multi) => {
                for member in multi.into_entries() {
                    self.push_entry(member, origin);
                }
            }
            Err(err) => self.errors.push(Entry::from_parts(err, fields)),
        }
    }

    fn absorb(&mut self, child: Self, origin: &'static Location<'static>) {
        if self.skip_prefixing {
            self.errors.extend(child.errors);
            return;
        }

        let label = if child.prefix.is_empty() {
            origin.to_string()
        } else {
            child.prefix
        };
        tracing::trace!(%label, count = child.errors.len(), "flattening nested error list");

        self.errors
            .extend(child.errors.into_iter().map(|entry| entry.labeled(&label)));
    }
}

impl<E: Into<BoxError>> Extend<E> for Prefixed {
    #[track_caller]
    fn extend<I: IntoIterator<Item = E>>(&mut self, iter: I) {
        let origin = Location::caller();
        for err in iter {
            self.push_boxed(err.into(), origin);
        }
    }
}

impl<'a> IntoIterator for &'a Prefixed {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl fmt::Display for Prefixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.errors.is_empty() {
            return Ok(());
        }
        write!(f, "{}: {}", self.prefix, (self.format)(&self.errors))
    }
}

impl fmt::Debug for Prefixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Prefixed")
            .field("prefix", &self.prefix)
            .field("errors", &self.errors)
            .field("skip_prefixing", &self.skip_prefixing)
            .finish_non_exhaustive()
    }
}

impl StdError for Prefixed {}
