//! Unprefixed error aggregate.

use std::error::Error as StdError;
use std::fmt;

use crate::format::list_format;
use crate::{BoxError, Entry, Structured};

/// An ordered list of errors without a prefix.
///
/// When appended into a [`Prefixed`](crate::Prefixed), its entries are
/// spliced in with no label added; a `Prefixed` among them is flattened
/// there like any other appended list. Pushing a `MultiError` into another
/// flattens it right away, while a pushed `Prefixed` stays one entry until
/// then.
///
/// ```
/// use cloud_multierror::{MultiError, Prefixed};
///
/// let mut multi = MultiError::new();
/// multi.push("name is required").push("size must be positive");
///
/// let mut merr = Prefixed::new("invalid params");
/// merr.append(multi);
/// assert_eq!(
///     merr.to_string(),
///     "invalid params: 2 errors occurred:\n\t* name is required\n\t* size must be positive\n\n",
/// );
/// ```
#[derive(Debug, Default)]
pub struct MultiError {
    errors: Vec<Entry>,
}

impl MultiError {
    /// Create an empty aggregate.
    #[must_use]
    pub const fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Push one error; a nested `MultiError` is flattened.
    pub fn push(&mut self, err: impl Into<BoxError>) -> &mut Self {
        let err: BoxError = err.into();
        match err.downcast::<Self>() {
            Ok(nested) => self.errors.extend(nested.errors),
            Err(err) => self.errors.push(Entry::new(err)),
        }
        self
    }

    /// Push an error together with its structured fields.
    pub fn push_structured<E: Structured>(&mut self, err: E) -> &mut Self {
        self.errors.push(Entry::structured(err));
        self
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Whether no error has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// The entries, in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.errors
    }

    /// Consumes the aggregate and returns its entries.
    #[must_use]
    pub fn into_entries(self) -> Vec<Entry> {
        self.errors
    }

    /// `None` when empty, otherwise the aggregate itself.
    #[must_use]
    pub fn error_or_none(self) -> Option<Self> {
        if self.errors.is_empty() {
            None
        } else {
            Some(self)
        }
    }

    /// `Ok(())` when empty, otherwise `Err` with the aggregate itself.
    ///
    /// # Errors
    ///
    /// Returns the aggregate when at least one error was pushed.
    pub fn into_result(self) -> Result<(), Self> {
        match self.error_or_none() {
            None => Ok(()),
            Some(multi) => Err(multi),
        }
    }
}

impl<E: Into<BoxError>> Extend<E> for MultiError {
    fn extend<I: IntoIterator<Item = E>>(&mut self, iter: I) {
        for err in iter {
            self.push(err);
        }
    }
}

impl<E: Into<BoxError>> FromIterator<E> for MultiError {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        let mut multi = Self::new();
        multi.extend(iter);
        multi
    }
}

impl fmt::Display for MultiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&list_format(&self.errors))
    }
}

impl StdError for MultiError {}
