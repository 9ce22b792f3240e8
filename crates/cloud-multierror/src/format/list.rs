//! Default bullet-list rendering.

use crate::Entry;

/// Render entries as a bullet list, one line per error.
///
/// ```text
/// 2 errors occurred:
/// \t* first
/// \t* second
///
/// ```
///
/// A single entry reads `1 error occurred:` and an empty list renders as an
/// empty string.
///
/// # Examples
///
/// ```
/// use cloud_multierror::{list_format, Prefixed};
///
/// let errors = Prefixed::with_errors("cfg", ["a", "b"]);
/// assert_eq!(list_format(errors.entries()), "2 errors occurred:\n\t* a\n\t* b\n\n");
/// ```
#[must_use]
pub fn list_format(entries: &[Entry]) -> String {
    match entries {
        [] => String::new(),
        [only] => format!("1 error occurred:\n\t* {only}\n\n"),
        _ => {
            let bullets: String = entries.iter().map(|entry| format!("\t* {entry}\n")).collect();
            format!("{} errors occurred:\n{bullets}\n", entries.len())
        }
    }
}
