#![doc = include_str!("../README.md")]
//!
//! ---
//!
//! ## API Reference
//!
//! - [`ApiError`] — Failed API call, classified by body shape
//! - [`BasicFailedReply`] / [`ReplyElement`] — The `{"errors": [...]}` payload
//! - [`unwrap_error`] — Swap an [`ApiError`] for its unpacked error list

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod error;
mod reply;

pub use error::{unwrap_error, ApiError, API_ERROR_PREFIX};
pub use reply::{BasicFailedReply, ReplyElement};
