//! Core error types and user-facing error reporting.
//!
//! - [`LinksError`] enumerates the failures callers can match on
//! - [`ErrorContext`] adds details and suggestions for terminal display
//! - [`user_friendly_error`] converts any [`anyhow::Error`] into an [`ErrorContext`]

pub mod error;

pub use error::{ErrorContext, LinksError, user_friendly_error};
