//! Error handling for javadoc-links
//!
//! This module provides the error types and user-friendly error reporting for the
//! link generator. The error system follows two principles:
//! 1. **Strongly-typed errors** for the failures callers need to match on
//! 2. **User-friendly messages** with actionable suggestions for CLI users
//!
//! # Architecture
//!
//! - [`LinksError`] - Enumerated error types for all failure cases
//! - [`ErrorContext`] - Wrapper that adds details and a suggestion for display
//!
//! Library code mostly returns [`anyhow::Result`] with file context attached;
//! the variants below are raised where a caller (or the CLI) needs to tell
//! failures apart, most importantly [`LinksError::AvailabilityCheckFailed`].
//!
//! Use [`user_friendly_error`] to turn any error into an [`ErrorContext`].
//!
//! # Examples
//!
//! ```rust,no_run
//! use javadoc_links::core::{LinksError, ErrorContext, user_friendly_error};
//!
//! let error = LinksError::ConfigError {
//!     message: "unknown filter kind".to_string(),
//! };
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display();
//! ```

use crate::probe::ProbeReport;
use colored::Colorize;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// The main error type for link generation
///
/// # Error Categories
///
/// ## Documentation hosts
/// - [`AvailabilityCheckFailed`] - A resolved link does not serve javadoc content
/// - [`NetworkError`] - The HTTP client could not be constructed or used
///
/// ## Inputs
/// - [`ResolutionParseError`] - A resolution file is not valid TOML or misses fields
/// - [`ConfigError`] - Configuration values are invalid
/// - [`InvalidCoordinate`] - A `group:module:version` string is malformed
///
/// ## File System
/// - [`ArchiveExtraction`] - A javadoc archive could not be unpacked
/// - [`FileSystemError`] - A file system operation failed on a known path
/// - [`IoError`] - Standard I/O errors from [`std::io::Error`]
/// - [`TomlError`] - TOML parsing errors from [`toml::de::Error`]
///
/// [`AvailabilityCheckFailed`]: LinksError::AvailabilityCheckFailed
/// [`NetworkError`]: LinksError::NetworkError
/// [`ResolutionParseError`]: LinksError::ResolutionParseError
/// [`ConfigError`]: LinksError::ConfigError
/// [`InvalidCoordinate`]: LinksError::InvalidCoordinate
/// [`ArchiveExtraction`]: LinksError::ArchiveExtraction
/// [`FileSystemError`]: LinksError::FileSystemError
/// [`IoError`]: LinksError::IoError
/// [`TomlError`]: LinksError::TomlError
#[derive(Error, Debug)]
pub enum LinksError {
    /// Javadoc host is offline or does not serve an index for the resolved link
    ///
    /// Raised by the link set builder when availability checking is enabled and
    /// the prober could not confirm the link. The report lists every probed URL
    /// together with its status code or transport error.
    #[error("Javadoc host is offline or invalid: '{link}' (required by {coordinates})")]
    AvailabilityCheckFailed {
        /// The resolved documentation link
        link: String,
        /// Coordinates of the dependency that produced the link
        coordinates: String,
        /// Diagnostics collected while probing
        report: Arc<ProbeReport>,
    },

    /// Javadoc archive extraction failed
    #[error("Failed to unpack javadoc archive {}: {reason}", archive.display())]
    ArchiveExtraction {
        /// Path of the archive that could not be unpacked
        archive: PathBuf,
        /// Underlying failure
        reason: String,
    },

    /// Resolution file parsing error
    #[error("Invalid resolution file {file}: {reason}")]
    ResolutionParseError {
        /// Path to the resolution file
        file: String,
        /// Specific reason for the parsing failure
        reason: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration error
        message: String,
    },

    /// Malformed dependency coordinate
    #[error("Invalid coordinate '{coordinate}': expected group:module:version")]
    InvalidCoordinate {
        /// The coordinate string as given
        coordinate: String,
    },

    /// Network error
    #[error("Network error: {operation}")]
    NetworkError {
        /// The network operation that failed
        operation: String,
        /// Reason for the network failure
        reason: String,
    },

    /// File system error
    #[error("File system error: {operation}")]
    FileSystemError {
        /// The file system operation that failed
        operation: String,
        /// Path where the file system error occurred
        path: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// Other error
    #[error("{message}")]
    Other {
        /// Generic error message
        message: String,
    },
}

/// Error context wrapper that provides user-friendly error information
///
/// When displayed, errors show:
/// 1. **Error**: The main error message in red
/// 2. **Details**: Additional context in yellow (optional)
/// 3. **Suggestion**: Actionable steps in green (optional)
///
/// # Examples
///
/// ```rust,no_run
/// use javadoc_links::core::{LinksError, ErrorContext};
///
/// let context = ErrorContext::new(LinksError::Other { message: "boom".into() })
///     .with_suggestion("Run again with --verbose")
///     .with_details("Something unexpected happened");
///
/// println!("{}", context);
/// ```
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: LinksError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: LinksError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error to stderr with terminal colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            for line in details.lines() {
                eprintln!("  {}", line.yellow());
            }
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "hint".green().bold(), suggestion.green());
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\n{details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nhint: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into a user-friendly format with contextual suggestions
///
/// The error chain is walked so that a [`LinksError`] wrapped in `anyhow`
/// context is still recognized. Errors that carry no typed information fall
/// back to [`LinksError::Other`] with the full chain as details.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    for cause in error.chain() {
        if let Some(links_error) = cause.downcast_ref::<LinksError>() {
            return create_error_context(links_error, &error);
        }
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>()
        && io_error.kind() == std::io::ErrorKind::PermissionDenied
    {
        return ErrorContext::new(LinksError::FileSystemError {
            operation: "file access".to_string(),
            path: "file path not specified in error context".to_string(),
        })
        .with_suggestion("Check file permissions and try running with appropriate privileges");
    }

    let details = chain_details(&error);
    let context = ErrorContext::new(LinksError::Other {
        message: error.to_string(),
    });
    if details.is_empty() {
        context
    } else {
        context.with_details(details)
    }
}

fn create_error_context(links_error: &LinksError, whole: &anyhow::Error) -> ErrorContext {
    match links_error {
        LinksError::AvailabilityCheckFailed {
            link,
            coordinates,
            report,
        } => ErrorContext::new(LinksError::AvailabilityCheckFailed {
            link: link.clone(),
            coordinates: coordinates.clone(),
            report: Arc::clone(report),
        })
        .with_details(report.to_string())
        .with_suggestion(format!(
            "Add an override for {coordinates} pointing at a working javadoc site, or disable the check with --no-check or {}=false",
            crate::constants::CHECK_AVAILABILITY_ENV
        )),
        LinksError::ArchiveExtraction {
            archive,
            reason,
        } => ErrorContext::new(LinksError::ArchiveExtraction {
            archive: archive.clone(),
            reason: reason.clone(),
        })
        .with_suggestion("Check that the javadoc artifact is a valid zip/jar archive and re-resolve dependencies"),
        LinksError::ResolutionParseError {
            file,
            reason,
        } => ErrorContext::new(LinksError::ResolutionParseError {
            file: file.clone(),
            reason: reason.clone(),
        })
        .with_suggestion("Regenerate the resolution file from the build, or fix the listed entry"),
        LinksError::ConfigError {
            message,
        } => ErrorContext::new(LinksError::ConfigError {
            message: message.clone(),
        })
        .with_suggestion(format!(
            "Check {} and the global configuration for typos",
            crate::constants::PROJECT_CONFIG_FILE
        )),
        LinksError::InvalidCoordinate {
            coordinate,
        } => ErrorContext::new(LinksError::InvalidCoordinate {
            coordinate: coordinate.clone(),
        })
        .with_suggestion("Use the form group:module:version, e.g. com.google.guava:guava:33.0.0-jre"),
        LinksError::NetworkError {
            operation,
            reason,
        } => ErrorContext::new(LinksError::NetworkError {
            operation: operation.clone(),
            reason: reason.clone(),
        })
        .with_details(reason.clone())
        .with_suggestion("Check your network connection and proxy settings"),
        LinksError::FileSystemError {
            operation,
            path,
        } => ErrorContext::new(LinksError::FileSystemError {
            operation: operation.clone(),
            path: path.clone(),
        })
        .with_details(format!("Path: {path}"))
        .with_suggestion("Check that the path exists and you have the necessary permissions"),
        LinksError::IoError(_) | LinksError::TomlError(_) | LinksError::Other { .. } => {
            let details = chain_details(whole);
            let context = ErrorContext::new(LinksError::Other {
                message: whole.to_string(),
            });
            if details.is_empty() {
                context
            } else {
                context.with_details(details)
            }
        }
    }
}

/// Render the causes below the top-level message, one per line.
fn chain_details(error: &anyhow::Error) -> String {
    error.chain().skip(1).map(|cause| format!("caused by: {cause}")).collect::<Vec<_>>().join("\n")
}
