//! Unified error types for chatmin.
//!
//! This module provides a single [`ChatminError`] enum that covers every
//! failure the library can report. Failures only happen at the edges:
//! loading an export, reading a config file, parsing date bounds, and
//! writing the transcript. The compaction core itself is infallible.
//!
//! # Error Handling Philosophy
//!
//! - **Library users** get typed errors they can match on
//! - **Application users** get clear, actionable error messages
//! - **Developers** get source error chains for debugging

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for chatmin operations.
///
/// # Example
///
/// ```rust
/// use chatmin::error::Result;
/// use chatmin::ChatExport;
///
/// fn my_function() -> Result<ChatExport> {
///     // ... operations that may fail
///     Ok(ChatExport::new("Chat", vec![]))
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatminError>;

/// The error type for all chatmin operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatminError {
    /// An I/O error occurred.
    ///
    /// This typically happens when:
    /// - The input file doesn't exist
    /// - Permission denied
    /// - Disk is full (when writing the transcript)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The input is not syntactically valid JSON.
    #[error("Failed to parse {format} export{}: {source}", path.as_ref().map(|p| format!(" (file: {})", p.display())).unwrap_or_default())]
    Parse {
        /// The format being parsed (e.g., "Telegram JSON")
        format: &'static str,
        /// The underlying JSON error
        #[source]
        source: serde_json::Error,
        /// The file path, if available
        path: Option<PathBuf>,
    },

    /// The input parsed, but doesn't have the expected structure.
    ///
    /// This occurs when:
    /// - The top level is not an object
    /// - The `messages` field is missing or not an array
    /// - A message record is malformed and invalid records are not skipped
    #[error("Invalid {format} format: {message}")]
    InvalidFormat {
        /// The format that was expected
        format: &'static str,
        /// Description of what's wrong
        message: String,
    },

    /// Invalid date bound in the configuration.
    #[error("Invalid date '{input}'. Expected format: {expected}")]
    InvalidDate {
        /// The invalid date string that was provided
        input: String,
        /// Expected format description
        expected: &'static str,
    },

    /// The configuration is inconsistent or cannot be used.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what's wrong
        message: String,
    },

    /// JSON (de)serialization error outside of export parsing.
    ///
    /// Raised when reading or writing a configuration file.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatminError {
    /// Creates a parse error for the Telegram export format.
    pub fn telegram_parse(source: serde_json::Error, path: Option<PathBuf>) -> Self {
        ChatminError::Parse {
            format: "Telegram JSON",
            source,
            path,
        }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(format: &'static str, message: impl Into<String>) -> Self {
        ChatminError::InvalidFormat {
            format,
            message: message.into(),
        }
    }

    /// Creates an invalid date error.
    pub fn invalid_date(input: impl Into<String>) -> Self {
        ChatminError::InvalidDate {
            input: input.into(),
            expected: "unix seconds, YYYY-MM-DD or YYYY-MM-DDTHH:MM[:SS]",
        }
    }

    /// Creates an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        ChatminError::InvalidConfig {
            message: message.into(),
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatminError::Io(_))
    }

    /// Returns `true` if this is a parse error.
    pub fn is_parse(&self) -> bool {
        matches!(self, ChatminError::Parse { .. })
    }

    /// Returns `true` if this is an invalid format error.
    pub fn is_invalid_format(&self) -> bool {
        matches!(self, ChatminError::InvalidFormat { .. })
    }

    /// Returns `true` if this is a date-related error.
    pub fn is_invalid_date(&self) -> bool {
        matches!(self, ChatminError::InvalidDate { .. })
    }

    /// Returns `true` if this is a configuration error.
    pub fn is_invalid_config(&self) -> bool {
        matches!(self, ChatminError::InvalidConfig { .. })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err = ChatminError::from(io_err);
        let display = err.to_string();
        assert!(display.contains("IO error"));
        assert!(display.contains("file not found"));
    }

    #[test]
    fn test_parse_error_with_path() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid").unwrap_err();
        let err = ChatminError::telegram_parse(json_err, Some(PathBuf::from("/path/to/file.json")));
        let display = err.to_string();
        assert!(display.contains("Telegram JSON"));
        assert!(display.contains("/path/to/file.json"));
    }

    #[test]
    fn test_parse_error_without_path() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ChatminError::telegram_parse(json_err, None);
        let display = err.to_string();
        assert!(display.contains("Telegram JSON"));
        assert!(!display.contains("file:"));
    }

    #[test]
    fn test_invalid_format_display() {
        let err = ChatminError::invalid_format("Telegram JSON", "missing \"messages\" array");
        let display = err.to_string();
        assert!(display.contains("Telegram JSON"));
        assert!(display.contains("messages"));
    }

    #[test]
    fn test_invalid_date_display() {
        let err = ChatminError::invalid_date("not-a-date");
        let display = err.to_string();
        assert!(display.contains("not-a-date"));
        assert!(display.contains("YYYY-MM-DD"));
    }

    #[test]
    fn test_invalid_config_display() {
        let err = ChatminError::invalid_config("no participants selected");
        assert!(err.to_string().contains("no participants selected"));
    }

    #[test]
    fn test_error_source_chain() {
        use std::error::Error;
        let json_err = serde_json::from_str::<serde_json::Value>("[1,").unwrap_err();
        let err = ChatminError::telegram_parse(json_err, None);
        assert!(err.source().is_some());
    }

    #[test]
    fn test_is_methods() {
        let io_err = ChatminError::Io(io::Error::new(io::ErrorKind::NotFound, ""));
        assert!(io_err.is_io());
        assert!(!io_err.is_parse());
        assert!(!io_err.is_invalid_format());
        assert!(!io_err.is_invalid_date());

        let date_err = ChatminError::invalid_date("bad");
        assert!(date_err.is_invalid_date());
        assert!(!date_err.is_io());

        let config_err = ChatminError::invalid_config("bad");
        assert!(config_err.is_invalid_config());
        assert!(!config_err.is_invalid_format());
    }
}
