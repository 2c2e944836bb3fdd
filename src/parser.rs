//! Telegram export loader.
//!
//! This module turns a Telegram Desktop JSON export into a [`ChatExport`]:
//! the top-level shape is validated, records without a timestamp are
//! dropped, and the remaining messages are sorted by time.
//!
//! # Example
//!
//! ```rust
//! use chatmin::parser::TelegramParser;
//!
//! let json = r#"{
//!   "name": "Test Chat",
//!   "messages": [
//!     {"id": 2, "type": "message", "date": "2024-01-15T10:31:00", "date_unixtime": "1705314660", "from": "Bob", "text": "Hi!"},
//!     {"id": 1, "type": "message", "date": "2024-01-15T10:30:00", "date_unixtime": "1705314600", "from": "Alice", "text": "Hello!"},
//!     {"id": 3, "type": "message", "from": "Carol", "text": "no timestamp"}
//!   ]
//! }"#;
//!
//! let export = TelegramParser::new().parse_str(json)?;
//! assert_eq!(export.title, "Test Chat");
//! assert_eq!(export.messages.len(), 2);
//! assert_eq!(export.messages[0].id, 1);
//! # Ok::<(), chatmin::ChatminError>(())
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::config::LoaderConfig;
use crate::error::{ChatminError, Result};
use crate::message::ChatExport;
use crate::parsing::telegram::{TelegramRawMessage, parse_telegram_message};

const FORMAT: &str = "Telegram JSON";

/// Title used when the export has no `name`.
pub const DEFAULT_TITLE: &str = "Chat";

/// Loader for Telegram JSON exports.
#[derive(Debug, Clone, Default)]
pub struct TelegramParser {
    config: LoaderConfig,
}

impl TelegramParser {
    /// Creates a loader with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a loader with custom configuration.
    pub fn with_config(config: LoaderConfig) -> Self {
        Self { config }
    }

    /// Returns the loader configuration.
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Reads and parses an export file.
    pub fn parse(&self, path: &Path) -> Result<ChatExport> {
        let content = fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), bytes = content.len(), "read export file");
        self.parse_value(parse_json(&content, Some(path))?)
    }

    /// Parses an export from an in-memory string.
    pub fn parse_str(&self, content: &str) -> Result<ChatExport> {
        self.parse_value(parse_json(content, None)?)
    }

    fn parse_value(&self, root: Value) -> Result<ChatExport> {
        let Value::Object(mut root) = root else {
            return Err(ChatminError::invalid_format(
                FORMAT,
                "expected a JSON object at the top level",
            ));
        };

        let title = root
            .get("name")
            .and_then(Value::as_str)
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_TITLE)
            .to_string();

        let Some(Value::Array(records)) = root.remove("messages") else {
            return Err(ChatminError::invalid_format(
                FORMAT,
                "missing \"messages\" array",
            ));
        };

        let total = records.len();
        let mut skipped = 0usize;
        let mut untimed = 0usize;
        let mut messages = Vec::with_capacity(total);

        for (index, record) in records.into_iter().enumerate() {
            let raw = match TelegramRawMessage::deserialize(record) {
                Ok(raw) => raw,
                Err(e) if self.config.skip_invalid => {
                    tracing::warn!(index, error = %e, "skipping malformed message record");
                    skipped += 1;
                    continue;
                }
                Err(e) => {
                    return Err(ChatminError::invalid_format(
                        FORMAT,
                        format!("message #{index}: {e}"),
                    ));
                }
            };

            match parse_telegram_message(raw) {
                Some(msg) => messages.push(msg),
                None => untimed += 1,
            }
        }

        // Stable: messages sharing a timestamp keep their file order.
        messages.sort_by_key(|msg| msg.epoch_seconds);

        tracing::info!(
            title = %title,
            total,
            kept = messages.len(),
            skipped,
            untimed,
            "loaded export"
        );

        Ok(ChatExport::new(title, messages))
    }
}

/// Loads an export file with the default loader configuration.
pub fn load_export(path: impl AsRef<Path>) -> Result<ChatExport> {
    TelegramParser::new().parse(path.as_ref())
}

fn parse_json(content: &str, path: Option<&Path>) -> Result<Value> {
    serde_json::from_str(content)
        .map_err(|e| ChatminError::telegram_parse(e, path.map(Path::to_path_buf)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_json_is_parse_error() {
        let err = TelegramParser::new().parse_str("{not json").unwrap_err();
        assert!(err.is_parse());
    }

    #[test]
    fn test_non_object_is_format_error() {
        let err = TelegramParser::new().parse_str("[1, 2, 3]").unwrap_err();
        assert!(err.is_invalid_format());
    }

    #[test]
    fn test_missing_messages_is_format_error() {
        let err = TelegramParser::new()
            .parse_str(r#"{"name": "Chat"}"#)
            .unwrap_err();
        assert!(err.is_invalid_format());

        let err = TelegramParser::new()
            .parse_str(r#"{"name": "Chat", "messages": {}}"#)
            .unwrap_err();
        assert!(err.is_invalid_format());
    }

    #[test]
    fn test_default_title() {
        let export = TelegramParser::new()
            .parse_str(r#"{"messages": []}"#)
            .unwrap();
        assert_eq!(export.title, DEFAULT_TITLE);
        assert!(export.is_empty());
    }

    #[test]
    fn test_sorted_and_stable() {
        let json = r#"{"messages": [
            {"id": 3, "type": "message", "date_unixtime": "20", "from": "C", "text": "c"},
            {"id": 1, "type": "message", "date_unixtime": "10", "from": "A", "text": "a"},
            {"id": 2, "type": "message", "date_unixtime": "10", "from": "B", "text": "b"}
        ]}"#;
        let export = TelegramParser::new().parse_str(json).unwrap();
        let ids: Vec<i64> = export.messages.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_malformed_record_skipped_by_default() {
        let json = r#"{"messages": [
            "garbage",
            {"id": 1, "type": "message", "date_unixtime": "10", "from": "A", "text": "a"}
        ]}"#;
        let export = TelegramParser::new().parse_str(json).unwrap();
        assert_eq!(export.len(), 1);
    }

    #[test]
    fn test_malformed_record_fails_when_strict() {
        let json = r#"{"messages": [
            "garbage",
            {"id": 1, "type": "message", "date_unixtime": "10", "from": "A", "text": "a"}
        ]}"#;
        let parser = TelegramParser::with_config(LoaderConfig::new().with_skip_invalid(false));
        let err = parser.parse_str(json).unwrap_err();
        assert!(err.is_invalid_format());
        assert!(err.to_string().contains("message #0"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_export("/definitely/not/here.json").unwrap_err();
        assert!(err.is_io());
    }
}
