//! Transcript file naming and writing.
//!
//! ```
//! use chatmin::core::output::output_file_name;
//!
//! assert_eq!(output_file_name("Team Chat: 2024!"), "processed_Team_Chat_2024_minified.txt");
//! ```

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::Result;

/// Used when nothing of the title survives sanitization.
pub const FALLBACK_NAME: &str = "chat";

static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{L}\p{N}\s-]").expect("static pattern"));
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("static pattern"));

/// Makes a chat title safe for use in a file name.
///
/// Characters other than letters, digits, whitespace and `-` are removed,
/// the result is trimmed, and whitespace runs become `_`.
pub fn sanitize_title(title: &str) -> String {
    let kept = DISALLOWED.replace_all(title, "");
    WHITESPACE.replace_all(kept.trim(), "_").into_owned()
}

/// Returns `processed_<sanitized title>_minified.txt`.
pub fn output_file_name(title: &str) -> String {
    let sanitized = sanitize_title(title);
    let name = if sanitized.is_empty() {
        FALLBACK_NAME
    } else {
        sanitized.as_str()
    };
    format!("processed_{name}_minified.txt")
}

/// Writes the transcript as UTF-8.
pub fn write_transcript(text: &str, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, text)?;
    tracing::debug!(path = %path.display(), bytes = text.len(), "wrote transcript");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_keeps_letters_digits_hyphen() {
        assert_eq!(sanitize_title("Dev-Team 42"), "Dev-Team_42");
        assert_eq!(sanitize_title("  Семья ❤️ чат  "), "Семья_чат");
        assert_eq!(sanitize_title("a\t\tb\nc"), "a_b_c");
    }

    #[test]
    fn test_sanitize_drops_path_separators() {
        assert_eq!(sanitize_title("../etc/passwd"), "etcpasswd");
    }

    #[test]
    fn test_file_name_fallback() {
        assert_eq!(output_file_name("🔥🔥"), "processed_chat_minified.txt");
        assert_eq!(output_file_name("Chat"), "processed_Chat_minified.txt");
    }

    #[test]
    fn test_write_transcript() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        write_transcript("Alice:hi", &path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "Alice:hi");
    }

    #[test]
    fn test_write_into_missing_dir_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = write_transcript("x", dir.path().join("nope/out.txt")).unwrap_err();
        assert!(err.is_io());
    }
}
