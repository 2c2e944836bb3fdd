//! Size statistics for a rendered transcript.
//!
//! ```
//! use chatmin::core::stats::TranscriptStats;
//!
//! let stats = TranscriptStats::measure("Alice:hi (x3)", 3, 3);
//! assert_eq!(stats.char_count, 13);
//! assert_eq!(stats.approx_tokens, 3);
//! ```

use serde::Serialize;

/// Average characters per token used for the estimate.
pub const CHARS_PER_TOKEN: f64 = 4.5;

/// Statistics about a compaction run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TranscriptStats {
    /// Messages in the loaded export.
    pub original_count: usize,
    /// Messages left after filtering.
    pub filtered_count: usize,
    /// Non-blank transcript lines (headers and entries).
    pub line_count: usize,
    /// Unicode scalar values in the transcript.
    ///
    /// Characters outside the Basic Multilingual Plane (most emoji) count
    /// once here, where a UTF-16 length would count them twice, so
    /// emoji-heavy chats get a lower estimate than UTF-16 based tools report.
    pub char_count: usize,
    /// `round(char_count / 4.5)`.
    pub approx_tokens: usize,
}

impl TranscriptStats {
    /// Measures `text` and records the message counts around it.
    pub fn measure(text: &str, original_count: usize, filtered_count: usize) -> Self {
        let char_count = text.chars().count();
        Self {
            original_count,
            filtered_count,
            line_count: text.lines().filter(|line| !line.is_empty()).count(),
            char_count,
            approx_tokens: approx_tokens(char_count),
        }
    }

    /// Percentage of messages removed by filtering and merging, measured
    /// against the transcript's line count.
    pub fn compression_ratio(&self) -> f64 {
        if self.original_count == 0 {
            return 0.0;
        }
        (1.0 - (self.line_count as f64 / self.original_count as f64)) * 100.0
    }
}

/// Estimates the token count of a text of `char_count` characters.
pub fn approx_tokens(char_count: usize) -> usize {
    (char_count as f64 / CHARS_PER_TOKEN).round() as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_estimate_rounds() {
        assert_eq!(approx_tokens(0), 0);
        assert_eq!(approx_tokens(2), 0);
        assert_eq!(approx_tokens(3), 1);
        assert_eq!(approx_tokens(9), 2);
        assert_eq!(approx_tokens(45), 10);
        assert_eq!(approx_tokens(47), 10);
    }

    #[test]
    fn test_counts_scalar_values_not_bytes() {
        let stats = TranscriptStats::measure("Привет 😀", 1, 1);
        assert_eq!(stats.char_count, 8);
    }

    #[test]
    fn test_line_count_skips_blank_lines() {
        let stats = TranscriptStats::measure("01.01.24\nA:x\n\n02.01.24\nB:y", 4, 4);
        assert_eq!(stats.line_count, 4);
    }

    #[test]
    fn test_compression_ratio() {
        let stats = TranscriptStats {
            original_count: 10,
            line_count: 2,
            ..Default::default()
        };
        assert!((stats.compression_ratio() - 80.0).abs() < f64::EPSILON);
        assert_eq!(TranscriptStats::default().compression_ratio(), 0.0);
    }
}
