//! One-call processing: filter, anonymize, compact, measure.
//!
//! # Example
//!
//! ```
//! use chatmin::{ChatExport, Message};
//! use chatmin::config::CompactConfig;
//! use chatmin::core::pipeline::process;
//!
//! let export = ChatExport::new(
//!     "Demo",
//!     vec![
//!         Message::new("Alice", "hi").with_timestamp(0),
//!         Message::new("Alice", "hi").with_timestamp(10),
//!     ],
//! );
//!
//! let transcript = process(&export, &CompactConfig::new());
//! assert!(transcript.text.ends_with("Alice:hi (x2)"));
//! assert_eq!(transcript.stats.original_count, 2);
//! ```

use crate::config::CompactConfig;
use crate::core::anonymize::Pseudonyms;
use crate::core::compactor::render;
use crate::core::filter::apply_filters;
use crate::core::stats::TranscriptStats;
use crate::message::ChatExport;

/// A rendered transcript with its statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct Transcript {
    pub text: String,
    pub stats: TranscriptStats,
}

/// Runs the whole pipeline over an export.
///
/// The pseudonym table is built from every author in the export, not only
/// from the filtered messages, so names stay stable across date ranges.
pub fn process(export: &ChatExport, config: &CompactConfig) -> Transcript {
    let filtered = apply_filters(&export.messages, config);

    let pseudonyms = if config.anonymize_names {
        Pseudonyms::build(export.authors())
    } else {
        Pseudonyms::default()
    };

    let text = render(&filtered, config, &pseudonyms);
    let stats = TranscriptStats::measure(&text, export.len(), filtered.len());

    tracing::info!(
        title = %export.title,
        mode = %config.mode,
        original = stats.original_count,
        filtered = stats.filtered_count,
        chars = stats.char_count,
        tokens = stats.approx_tokens,
        "compacted transcript"
    );

    Transcript { text, stats }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Message;
    use crate::config::Mode;

    fn export() -> ChatExport {
        ChatExport::new(
            "Test",
            vec![
                Message::new("Zed", "early").with_timestamp(0),
                Message::new("Amy", "late").with_timestamp(100_000),
            ],
        )
    }

    #[test]
    fn test_pseudonyms_cover_filtered_out_authors() {
        // Amy is User 1 even though only Zed's message survives.
        let config = CompactConfig::new()
            .with_date_to(10)
            .with_anonymize_names(true);
        let transcript = process(&export(), &config);
        assert!(transcript.text.ends_with("User 2:early"));
        assert_eq!(transcript.stats.filtered_count, 1);
    }

    #[test]
    fn test_empty_result() {
        let config = CompactConfig::new()
            .with_mode(Mode::Proximity)
            .with_participant("Nobody");
        let transcript = process(&export(), &config);
        assert!(transcript.text.is_empty());
        assert_eq!(transcript.stats.char_count, 0);
        assert_eq!(transcript.stats.approx_tokens, 0);
    }
}
