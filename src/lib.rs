//! # Chatmin
//!
//! A Rust library for turning Telegram chat exports into compact plain-text
//! transcripts that fit into an LLM context window.
//!
//! ## Overview
//!
//! Chatmin loads a Telegram Desktop JSON export, filters it (service events,
//! date range, activity near chosen participants), and renders a transcript
//! in which runs of identical consecutive messages collapse into one line,
//! author and forward labels are only printed when they change, and media
//! become short tags such as `[photo]`. The result comes with a character
//! count and an approximate token count.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chatmin::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let export = load_export("result.json")?;
//!
//!     let config = CompactConfig::new().with_hide_links(true);
//!     let transcript = process(&export, &config);
//!
//!     write_transcript(&transcript.text, output_file_name(&export.title))?;
//!     println!("~{} tokens", transcript.stats.approx_tokens);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Output Format
//!
//! ```text
//! [15.01.24]
//! Alice:hi (x3)
//! Bob:[photo] look
//! [FWD from News] [link]
//! Carol:> agreed
//!
//! [16.01.24]
//! Alice:[😀 x5]
//! ```
//!
//! ## Module Structure
//!
//! - [`parser`] - [`TelegramParser`](parser::TelegramParser) and [`load_export`](parser::load_export)
//! - [`parsing`] - Raw Telegram record types and conversion
//! - [`config`] - [`CompactConfig`](config::CompactConfig), [`LoaderConfig`](config::LoaderConfig), date and window parsing
//! - [`message`] - [`Message`] and [`ChatExport`]
//! - [`core`] - Classification, filtering, anonymization, compaction, stats, output
//! - [`cli`] - CLI arguments (feature `cli`)
//! - [`error`] - Unified error types ([`ChatminError`], [`Result`])
//! - [`prelude`] - Convenient re-exports

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod message;
pub mod parser;
pub mod parsing;

// Re-export the main types at the crate root for convenience
pub use error::{ChatminError, Result};
pub use message::{ChatExport, Message};

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatmin::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{ChatExport, Message};

    pub use crate::error::{ChatminError, Result};

    pub use crate::config::{CompactConfig, LoaderConfig, Mode};

    pub use crate::parser::{TelegramParser, load_export};

    pub use crate::core::{
        Pseudonyms, Transcript, TranscriptStats, apply_filters, output_file_name, process,
        render, write_transcript,
    };
}
