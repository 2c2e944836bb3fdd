//! Core processing logic for chatmin.
//!
//! This module contains:
//! - [`classify`] - Content classification and media tags
//! - [`filter`] - Service, date-range and participant-proximity filtering
//! - [`anonymize`] - Deterministic author pseudonyms
//! - [`compactor`] - The transcript state machine
//! - [`stats`] - Character and token statistics
//! - [`pipeline`] - All of the above in one call
//! - [`output`] - File naming and writing
//!
//! # Quick Start
//!
//! ```rust
//! use chatmin::core::{Transcript, process};
//! use chatmin::config::CompactConfig;
//! use chatmin::ChatExport;
//!
//! let export = ChatExport::new("Empty", Vec::new());
//! let Transcript { text, stats } = process(&export, &CompactConfig::new());
//! assert!(text.is_empty());
//! assert_eq!(stats.approx_tokens, 0);
//! ```

pub mod anonymize;
pub mod classify;
pub mod compactor;
pub mod filter;
pub mod output;
pub mod pipeline;
pub mod stats;

// Re-export main types for convenience
pub use anonymize::Pseudonyms;
pub use classify::{ContentDescriptor, classify};
pub use compactor::{Compactor, Line, Signature, render};
pub use filter::apply_filters;
pub use output::{output_file_name, sanitize_title, write_transcript};
pub use pipeline::{Transcript, process};
pub use stats::TranscriptStats;
