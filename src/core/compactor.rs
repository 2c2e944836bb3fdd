//! Transcript compaction.
//!
//! The [`Compactor`] walks filtered messages in chronological order and turns
//! them into transcript [`Line`]s. Consecutive messages with equal
//! [`Signature`]s collapse into one line with a repeat count; author and
//! forward labels are only printed when they change; headers separate days
//! (or minutes, in proximity mode).
//!
//! Each call to [`Compactor::step`] returns the lines emitted by that message,
//! so the suppression rules can be tested one transition at a time.
//!
//! # Example
//!
//! ```
//! use chatmin::Message;
//! use chatmin::config::CompactConfig;
//! use chatmin::core::anonymize::Pseudonyms;
//! use chatmin::core::compactor::render;
//!
//! let messages = vec![
//!     Message::new("Alice", "hi").with_timestamp(1705314600),
//!     Message::new("Alice", "hi").with_timestamp(1705314660),
//!     Message::new("Alice", "hi").with_timestamp(1705314720),
//!     Message::new("Bob", "yo").with_timestamp(1705314780),
//! ];
//! let refs: Vec<&Message> = messages.iter().collect();
//!
//! let text = render(&refs, &CompactConfig::new(), &Pseudonyms::default());
//! assert_eq!(text, "[15.01.24]\nAlice:hi (x3)\nBob:yo");
//! ```

use std::fmt;

use chrono::NaiveDateTime;

use crate::Message;
use crate::config::{CompactConfig, Mode};
use crate::core::anonymize::Pseudonyms;
use crate::core::classify::{ContentDescriptor, classify, display_text};
use crate::message::present;

/// Label used for messages without an author.
pub const SYSTEM_AUTHOR: &str = "SYS";

/// Equality key deciding whether consecutive messages merge.
///
/// Built from the current options: the forward source only counts when
/// forwards are shown, the reply flag only when reply markers are shown,
/// and link hiding changes the display text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature {
    /// Raw author name, or [`SYSTEM_AUTHOR`].
    pub author: String,
    /// Forward source, empty when absent or hidden.
    pub forward_source: String,
    pub content: ContentDescriptor,
    pub display_text: String,
    pub reply: bool,
}

impl Signature {
    pub fn of(message: &Message, config: &CompactConfig) -> Self {
        let forward_source = if config.show_forwards {
            present(message.forwarded_from.as_ref()).unwrap_or_default()
        } else {
            ""
        };

        Self {
            author: message.author().unwrap_or(SYSTEM_AUTHOR).to_string(),
            forward_source: forward_source.to_string(),
            content: classify(message, config.hide_links),
            display_text: display_text(message, config.hide_links),
            reply: config.show_reply && message.is_reply(),
        }
    }
}

/// One line of transcript output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// Empty separator before a header.
    Blank,
    /// Section header, already bracketed.
    Header(String),
    /// A rendered run of messages.
    Entry(String),
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Line::Blank => Ok(()),
            Line::Header(text) | Line::Entry(text) => f.write_str(text),
        }
    }
}

/// Formats the section header for a message date.
///
/// Day mode yields `dd.mm.yy`, proximity mode `dd.mm.yy HH:MM`. Dates that
/// don't parse fall back to the raw string (its day part in day mode).
pub fn format_header(date: &str, mode: Mode) -> String {
    let parsed = NaiveDateTime::parse_from_str(date, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(date, "%Y-%m-%dT%H:%M"));

    match (parsed, mode) {
        (Ok(dt), Mode::All) => dt.format("%d.%m.%y").to_string(),
        (Ok(dt), Mode::Proximity) => dt.format("%d.%m.%y %H:%M").to_string(),
        (Err(_), Mode::All) => date.split('T').next().unwrap_or_default().to_string(),
        (Err(_), Mode::Proximity) => date.to_string(),
    }
}

/// Pending run of same-signature messages.
#[derive(Debug)]
struct Run<'a> {
    first: &'a Message,
    signature: Signature,
    count: usize,
}

/// Presentation state machine for one transcript.
#[derive(Debug)]
pub struct Compactor<'a> {
    config: &'a CompactConfig,
    pseudonyms: &'a Pseudonyms,
    run: Option<Run<'a>>,
    last_header: Option<String>,
    last_day: Option<String>,
    last_author: Option<String>,
    last_forward_source: Option<String>,
    has_output: bool,
}

impl<'a> Compactor<'a> {
    pub fn new(config: &'a CompactConfig, pseudonyms: &'a Pseudonyms) -> Self {
        Self {
            config,
            pseudonyms,
            run: None,
            last_header: None,
            last_day: None,
            last_author: None,
            last_forward_source: None,
            has_output: false,
        }
    }

    /// Advances the state machine by one message.
    ///
    /// Returns the lines that became final: the flushed previous run and,
    /// when the header changes, the separator and the new header. The
    /// message itself stays pending until its run ends.
    pub fn step(&mut self, message: &'a Message) -> Vec<Line> {
        let mut lines = Vec::new();
        let header = format_header(&message.date, self.config.mode);
        let day = message.day();

        if self.last_header.as_deref() != Some(header.as_str()) {
            lines.extend(self.flush());
            if self.has_output {
                lines.push(Line::Blank);
            }
            lines.push(Line::Header(format!("[{header}]")));
            self.has_output = true;
            self.last_header = Some(header);
            self.reset_labels();
        } else if self.last_day.as_deref() != Some(day) {
            lines.extend(self.flush());
            self.reset_labels();
        }

        let signature = Signature::of(message, self.config);
        if let Some(run) = self.run.as_mut().filter(|run| run.signature == signature) {
            run.count += 1;
        } else {
            lines.extend(self.flush());
            self.run = Some(Run {
                first: message,
                signature,
                count: 1,
            });
        }

        self.last_day = Some(day.to_string());
        lines
    }

    /// Flushes the pending run, if any.
    pub fn finish(&mut self) -> Vec<Line> {
        self.flush().into_iter().collect()
    }

    /// Author label printed most recently in the current section.
    pub fn last_author(&self) -> Option<&str> {
        self.last_author.as_deref()
    }

    /// Forward source printed most recently in the current section.
    pub fn last_forward_source(&self) -> Option<&str> {
        self.last_forward_source.as_deref()
    }

    /// Number of messages in the pending run.
    pub fn pending(&self) -> usize {
        self.run.as_ref().map_or(0, |run| run.count)
    }

    fn reset_labels(&mut self) {
        self.last_author = None;
        self.last_forward_source = None;
    }

    fn flush(&mut self) -> Option<Line> {
        let Run { first, count, .. } = self.run.take()?;
        let anonymize = self.config.anonymize_names;
        let pseudonyms = self.pseudonyms;

        let author = match first.author() {
            Some(name) if anonymize => pseudonyms.resolve(name),
            Some(name) => name,
            None => SYSTEM_AUTHOR,
        }
        .to_string();

        let descriptor = classify(first, self.config.hide_links);
        let caption = display_text(first, self.config.hide_links);
        let rendered = descriptor.render();

        let mut body = if rendered.media_bearing {
            format!("{} {}", rendered.tag, caption).trim().to_string()
        } else {
            rendered.tag
        };

        let show_author = self.last_author.as_deref() != Some(author.as_str());
        let prefix = if show_author {
            format!("{author}:")
        } else {
            String::new()
        };
        self.last_author = Some(author);

        let forward = present(first.forwarded_from.as_ref()).filter(|_| self.config.show_forwards);
        if let Some(source) = forward {
            let source = if anonymize {
                pseudonyms.resolve(source)
            } else {
                source
            };
            if show_author || self.last_forward_source.as_deref() != Some(source) {
                body = format!("[FWD from {source}] {body}");
            }
            self.last_forward_source = Some(source.to_string());
        } else {
            self.last_forward_source = None;
        }

        if self.config.show_reply && first.is_reply() {
            body = format!("> {body}");
        }

        if count > 1 {
            let bare_media = rendered.media_bearing && caption.trim().is_empty();
            if bare_media || descriptor.is_emoji_sticker() {
                body = format!("[{} x{count}]", body.trim().replace(['[', ']'], ""));
            } else {
                body.push_str(&format!(" (x{count})"));
            }
        }

        if body.trim().is_empty() {
            return None;
        }

        Some(Line::Entry(format!("{prefix}{}", body.trim())))
    }
}

/// Renders filtered messages into a transcript.
///
/// Lines are joined with newlines and the result is trimmed.
pub fn render(messages: &[&Message], config: &CompactConfig, pseudonyms: &Pseudonyms) -> String {
    let mut compactor = Compactor::new(config, pseudonyms);
    let mut lines = Vec::new();
    for &message in messages {
        lines.extend(compactor.step(message));
    }
    lines.extend(compactor.finish());

    let mut output = String::new();
    let mut entries = 0usize;
    for line in lines {
        if matches!(line, Line::Entry(_)) {
            entries += 1;
        }
        output.push_str(&line.to_string());
        output.push('\n');
    }

    tracing::debug!(messages = messages.len(), entries, "rendered transcript");

    output.trim().to_string()
}
