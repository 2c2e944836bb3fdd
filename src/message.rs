//! Chat message model.
//!
//! This module provides [`Message`], the normalized representation of a single
//! chat event, and [`ChatExport`], the loaded export that owns them. Both are
//! read-only snapshots for the duration of a processing run: every pipeline
//! stage borrows them and none mutates them.
//!
//! # Overview
//!
//! A message consists of:
//! - **Identity and time**: `id`, `date` (local wall-clock string), `epoch_seconds`
//! - **Authorship**: `from` (absent for service events), `forwarded_from`
//! - **Content**: `text` (plain or rich runs) and [`MediaInfo`] descriptors
//! - **Threading**: `reply_to`
//!
//! # Examples
//!
//! ```
//! use chatmin::message::{Message, MessageText, TextRun};
//!
//! let msg = Message::new("Alice", "Hello, world!")
//!     .with_id(42)
//!     .with_timestamp(1705314600)
//!     .with_reply_to(41);
//!
//! assert_eq!(msg.author(), Some("Alice"));
//! assert_eq!(msg.date, "2024-01-15T10:30:00");
//! assert!(msg.is_reply());
//!
//! let rich = MessageText::Runs(vec![
//!     TextRun::raw("see "),
//!     TextRun::entity("url", "http://x"),
//! ]);
//! assert_eq!(rich.flatten(false), "see http://x");
//! ```

use std::collections::BTreeSet;

use chrono::DateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Placeholder inserted in place of link-like text runs when links are hidden.
pub const LINK_PLACEHOLDER: &str = "[link]";

/// Kind of a chat event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    /// A regular message written by a participant.
    #[default]
    Message,
    /// A system event (joins, pins, calls, title changes...).
    Service,
}

impl MessageKind {
    /// Maps the Telegram `type` field. Only the exact string `message` is a
    /// regular message.
    pub fn from_telegram(value: &str) -> Self {
        if value == "message" {
            MessageKind::Message
        } else {
            MessageKind::Service
        }
    }
}

/// The `text` field of a message.
///
/// Telegram stores either a plain string or a flat array mixing raw strings
/// with formatted entities such as `{"type": "url", "text": "https://..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageText {
    /// A plain string.
    Plain(String),
    /// An ordered sequence of text runs.
    Runs(Vec<TextRun>),
    /// Anything else; contributes no text.
    Other(Value),
}

impl Default for MessageText {
    fn default() -> Self {
        MessageText::Plain(String::new())
    }
}

impl MessageText {
    /// Flattens the text into a single display string.
    ///
    /// Runs are concatenated in order without separators. When `hide_links`
    /// is set, link and mention entities contribute [`LINK_PLACEHOLDER`]
    /// instead of their text.
    pub fn flatten(&self, hide_links: bool) -> String {
        match self {
            MessageText::Plain(s) => s.clone(),
            MessageText::Runs(runs) => runs.iter().map(|run| run.display(hide_links)).collect(),
            MessageText::Other(_) => String::new(),
        }
    }
}

impl From<&str> for MessageText {
    fn from(s: &str) -> Self {
        MessageText::Plain(s.to_string())
    }
}

impl From<String> for MessageText {
    fn from(s: String) -> Self {
        MessageText::Plain(s)
    }
}

impl From<Vec<TextRun>> for MessageText {
    fn from(runs: Vec<TextRun>) -> Self {
        MessageText::Runs(runs)
    }
}

/// One element of a rich text array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextRun {
    /// A raw string fragment.
    Raw(String),
    /// A formatted fragment (`bold`, `url`, `mention`, ...).
    Entity(TextEntity),
    /// Unrecognized element; contributes no text.
    Other(Value),
}

impl TextRun {
    /// Creates a raw string run.
    pub fn raw(text: impl Into<String>) -> Self {
        TextRun::Raw(text.into())
    }

    /// Creates a formatted run of the given entity type.
    pub fn entity(kind: impl Into<String>, text: impl Into<String>) -> Self {
        TextRun::Entity(TextEntity {
            kind: kind.into(),
            text: text.into(),
        })
    }

    fn display(&self, hide_links: bool) -> &str {
        match self {
            TextRun::Raw(s) => s,
            TextRun::Entity(entity) if hide_links && entity.is_link() => LINK_PLACEHOLDER,
            TextRun::Entity(entity) => &entity.text,
            TextRun::Other(_) => "",
        }
    }
}

/// A formatted text fragment inside a rich text array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextEntity {
    /// Entity type as exported (`plain`, `bold`, `text_link`, `url`, ...).
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Literal text of the fragment.
    #[serde(default)]
    pub text: String,
}

impl TextEntity {
    /// Returns `true` for hyperlinks and mentions.
    pub fn is_link(&self) -> bool {
        matches!(self.kind.as_str(), "text_link" | "url" | "mention")
    }
}

/// Media descriptors attached to a message.
///
/// Several fields may be set at once; the classifier decides which one wins.
/// A field counts as present only when it holds a non-empty string.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MediaInfo {
    /// `voice_message`, `video_message`, `animation`, `sticker`, ...
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    /// Photo path (or an "omitted" marker).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    /// Video file path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_file: Option<String>,
    /// Audio file path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_file: Option<String>,
    /// MIME type of the attached file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    /// Original name of the attached file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    /// Emoji associated with a sticker.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sticker_emoji: Option<String>,
}

impl MediaInfo {
    /// Returns `true` if `media_type` equals the given value.
    pub fn is_media_type(&self, value: &str) -> bool {
        self.media_type.as_deref() == Some(value)
    }
}

/// Returns the field's value when it is present and non-empty.
pub(crate) fn present(field: Option<&String>) -> Option<&str> {
    field.map(String::as_str).filter(|s| !s.is_empty())
}

/// Formats epoch seconds as a `YYYY-MM-DDTHH:MM:SS` string in UTC.
pub(crate) fn utc_date_string(epoch_seconds: i64) -> String {
    DateTime::from_timestamp(epoch_seconds, 0)
        .map(|dt| dt.format("%Y-%m-%dT%H:%M:%S").to_string())
        .unwrap_or_default()
}

/// A single event from a chat export.
///
/// # Construction
///
/// ```
/// use chatmin::Message;
///
/// let photo = Message::new("Bob", "look")
///     .with_timestamp(1705314600)
///     .with_photo();
/// assert!(photo.media.photo.is_some());
///
/// let service = Message::service("Alice pinned a message");
/// assert!(service.is_service());
/// assert!(service.author().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Message {
    /// Identifier, unique within the export.
    pub id: i64,

    /// Author display name; `None` for system events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,

    /// Local wall-clock timestamp, `YYYY-MM-DDTHH:MM:SS`.
    pub date: String,

    /// Seconds since the Unix epoch.
    pub epoch_seconds: i64,

    /// Regular message or service event.
    #[serde(default)]
    pub kind: MessageKind,

    /// Text content.
    #[serde(default)]
    pub text: MessageText,

    /// Media descriptors.
    #[serde(default)]
    pub media: MediaInfo,

    /// Original author when the message was forwarded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forwarded_from: Option<String>,

    /// Id of the message this one replies to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<i64>,
}

impl Message {
    /// Creates a regular message from `from` with the given text.
    ///
    /// Id, date and epoch are zeroed; use the builder methods to set them.
    pub fn new(from: impl Into<String>, text: impl Into<MessageText>) -> Self {
        Self {
            from: Some(from.into()),
            text: text.into(),
            ..Self::default()
        }
    }

    /// Creates a service event without an author.
    pub fn service(text: impl Into<MessageText>) -> Self {
        Self {
            kind: MessageKind::Service,
            text: text.into(),
            ..Self::default()
        }
    }

    // =========================================================================
    // Builder methods
    // =========================================================================

    #[must_use]
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }

    /// Sets both the wall-clock date string and the epoch seconds.
    #[must_use]
    pub fn with_date(mut self, date: impl Into<String>, epoch_seconds: i64) -> Self {
        self.date = date.into();
        self.epoch_seconds = epoch_seconds;
        self
    }

    /// Sets the epoch seconds and derives the date string from them in UTC.
    #[must_use]
    pub fn with_timestamp(mut self, epoch_seconds: i64) -> Self {
        self.epoch_seconds = epoch_seconds;
        self.date = utc_date_string(epoch_seconds);
        self
    }

    #[must_use]
    pub fn with_kind(mut self, kind: MessageKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn with_forwarded_from(mut self, source: impl Into<String>) -> Self {
        self.forwarded_from = Some(source.into());
        self
    }

    #[must_use]
    pub fn with_reply_to(mut self, reply_id: i64) -> Self {
        self.reply_to = Some(reply_id);
        self
    }

    #[must_use]
    pub fn with_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media.media_type = Some(media_type.into());
        self
    }

    #[must_use]
    pub fn with_photo(mut self) -> Self {
        self.media.photo = Some("photos/photo.jpg".to_string());
        self
    }

    #[must_use]
    pub fn with_video_file(mut self) -> Self {
        self.media.video_file = Some("video_files/video.mp4".to_string());
        self
    }

    #[must_use]
    pub fn with_audio_file(mut self, file_name: Option<&str>) -> Self {
        self.media.audio_file = Some("files/audio".to_string());
        self.media.file_name = file_name.map(ToString::to_string);
        self
    }

    #[must_use]
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.media.mime_type = Some(mime_type.into());
        self
    }

    #[must_use]
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.media.file_name = Some(file_name.into());
        self
    }

    /// Marks the message as a sticker, with or without an emoji.
    #[must_use]
    pub fn with_sticker(mut self, emoji: Option<&str>) -> Self {
        self.media.media_type = Some("sticker".to_string());
        self.media.sticker_emoji = emoji.map(ToString::to_string);
        self
    }

    // =========================================================================
    // Accessor methods
    // =========================================================================

    /// Returns the author name, if any.
    pub fn author(&self) -> Option<&str> {
        self.from.as_deref()
    }

    /// Returns `true` for service events.
    pub fn is_service(&self) -> bool {
        self.kind == MessageKind::Service
    }

    /// Returns `true` if this message replies to another one.
    pub fn is_reply(&self) -> bool {
        self.reply_to.is_some()
    }

    /// Returns the calendar-day part of the date string (before `T`).
    pub fn day(&self) -> &str {
        self.date.split('T').next().unwrap_or_default()
    }
}

/// A loaded chat export.
///
/// Messages are sorted ascending by [`Message::epoch_seconds`] by the loader.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChatExport {
    /// Chat title (the export's `name`).
    pub title: String,
    /// Messages in chronological order.
    pub messages: Vec<Message>,
}

impl ChatExport {
    pub fn new(title: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            title: title.into(),
            messages,
        }
    }

    /// Returns every distinct author name in the export, sorted.
    ///
    /// This is the full known participant set, independent of any filtering.
    pub fn authors(&self) -> BTreeSet<&str> {
        self.messages.iter().filter_map(Message::author).collect()
    }

    /// Returns the epoch seconds of the first and last message.
    pub fn time_range(&self) -> Option<(i64, i64)> {
        let first = self.messages.first()?;
        let last = self.messages.last()?;
        Some((first.epoch_seconds, last.epoch_seconds))
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
