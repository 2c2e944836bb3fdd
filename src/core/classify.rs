//! Content classification.
//!
//! [`classify`] maps a message to a [`ContentDescriptor`] by walking the
//! media descriptors in a fixed priority order; the first match wins and
//! plain text is the fallback. [`ContentDescriptor::render`] turns the
//! descriptor into the tag used on transcript lines.
//!
//! # Example
//!
//! ```
//! use chatmin::Message;
//! use chatmin::core::classify::{ContentDescriptor, classify};
//!
//! let voice = Message::new("Alice", "").with_media_type("voice_message");
//! assert_eq!(classify(&voice, false), ContentDescriptor::VoiceNote);
//!
//! let text = Message::new("Alice", "hello");
//! assert_eq!(classify(&text, false), ContentDescriptor::Text("hello".into()));
//! ```

use crate::Message;
use crate::message::present;

/// Fallback name for audio files without a `file_name`.
pub const AUDIO_PLACEHOLDER: &str = "file";

/// Canonical description of what a message carries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ContentDescriptor {
    VoiceNote,
    VideoNote,
    Photo,
    Video,
    Animation,
    /// Audio file with its name (or [`AUDIO_PLACEHOLDER`]).
    Audio(String),
    /// Generic document with its name.
    File(String),
    /// Sticker with its emoji, if the export recorded one.
    Sticker(Option<String>),
    /// No media: the flattened display text.
    Text(String),
}

/// Rendered form of a descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedContent {
    /// Bracketed media tag, sticker emoji, or the message text.
    pub tag: String,
    /// `true` when `tag` is a bracketed media tag.
    pub media_bearing: bool,
}

impl ContentDescriptor {
    /// Renders the descriptor.
    ///
    /// Media kinds become bracketed tags (`[photo]`, `[file: a.pdf]`);
    /// stickers render as the bare emoji (or nothing); text renders as itself.
    pub fn render(&self) -> RenderedContent {
        let media = |tag: String| RenderedContent {
            tag,
            media_bearing: true,
        };
        let plain = |tag: String| RenderedContent {
            tag,
            media_bearing: false,
        };

        match self {
            ContentDescriptor::Photo => media("[photo]".into()),
            ContentDescriptor::Video => media("[video]".into()),
            ContentDescriptor::VoiceNote => media("[voice message]".into()),
            ContentDescriptor::VideoNote => media("[video note]".into()),
            ContentDescriptor::Animation => media("[animation]".into()),
            ContentDescriptor::File(name) => media(format!("[file: {name}]")),
            ContentDescriptor::Audio(name) => media(format!("[audio: {name}]")),
            ContentDescriptor::Sticker(emoji) => plain(emoji.clone().unwrap_or_default()),
            ContentDescriptor::Text(text) => plain(text.clone()),
        }
    }

    /// Returns `true` for stickers that carry an emoji.
    pub fn is_emoji_sticker(&self) -> bool {
        matches!(self, ContentDescriptor::Sticker(Some(_)))
    }
}

/// Classifies a message's content.
///
/// Priority order: voice note, video note, photo, video file, animation,
/// audio file, `image/*` MIME, `video/*` MIME, generic file, sticker emoji,
/// generic sticker, text.
pub fn classify(message: &Message, hide_links: bool) -> ContentDescriptor {
    let media = &message.media;

    if media.is_media_type("voice_message") {
        return ContentDescriptor::VoiceNote;
    }
    if media.is_media_type("video_message") {
        return ContentDescriptor::VideoNote;
    }
    if present(media.photo.as_ref()).is_some() {
        return ContentDescriptor::Photo;
    }
    if present(media.video_file.as_ref()).is_some() {
        return ContentDescriptor::Video;
    }
    if media.is_media_type("animation") {
        return ContentDescriptor::Animation;
    }
    if present(media.audio_file.as_ref()).is_some() {
        let name = present(media.file_name.as_ref()).unwrap_or(AUDIO_PLACEHOLDER);
        return ContentDescriptor::Audio(name.to_string());
    }
    if let Some(mime) = present(media.mime_type.as_ref()) {
        if mime.starts_with("image/") {
            return ContentDescriptor::Photo;
        }
        if mime.starts_with("video/") {
            return ContentDescriptor::Video;
        }
    }
    if let Some(name) = present(media.file_name.as_ref()) {
        return ContentDescriptor::File(name.to_string());
    }
    if let Some(emoji) = present(media.sticker_emoji.as_ref()) {
        return ContentDescriptor::Sticker(Some(emoji.to_string()));
    }
    if media.is_media_type("sticker") {
        return ContentDescriptor::Sticker(None);
    }

    ContentDescriptor::Text(display_text(message, hide_links))
}

/// Returns the message's flattened text.
pub fn display_text(message: &Message, hide_links: bool) -> String {
    message.text.flatten(hide_links)
}
