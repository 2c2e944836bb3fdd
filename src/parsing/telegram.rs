//! Telegram Desktop record types.
//!
//! A Telegram JSON export looks like:
//!
//! ```json
//! {
//!   "name": "Chat Name",
//!   "messages": [
//!     {
//!       "id": 12345,
//!       "type": "message",
//!       "date": "2024-01-15T10:30:00",
//!       "date_unixtime": "1705314600",
//!       "from": "Sender Name",
//!       "text": "Hello" | ["Hello", {"type": "url", "text": "https://..."}],
//!       "media_type": "sticker",
//!       "sticker_emoji": "😀",
//!       "forwarded_from": "Someone",
//!       "reply_to_message_id": 12344
//!     }
//!   ]
//! }
//! ```

use serde::Deserialize;

use crate::message::{MediaInfo, Message, MessageKind, MessageText, utc_date_string};

/// Raw Telegram message structure for deserialization.
#[derive(Debug, Deserialize)]
pub struct TelegramRawMessage {
    /// Message ID
    #[serde(default)]
    pub id: i64,
    /// `message` or `service`
    #[serde(rename = "type", default)]
    pub msg_type: String,
    /// Local wall-clock time
    #[serde(default)]
    pub date: String,
    /// Unix timestamp as string
    pub date_unixtime: Option<String>,
    /// Sender name (null for deleted accounts and most service events)
    pub from: Option<String>,
    /// Message text (can be string or array)
    pub text: Option<MessageText>,
    /// Media descriptors, stored flat on the record
    #[serde(flatten)]
    pub media: MediaInfo,
    /// Original author of a forwarded message
    pub forwarded_from: Option<String>,
    /// Reply reference
    pub reply_to_message_id: Option<i64>,
}

/// Parses a Unix timestamp string.
///
/// Telegram stores timestamps as strings like "1234567890".
pub fn parse_unix_timestamp(ts_str: &str) -> Option<i64> {
    ts_str.trim().parse::<i64>().ok()
}

/// Converts a raw record into a [`Message`].
///
/// Returns `None` when the record has no usable `date_unixtime`; such records
/// cannot be placed on the timeline and are dropped by the loader. A missing
/// `date` string is derived from the timestamp in UTC.
pub fn parse_telegram_message(raw: TelegramRawMessage) -> Option<Message> {
    let epoch_seconds = raw.date_unixtime.as_deref().and_then(parse_unix_timestamp)?;
    let date = if raw.date.is_empty() {
        utc_date_string(epoch_seconds)
    } else {
        raw.date
    };

    Some(Message {
        id: raw.id,
        from: raw.from,
        date,
        epoch_seconds,
        kind: MessageKind::from_telegram(&raw.msg_type),
        text: raw.text.unwrap_or_default(),
        media: raw.media,
        forwarded_from: raw.forwarded_from,
        reply_to: raw.reply_to_message_id,
    })
}
