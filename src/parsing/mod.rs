//! Raw export record types and their conversion into [`Message`](crate::Message).
//!
//! The loader in [`crate::parser`] deserializes records into these raw types
//! and converts them here, so field naming quirks of the export format stay
//! out of the domain model.

pub mod telegram;

pub use telegram::{TelegramRawMessage, parse_telegram_message, parse_unix_timestamp};
