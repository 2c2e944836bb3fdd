//! Filter messages by kind, date range and participant proximity.
//!
//! [`apply_filters`] reduces a chronologically sorted message slice to the
//! subset that a transcript should contain. It borrows the messages; the
//! export itself is never modified.
//!
//! # Filter Steps
//!
//! | Step | Option | Description |
//! |------|--------|-------------|
//! | Service | [`include_service`](CompactConfig::include_service) | Drops service events unless enabled |
//! | Date range | [`date_from`](CompactConfig::date_from) / [`date_to`](CompactConfig::date_to) | Inclusive epoch-second bounds |
//! | Proximity | [`Mode::Proximity`](crate::config::Mode::Proximity) | Keeps messages within the window of any selected participant's message |
//!
//! # Example
//!
//! ```
//! use chatmin::Message;
//! use chatmin::config::{CompactConfig, Mode};
//! use chatmin::core::filter::apply_filters;
//!
//! let messages = vec![
//!     Message::new("Alice", "ping").with_timestamp(1_000),
//!     Message::new("Bob", "pong").with_timestamp(1_030),
//!     Message::new("Carol", "later").with_timestamp(5_000),
//! ];
//!
//! let config = CompactConfig::new()
//!     .with_mode(Mode::Proximity)
//!     .with_participant("Alice")
//!     .with_window_minutes(1);
//!
//! let kept = apply_filters(&messages, &config);
//! assert_eq!(kept.len(), 2);
//! ```

use crate::Message;
use crate::config::CompactConfig;

/// Filters a sorted message slice according to the configuration.
///
/// Steps are applied in order: service events, date range, then (in
/// proximity mode) the participant-proximity test. Proximity targets are
/// taken from the survivors of the first two steps.
pub fn apply_filters<'a>(messages: &'a [Message], config: &CompactConfig) -> Vec<&'a Message> {
    let survivors: Vec<&Message> = messages
        .iter()
        .filter(|msg| config.include_service || !msg.is_service())
        .filter(|msg| within_range(msg.epoch_seconds, config))
        .collect();

    tracing::debug!(
        total = messages.len(),
        survivors = survivors.len(),
        "applied service and date filters"
    );

    if !config.is_proximity() {
        return survivors;
    }

    let targets = proximity_targets(&survivors, config);
    let window = config.window_seconds();
    let kept: Vec<&Message> = survivors
        .into_iter()
        .filter(|msg| is_near_target(msg.epoch_seconds, &targets, window))
        .collect();

    tracing::debug!(
        targets = targets.len(),
        window_seconds = window,
        kept = kept.len(),
        "applied proximity filter"
    );

    kept
}

fn within_range(epoch_seconds: i64, config: &CompactConfig) -> bool {
    config.date_from.is_none_or(|from| epoch_seconds >= from)
        && config.date_to.is_none_or(|to| epoch_seconds <= to)
}

/// Collects the sorted, deduplicated timestamps of messages written by the
/// selected participants.
pub fn proximity_targets(messages: &[&Message], config: &CompactConfig) -> Vec<i64> {
    let mut targets: Vec<i64> = messages
        .iter()
        .filter(|msg| {
            msg.author()
                .is_some_and(|author| config.participants.contains(author))
        })
        .map(|msg| msg.epoch_seconds)
        .collect();
    targets.sort_unstable();
    targets.dedup();
    targets
}

/// Returns `true` if some target lies within `window` seconds of `epoch_seconds`.
///
/// `targets` must be sorted ascending.
pub fn is_near_target(epoch_seconds: i64, targets: &[i64], window: i64) -> bool {
    let lower = epoch_seconds.saturating_sub(window);
    // First target not below the window's lower edge; it is the closest
    // candidate from the left, so checking it against the upper edge suffices.
    let idx = targets.partition_point(|&t| t < lower);
    targets
        .get(idx)
        .is_some_and(|&t| t <= epoch_seconds.saturating_add(window))
}
