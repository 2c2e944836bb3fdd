//! Configuration types for loading and compacting exports.
//!
//! This module provides plain configuration structs for library usage,
//! without any CLI framework dependencies. The CLI builds the same structs
//! from its flags, optionally starting from a JSON file.
//!
//! - [`CompactConfig`] - filtering and presentation options for one run
//! - [`LoaderConfig`] - export loading behavior
//! - [`Mode`] - day-grouped or participant-proximity transcripts
//!
//! # Example
//!
//! ```rust
//! use chatmin::config::{CompactConfig, Mode};
//!
//! let config = CompactConfig::new()
//!     .with_mode(Mode::Proximity)
//!     .with_participant("Alice")
//!     .with_window_minutes(10)
//!     .with_hide_links(true);
//!
//! assert!(config.is_proximity());
//! assert_eq!(config.window_seconds(), 600);
//! ```

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use chrono::{Local, NaiveDate, NaiveDateTime, TimeZone};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{ChatminError, Result};

/// Default proximity radius in minutes.
pub const DEFAULT_WINDOW_MINUTES: u32 = 5;

/// Transcript mode.
///
/// Controls both filtering and header granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// Every message, grouped under one header per calendar day.
    #[default]
    All,

    /// Only activity near the selected participants, grouped under
    /// one header per minute.
    #[serde(rename = "participant-proximity", alias = "proximity", alias = "user")]
    Proximity,
}

impl Mode {
    /// Returns all accepted mode names including aliases.
    pub fn all_names() -> &'static [&'static str] {
        &["all", "proximity", "participant-proximity", "user"]
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::All => write!(f, "all"),
            Mode::Proximity => write!(f, "participant-proximity"),
        }
    }
}

impl std::str::FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(Mode::All),
            "proximity" | "participant-proximity" | "user" => Ok(Mode::Proximity),
            _ => Err(format!(
                "Unknown mode: '{}'. Expected one of: {}",
                s,
                Mode::all_names().join(", ")
            )),
        }
    }
}

/// Filtering and presentation options for one compaction run.
///
/// Every field has a default, so partial JSON config files are accepted:
///
/// ```rust
/// use chatmin::config::{CompactConfig, Mode};
///
/// let config: CompactConfig = serde_json::from_str(r#"{"mode": "user", "participants": ["Bob"]}"#)?;
/// assert_eq!(config.mode, Mode::Proximity);
/// assert!(config.show_forwards);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompactConfig {
    /// Transcript mode (default: all)
    pub mode: Mode,

    /// Inclusive lower bound in epoch seconds (default: unbounded)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_from: Option<i64>,

    /// Inclusive upper bound in epoch seconds (default: unbounded)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_to: Option<i64>,

    /// Proximity radius in minutes, proximity mode only (default: 5).
    ///
    /// Accepts a number or a string; invalid values become `0` as with
    /// [`parse_window_minutes`].
    #[serde(deserialize_with = "deserialize_window_minutes")]
    pub window_minutes: u32,

    /// Authors whose messages anchor the proximity window
    pub participants: BTreeSet<String>,

    /// Keep service events (default: false)
    pub include_service: bool,

    /// Render `[FWD from ...]` annotations (default: true)
    pub show_forwards: bool,

    /// Render `> ` reply markers (default: true)
    pub show_reply: bool,

    /// Replace links and mentions with a placeholder (default: false)
    pub hide_links: bool,

    /// Replace author names with `User N` pseudonyms (default: false)
    pub anonymize_names: bool,
}

impl Default for CompactConfig {
    fn default() -> Self {
        Self {
            mode: Mode::All,
            date_from: None,
            date_to: None,
            window_minutes: DEFAULT_WINDOW_MINUTES,
            participants: BTreeSet::new(),
            include_service: false,
            show_forwards: true,
            show_reply: true,
            hide_links: false,
            anonymize_names: false,
        }
    }
}

impl CompactConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a configuration from a JSON file.
    ///
    /// Missing fields take their default values.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ChatminError::invalid_config(format!("cannot read {}: {e}", path.display()))
        })?;
        let config = serde_json::from_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded configuration file");
        Ok(config)
    }

    #[must_use]
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the inclusive lower bound in epoch seconds.
    #[must_use]
    pub fn with_date_from(mut self, epoch_seconds: i64) -> Self {
        self.date_from = Some(epoch_seconds);
        self
    }

    /// Sets the inclusive upper bound in epoch seconds.
    #[must_use]
    pub fn with_date_to(mut self, epoch_seconds: i64) -> Self {
        self.date_to = Some(epoch_seconds);
        self
    }

    #[must_use]
    pub fn with_window_minutes(mut self, minutes: u32) -> Self {
        self.window_minutes = minutes;
        self
    }

    /// Adds one participant to the proximity target set.
    #[must_use]
    pub fn with_participant(mut self, name: impl Into<String>) -> Self {
        self.participants.insert(name.into());
        self
    }

    #[must_use]
    pub fn with_participants<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.participants.extend(names.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn with_include_service(mut self, enabled: bool) -> Self {
        self.include_service = enabled;
        self
    }

    #[must_use]
    pub fn with_show_forwards(mut self, enabled: bool) -> Self {
        self.show_forwards = enabled;
        self
    }

    #[must_use]
    pub fn with_show_reply(mut self, enabled: bool) -> Self {
        self.show_reply = enabled;
        self
    }

    #[must_use]
    pub fn with_hide_links(mut self, enabled: bool) -> Self {
        self.hide_links = enabled;
        self
    }

    #[must_use]
    pub fn with_anonymize_names(mut self, enabled: bool) -> Self {
        self.anonymize_names = enabled;
        self
    }

    /// Returns `true` in participant-proximity mode.
    pub fn is_proximity(&self) -> bool {
        self.mode == Mode::Proximity
    }

    /// Returns the proximity radius in seconds.
    pub fn window_seconds(&self) -> i64 {
        i64::from(self.window_minutes) * 60
    }

    /// Returns `true` if a date bound is set.
    pub fn has_date_filter(&self) -> bool {
        self.date_from.is_some() || self.date_to.is_some()
    }

    /// Checks that the configuration can produce a meaningful transcript.
    ///
    /// Proximity mode needs at least one participant, and the date range must
    /// not be inverted.
    pub fn validate(&self) -> Result<()> {
        if self.is_proximity() && self.participants.is_empty() {
            return Err(ChatminError::invalid_config(
                "participant-proximity mode requires at least one participant",
            ));
        }
        if let (Some(from), Some(to)) = (self.date_from, self.date_to) {
            if from > to {
                return Err(ChatminError::invalid_config(format!(
                    "date range is inverted: {from} > {to}"
                )));
            }
        }
        Ok(())
    }
}

/// Configuration for loading Telegram exports.
///
/// # Example
///
/// ```rust
/// use chatmin::config::LoaderConfig;
///
/// let strict = LoaderConfig::new().with_skip_invalid(false);
/// assert!(!strict.skip_invalid);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Skip malformed message records instead of failing (default: true)
    pub skip_invalid: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self { skip_invalid: true }
    }
}

impl LoaderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_skip_invalid(mut self, skip: bool) -> Self {
        self.skip_invalid = skip;
        self
    }
}

/// Parses a proximity window given as text.
///
/// Integers are taken as-is and decimals are truncated. Negative,
/// non-numeric and out-of-range input falls back to `0`, which keeps only
/// messages sharing a target's exact timestamp.
///
/// ```rust
/// use chatmin::config::parse_window_minutes;
///
/// assert_eq!(parse_window_minutes("15"), 15);
/// assert_eq!(parse_window_minutes("2.9"), 2);
/// assert_eq!(parse_window_minutes("-3"), 0);
/// assert_eq!(parse_window_minutes("soon"), 0);
/// ```
pub fn parse_window_minutes(input: &str) -> u32 {
    let trimmed = input.trim();
    let parsed = trimmed.parse::<i64>().ok().or_else(|| {
        trimmed
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(|v| v.trunc() as i64)
    });

    match parsed.and_then(|v| u32::try_from(v).ok()) {
        Some(minutes) => minutes,
        None => {
            tracing::warn!(input, "invalid proximity window, falling back to 0 minutes");
            0
        }
    }
}

fn deserialize_window_minutes<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => parse_window_minutes(&s),
        other => parse_window_minutes(&other.to_string()),
    })
}

/// Which end of a range a date bound describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// Lower bound: a bare date means the start of that day.
    Start,
    /// Upper bound: a bare date means the last second of that day.
    End,
}

/// Parses a date bound into epoch seconds.
///
/// Accepted forms:
/// - integer epoch seconds (`1705314600`)
/// - `YYYY-MM-DDTHH:MM[:SS]` or `YYYY-MM-DD HH:MM[:SS]`
/// - `YYYY-MM-DD` (start or end of day depending on `bound`)
///
/// Wall-clock forms are interpreted in the local time zone, like the `date`
/// field of the export.
pub fn parse_date_bound(input: &str, bound: Bound) -> Result<i64> {
    let trimmed = input.trim();

    if let Ok(epoch) = trimmed.parse::<i64>() {
        return Ok(epoch);
    }

    let naive = parse_naive_datetime(trimmed)
        .or_else(|| {
            NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                .ok()
                .and_then(|date| match bound {
                    Bound::Start => date.and_hms_opt(0, 0, 0),
                    Bound::End => date.and_hms_opt(23, 59, 59),
                })
        })
        .ok_or_else(|| ChatminError::invalid_date(input))?;

    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.timestamp())
        .ok_or_else(|| ChatminError::invalid_date(input))
}

fn parse_naive_datetime(input: &str) -> Option<NaiveDateTime> {
    const FORMATS: &[&str] = &[
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ];
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_compact_config_defaults() {
        let config = CompactConfig::default();
        assert_eq!(config.mode, Mode::All);
        assert_eq!(config.window_minutes, DEFAULT_WINDOW_MINUTES);
        assert!(!config.include_service);
        assert!(config.show_forwards);
        assert!(config.show_reply);
        assert!(!config.hide_links);
        assert!(!config.anonymize_names);
        assert!(!config.has_date_filter());
    }

    #[test]
    fn test_compact_config_builder() {
        let config = CompactConfig::new()
            .with_mode(Mode::Proximity)
            .with_participants(["Alice", "Bob"])
            .with_window_minutes(3)
            .with_date_from(10)
            .with_date_to(20)
            .with_include_service(true)
            .with_show_forwards(false)
            .with_show_reply(false)
            .with_hide_links(true)
            .with_anonymize_names(true);

        assert!(config.is_proximity());
        assert_eq!(config.participants.len(), 2);
        assert_eq!(config.window_seconds(), 180);
        assert_eq!(config.date_from, Some(10));
        assert_eq!(config.date_to, Some(20));
        assert!(config.include_service);
        assert!(!config.show_forwards);
        assert!(!config.show_reply);
        assert!(config.hide_links);
        assert!(config.anonymize_names);
    }

    #[test]
    fn test_validate_proximity_requires_participants() {
        let config = CompactConfig::new().with_mode(Mode::Proximity);
        assert!(config.validate().unwrap_err().is_invalid_config());
        assert!(config.with_participant("Alice").validate().is_ok());
    }

    #[test]
    fn test_validate_inverted_range() {
        let config = CompactConfig::new().with_date_from(20).with_date_to(10);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: CompactConfig =
            serde_json::from_str(r#"{"hide_links": true, "window_minutes": 30}"#).unwrap();
        assert!(config.hide_links);
        assert_eq!(config.window_minutes, 30);
        assert!(config.show_reply);
    }

    #[test]
    fn test_window_from_json_number_or_string() {
        let parse = |json: &str| serde_json::from_str::<CompactConfig>(json).unwrap().window_minutes;
        assert_eq!(parse(r#"{"window_minutes": 10}"#), 10);
        assert_eq!(parse(r#"{"window_minutes": "10"}"#), 10);
        assert_eq!(parse(r#"{"window_minutes": 2.5}"#), 2);
        assert_eq!(parse(r#"{"window_minutes": -5}"#), 0);
        assert_eq!(parse(r#"{"window_minutes": "soon"}"#), 0);
        assert_eq!(parse(r#"{"window_minutes": null}"#), 0);
        assert_eq!(parse("{}"), DEFAULT_WINDOW_MINUTES);
    }

    #[test]
    fn test_config_serialization_reads_back() {
        let config = CompactConfig::new()
            .with_mode(Mode::Proximity)
            .with_participant("Alice")
            .with_window_minutes(7);
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains(r#""mode":"participant-proximity""#));
        assert_eq!(serde_json::from_str::<CompactConfig>(&json).unwrap(), config);
    }

    #[test]
    fn test_mode_from_str_aliases() {
        assert_eq!(Mode::from_str("all").unwrap(), Mode::All);
        assert_eq!(Mode::from_str("USER").unwrap(), Mode::Proximity);
        assert_eq!(Mode::from_str("participant-proximity").unwrap(), Mode::Proximity);
        assert!(Mode::from_str("weekly").is_err());
    }

    #[test]
    fn test_mode_serde_roundtrip_name() {
        let json = serde_json::to_string(&Mode::Proximity).unwrap();
        assert_eq!(json, r#""participant-proximity""#);
        assert_eq!(json.trim_matches('"'), Mode::Proximity.to_string());
        let mode: Mode = serde_json::from_str(r#""participant-proximity""#).unwrap();
        assert_eq!(mode, Mode::Proximity);
    }

    #[test]
    fn test_parse_window_minutes() {
        assert_eq!(parse_window_minutes("0"), 0);
        assert_eq!(parse_window_minutes(" 12 "), 12);
        assert_eq!(parse_window_minutes("7.99"), 7);
        assert_eq!(parse_window_minutes("-1"), 0);
        assert_eq!(parse_window_minutes(""), 0);
        assert_eq!(parse_window_minutes("NaN"), 0);
        assert_eq!(parse_window_minutes("99999999999"), 0);
    }

    #[test]
    fn test_parse_date_bound_epoch() {
        assert_eq!(parse_date_bound("1705314600", Bound::Start).unwrap(), 1705314600);
    }

    #[test]
    fn test_parse_date_bound_day_end_after_start() {
        let start = parse_date_bound("2024-01-15", Bound::Start).unwrap();
        let end = parse_date_bound("2024-01-15", Bound::End).unwrap();
        assert_eq!(end - start, 86_399);
    }

    #[test]
    fn test_parse_date_bound_datetime_forms_agree() {
        let a = parse_date_bound("2024-01-15T10:30", Bound::Start).unwrap();
        let b = parse_date_bound("2024-01-15 10:30:00", Bound::End).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_parse_date_bound_invalid() {
        let err = parse_date_bound("15/01/2024", Bound::Start).unwrap_err();
        assert!(err.is_invalid_date());
    }
}
