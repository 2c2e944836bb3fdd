//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure (for use with clap)
//! - [`ModeArg`] - Transcript mode as accepted on the command line
//!
//! [`Args::compact_config`] turns parsed flags into a
//! [`CompactConfig`](crate::config::CompactConfig), starting from an optional
//! JSON config file so flags only override what they name.
//!
//! ```rust
//! use clap::Parser;
//! use chatmin::cli::Args;
//!
//! let args = Args::parse_from(["chatmin", "result.json", "--mode", "user", "-p", "Alice", "-w", "10"]);
//! let config = args.compact_config()?;
//! assert!(config.is_proximity());
//! assert_eq!(config.window_minutes, 10);
//! # Ok::<(), chatmin::ChatminError>(())
//! ```

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};

use crate::config::{Bound, CompactConfig, Mode, parse_date_bound, parse_window_minutes};
use crate::error::Result;

/// Compress a Telegram chat export into a compact plain-text transcript
/// for LLMs.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatmin")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatmin result.json
    chatmin result.json --stdout --hide-links --anonymize
    chatmin result.json --from 2024-01-01 --to 2024-01-31 -o january.txt
    chatmin result.json --mode user -p Alice -p Bob -w 10
    chatmin result.json --list-participants")]
pub struct Args {
    /// Path to the Telegram JSON export
    pub input: PathBuf,

    /// Path to output file (default: processed_<title>_minified.txt)
    #[arg(short, long, value_name = "PATH", conflicts_with = "stdout")]
    pub output: Option<PathBuf>,

    /// Print the transcript to stdout instead of writing a file
    #[arg(long)]
    pub stdout: bool,

    /// Transcript mode
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Participant anchoring the proximity window (repeatable)
    #[arg(short, long = "participant", value_name = "NAME")]
    pub participants: Vec<String>,

    /// Proximity window in minutes
    #[arg(short, long, value_name = "MINUTES", allow_hyphen_values = true)]
    pub window: Option<String>,

    /// Keep messages from this date on (YYYY-MM-DD, YYYY-MM-DDTHH:MM or unix seconds)
    #[arg(long, value_name = "DATE")]
    pub from: Option<String>,

    /// Keep messages up to this date (a bare date includes the whole day)
    #[arg(long, value_name = "DATE")]
    pub to: Option<String>,

    /// Include service events (joins, pins, calls)
    #[arg(long)]
    pub include_service: bool,

    /// Drop [FWD from ...] annotations
    #[arg(long)]
    pub no_forwards: bool,

    /// Drop "> " reply markers
    #[arg(long)]
    pub no_replies: bool,

    /// Replace links and mentions with [link]
    #[arg(long)]
    pub hide_links: bool,

    /// Replace author names with User N pseudonyms
    #[arg(long)]
    pub anonymize: bool,

    /// Base configuration file (JSON); flags override it
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the chat's participants and exit
    #[arg(long)]
    pub list_participants: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Builds the compaction configuration from the config file and flags.
    pub fn compact_config(&self) -> Result<CompactConfig> {
        let mut config = match &self.config {
            Some(path) => CompactConfig::from_json_file(path)?,
            None => CompactConfig::new(),
        };

        if let Some(mode) = self.mode {
            config.mode = mode.into();
        }
        config
            .participants
            .extend(self.participants.iter().cloned());
        if let Some(window) = &self.window {
            config.window_minutes = parse_window_minutes(window);
        }
        if let Some(from) = &self.from {
            config.date_from = Some(parse_date_bound(from, Bound::Start)?);
        }
        if let Some(to) = &self.to {
            config.date_to = Some(parse_date_bound(to, Bound::End)?);
        }

        config.include_service |= self.include_service;
        config.show_forwards &= !self.no_forwards;
        config.show_reply &= !self.no_replies;
        config.hide_links |= self.hide_links;
        config.anonymize_names |= self.anonymize;

        Ok(config)
    }

    /// Returns the default log filter directive for the verbosity level.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    }
}

/// Transcript mode on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default)]
pub enum ModeArg {
    /// Every message, one header per day
    #[default]
    All,

    /// Only activity near the selected participants, one header per minute
    #[value(name = "participant-proximity", aliases = ["user", "proximity"])]
    Proximity,
}

impl From<ModeArg> for Mode {
    fn from(mode: ModeArg) -> Mode {
        match mode {
            ModeArg::All => Mode::All,
            ModeArg::Proximity => Mode::Proximity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["chatmin", "in.json"];
        argv.extend_from_slice(extra);
        Args::parse_from(argv)
    }

    #[test]
    fn test_defaults_match_library_defaults() {
        let config = args(&[]).compact_config().unwrap();
        assert_eq!(config, CompactConfig::new());
    }

    #[test]
    fn test_mode_aliases() {
        for name in ["participant-proximity", "user", "proximity"] {
            assert_eq!(args(&["--mode", name]).mode, Some(ModeArg::Proximity));
        }
        assert_eq!(args(&["--mode", "all"]).mode, Some(ModeArg::All));
    }

    #[test]
    fn test_flags_toggle_options() {
        let config = args(&[
            "--include-service",
            "--no-forwards",
            "--no-replies",
            "--hide-links",
            "--anonymize",
        ])
        .compact_config()
        .unwrap();
        assert!(config.include_service);
        assert!(!config.show_forwards);
        assert!(!config.show_reply);
        assert!(config.hide_links);
        assert!(config.anonymize_names);
    }

    #[test]
    fn test_repeatable_participants() {
        let config = args(&["-p", "Alice", "--participant", "Bob", "-p", "Alice"])
            .compact_config()
            .unwrap();
        assert_eq!(config.participants.len(), 2);
    }

    #[test]
    fn test_lenient_window() {
        assert_eq!(args(&["-w", "abc"]).compact_config().unwrap().window_minutes, 0);
        assert_eq!(args(&["-w", "7.5"]).compact_config().unwrap().window_minutes, 7);
    }

    #[test]
    fn test_date_bounds() {
        let config = args(&["--from", "100", "--to", "200"]).compact_config().unwrap();
        assert_eq!(config.date_from, Some(100));
        assert_eq!(config.date_to, Some(200));

        let err = args(&["--from", "yesterday"]).compact_config().unwrap_err();
        assert!(err.is_invalid_date());
    }

    #[test]
    fn test_flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"mode": "user", "participants": ["Bob"], "window_minutes": 3}"#)
            .unwrap();

        let path = path.to_string_lossy().into_owned();
        let config = args(&["--config", &path, "-p", "Alice", "-w", "9", "--no-replies"])
            .compact_config()
            .unwrap();
        assert!(config.is_proximity());
        assert!(config.participants.contains("Alice"));
        assert!(config.participants.contains("Bob"));
        assert_eq!(config.window_minutes, 9);
        assert!(!config.show_reply);
    }

    #[test]
    fn test_output_conflicts_with_stdout() {
        let result = Args::try_parse_from(["chatmin", "in.json", "-o", "x.txt", "--stdout"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_log_level() {
        assert_eq!(args(&[]).log_level(), "warn");
        assert_eq!(args(&["-v"]).log_level(), "debug");
        assert_eq!(args(&["-vvv"]).log_level(), "trace");
    }
}
