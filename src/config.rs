//! Configuration and CLI argument handling

use std::time::Duration;

use clap::Parser;

use crate::format::{options::DEFAULT_PLANCK_DIGITS, DisplayFormat, FormatOptions};

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "nano-stopwatch")]
#[command(about = "A nanosecond stopwatch served over HTTP, with an optional Planck-time readout")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Display refresh interval in milliseconds while running
    #[arg(long, default_value = "1", value_parser = clap::value_parser!(u64).range(1..))]
    pub tick_ms: u64,

    /// Display layout: classic, digital or scientific
    #[arg(short, long, default_value = "classic")]
    pub format: String,

    /// Hide the millisecond field
    #[arg(long)]
    pub hide_ms: bool,

    /// Hide the microsecond field
    #[arg(long)]
    pub hide_us: bool,

    /// Hide the nanosecond field
    #[arg(long)]
    pub hide_ns: bool,

    /// Append sub-nanosecond unit estimates down to Planck time
    #[arg(long)]
    pub planck: bool,

    /// Reserved precision setting for Planck mode (0-40)
    #[arg(long, default_value_t = DEFAULT_PLANCK_DIGITS,
          value_parser = clap::value_parser!(u8).range(0..=40))]
    pub planck_digits: u8,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Display refresh interval while the timer runs
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1))
    }

    /// Initial display options; an unknown layout falls back to Classic
    pub fn format_options(&self) -> FormatOptions {
        FormatOptions {
            show_ms: !self.hide_ms,
            show_us: !self.hide_us,
            show_ns: !self.hide_ns,
            display_format: DisplayFormat::parse_or_classic(&self.format),
            planck_mode: self.planck,
            planck_digits: self.planck_digits,
        }
        .sanitized()
    }
}
