//! Duration decomposition and the three display layouts

use std::fmt::Write;

use super::{
    options::{DisplayFormat, FormatOptions},
    planck::append_planck_block,
};

const NANOS_PER_HOUR: u64 = 3_600_000_000_000;
const NANOS_PER_MINUTE: u64 = 60_000_000_000;
const NANOS_PER_SECOND: u64 = 1_000_000_000;
const NANOS_PER_MILLI: u64 = 1_000_000;
const NANOS_PER_MICRO: u64 = 1_000;

/// Elapsed nanoseconds split into display fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationParts {
    /// Unbounded
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
    pub millis: u64,
    pub micros: u64,
    pub nanos: u64,
}

impl DurationParts {
    pub fn from_nanos(elapsed: u64) -> Self {
        Self {
            hours: elapsed / NANOS_PER_HOUR,
            minutes: (elapsed / NANOS_PER_MINUTE) % 60,
            seconds: (elapsed / NANOS_PER_SECOND) % 60,
            millis: (elapsed / NANOS_PER_MILLI) % 1000,
            micros: (elapsed / NANOS_PER_MICRO) % 1000,
            nanos: elapsed % 1000,
        }
    }

    /// Enabled sub-second fields, always in ms, μs, ns order
    fn sub_units(&self, options: &FormatOptions) -> Vec<(u64, &'static str)> {
        [
            (options.show_ms, self.millis, "ms"),
            (options.show_us, self.micros, "μs"),
            (options.show_ns, self.nanos, "ns"),
        ]
        .into_iter()
        .filter(|(shown, _, _)| *shown)
        .map(|(_, value, suffix)| (value, suffix))
        .collect()
    }
}

/// Render elapsed nanoseconds with the given options
pub fn format_duration(elapsed_nanos: u64, options: &FormatOptions) -> String {
    let parts = DurationParts::from_nanos(elapsed_nanos);
    let sub_units = parts.sub_units(options);

    let mut out = match options.display_format {
        DisplayFormat::Classic => {
            let padded: Vec<String> = sub_units.iter().map(|(v, _)| format!("{:03}", v)).collect();
            format!(
                "{:02}:{:02}:{:02}.{}",
                parts.hours,
                parts.minutes,
                parts.seconds,
                padded.join(" ")
            )
        }
        DisplayFormat::Digital => {
            let padded: Vec<String> = sub_units.iter().map(|(v, _)| format!("{:03}", v)).collect();
            format!(
                "{:02}:{:02}:{:02}:{}",
                parts.hours,
                parts.minutes,
                parts.seconds,
                padded.join(":")
            )
        }
        DisplayFormat::Scientific => {
            let mut s = format!("{:02}h {:02}m {:02}s", parts.hours, parts.minutes, parts.seconds);
            for (value, suffix) in &sub_units {
                let _ = write!(s, " {}{}", value, suffix);
            }
            s
        }
    };

    if options.planck_mode {
        append_planck_block(&mut out, elapsed_nanos);
    }
    out
}
