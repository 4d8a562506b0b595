//! Display options supplied by the host on every render

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::error::StopwatchError;

/// Upper bound for the reserved planck digits setting
pub const PLANCK_DIGITS_MAX: u8 = 40;

/// Planck digits used when nothing else is configured
pub const DEFAULT_PLANCK_DIGITS: u8 = 35;

/// Textual arrangement of the decomposed duration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Value")]
pub enum DisplayFormat {
    /// `HH:MM:SS.mmm uuu nnn`
    #[default]
    Classic,
    /// `HH:MM:SS:mmm:uuu:nnn`
    Digital,
    /// `HHh MMm SSs 5ms 12μs 7ns`
    Scientific,
}

impl DisplayFormat {
    pub const ALL: [DisplayFormat; 3] = [
        DisplayFormat::Classic,
        DisplayFormat::Digital,
        DisplayFormat::Scientific,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayFormat::Classic => "Classic",
            DisplayFormat::Digital => "Digital",
            DisplayFormat::Scientific => "Scientific",
        }
    }

    /// Parse a layout name, falling back to Classic for anything unrecognized
    pub fn parse_or_classic(name: &str) -> Self {
        name.parse().unwrap_or_else(|e: StopwatchError| {
            warn!("{}, falling back to Classic", e);
            DisplayFormat::Classic
        })
    }
}

impl fmt::Display for DisplayFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DisplayFormat {
    type Err = StopwatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DisplayFormat::ALL
            .into_iter()
            .find(|format| format.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| StopwatchError::InvalidOptions(format!("unknown display format '{}'", s)))
    }
}

/// Any JSON value is accepted; non-strings fall back to Classic
impl From<Value> for DisplayFormat {
    fn from(value: Value) -> Self {
        match value {
            Value::String(name) => DisplayFormat::parse_or_classic(&name),
            other => {
                warn!("display format {} is not a layout name, falling back to Classic", other);
                DisplayFormat::Classic
            }
        }
    }
}

/// Read planck digits from any JSON value, clamping numbers into range
fn deserialize_planck_digits<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(planck_digits_from_value(&value))
}

fn planck_digits_from_value(value: &Value) -> u8 {
    let max = i64::from(PLANCK_DIGITS_MAX);
    let clamped = match value {
        Value::Number(n) => match (n.as_i64(), n.as_u64(), n.as_f64()) {
            (Some(i), _, _) => i.clamp(0, max),
            (None, Some(_), _) => max,
            (None, None, Some(f)) => (f.trunc() as i64).clamp(0, max),
            (None, None, None) => i64::from(DEFAULT_PLANCK_DIGITS),
        },
        _ => {
            warn!("planck_digits {} is not a number, using default", value);
            return DEFAULT_PLANCK_DIGITS;
        }
    };

    let digits = u8::try_from(clamped).unwrap_or(PLANCK_DIGITS_MAX);
    if value.as_i64() != Some(clamped) {
        warn!("planck_digits {} out of range, clamped to {}", value, digits);
    }
    digits
}

/// Which fields to show and how to lay them out
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatOptions {
    pub show_ms: bool,
    pub show_us: bool,
    pub show_ns: bool,
    pub display_format: DisplayFormat,
    /// Append the sub-nanosecond extrapolation block
    pub planck_mode: bool,
    /// Reserved precision setting. Stored and validated, never read by the
    /// formatter.
    #[serde(deserialize_with = "deserialize_planck_digits")]
    pub planck_digits: u8,
}

impl FormatOptions {
    /// Check the options without changing them
    pub fn validate(&self) -> Result<(), StopwatchError> {
        if self.planck_digits > PLANCK_DIGITS_MAX {
            return Err(StopwatchError::InvalidOptions(format!(
                "planck_digits {} exceeds maximum of {}",
                self.planck_digits, PLANCK_DIGITS_MAX
            )));
        }
        Ok(())
    }

    /// Return options that are safe to render with, clamping what is out of range
    pub fn sanitized(mut self) -> Self {
        if let Err(e) = self.validate() {
            warn!("{}, clamping", e);
            self.planck_digits = self.planck_digits.min(PLANCK_DIGITS_MAX);
        }
        self
    }
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            show_ms: true,
            show_us: true,
            show_ns: true,
            display_format: DisplayFormat::Classic,
            planck_mode: false,
            planck_digits: DEFAULT_PLANCK_DIGITS,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_display_format_parses_any_case() {
        assert_eq!("digital".parse::<DisplayFormat>().unwrap(), DisplayFormat::Digital);
        assert_eq!("SCIENTIFIC".parse::<DisplayFormat>().unwrap(), DisplayFormat::Scientific);
        assert_eq!(" Classic ".parse::<DisplayFormat>().unwrap(), DisplayFormat::Classic);
    }

    #[test]
    fn test_unknown_display_format_is_invalid_options() {
        let err = "binary".parse::<DisplayFormat>().unwrap_err();
        assert!(matches!(err, StopwatchError::InvalidOptions(_)));
        assert!(!err.is_fatal());
        assert_eq!(DisplayFormat::parse_or_classic("binary"), DisplayFormat::Classic);
    }

    #[test]
    fn test_deserialize_falls_back_to_classic() {
        let options: FormatOptions =
            serde_json::from_str(r#"{"display_format": "Hexadecimal", "show_ms": false}"#).unwrap();
        assert_eq!(options.display_format, DisplayFormat::Classic);
        assert!(!options.show_ms);
        // Missing fields take their defaults
        assert!(options.show_us);
        assert_eq!(options.planck_digits, DEFAULT_PLANCK_DIGITS);
    }

    #[test]
    fn test_serialize_uses_layout_names() {
        let options = FormatOptions {
            display_format: DisplayFormat::Scientific,
            ..FormatOptions::default()
        };
        let json = serde_json::to_value(&options).unwrap();
        assert_eq!(json["display_format"], "Scientific");
        assert_eq!(json["planck_digits"], 35);
    }

    #[test]
    fn test_non_string_display_format_falls_back_to_classic() {
        for body in [r#"{"display_format": 2}"#, r#"{"display_format": null}"#, r#"{"display_format": ["Digital"]}"#] {
            let options: FormatOptions = serde_json::from_str(body).unwrap();
            assert_eq!(options.display_format, DisplayFormat::Classic, "{}", body);
        }
    }

    #[test]
    fn test_planck_digits_deserialize_clamps_any_number() {
        let cases = [
            (r#"{"planck_digits": 12}"#, 12),
            (r#"{"planck_digits": 41}"#, 40),
            (r#"{"planck_digits": 1000}"#, 40),
            (r#"{"planck_digits": 18446744073709551615}"#, 40),
            (r#"{"planck_digits": -1}"#, 0),
            (r#"{"planck_digits": 7.9}"#, 7),
            (r#"{"planck_digits": "ten"}"#, DEFAULT_PLANCK_DIGITS),
            (r#"{"planck_digits": null}"#, DEFAULT_PLANCK_DIGITS),
        ];
        for (body, expected) in cases {
            let options: FormatOptions = serde_json::from_str(body).unwrap();
            assert_eq!(options.planck_digits, expected, "{}", body);
        }
    }

    #[test]
    fn test_planck_digits_out_of_range_is_clamped() {
        let options = FormatOptions {
            planck_digits: 99,
            ..FormatOptions::default()
        };
        assert!(options.validate().is_err());
        assert_eq!(options.sanitized().planck_digits, PLANCK_DIGITS_MAX);

        let zero = FormatOptions {
            planck_digits: 0,
            ..FormatOptions::default()
        };
        assert!(zero.validate().is_ok());
    }
}
