//! Duration formatting module
//!
//! Turns an integer nanosecond count into display text. Everything here is
//! pure and infallible for well-typed input.

pub mod duration;
pub mod options;
pub mod planck;

pub use duration::{format_duration, DurationParts};
pub use options::{DisplayFormat, FormatOptions};
pub use planck::{SubNanoUnit, PLANCK_UNITS};
