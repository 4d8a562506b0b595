//! Sub-nanosecond extrapolation ("Planck mode").
//!
//! Elapsed time is only known to the nanosecond, so these counts are a
//! cosmetic scaling of that value, not measurements. Every unit is an exact
//! decimal `mantissa * 10^-exponent` seconds, which lets the division run on
//! big integers with no rounding at all.

use std::fmt::Write;

use num_bigint::BigUint;

/// Decimal exponent of one nanosecond in seconds
const NANOS_EXPONENT: u32 = 9;

/// A named time unit below one nanosecond
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubNanoUnit {
    pub name: &'static str,
    pub suffix: &'static str,
    mantissa: u32,
    exponent: u32,
}

impl SubNanoUnit {
    const fn new(name: &'static str, suffix: &'static str, mantissa: u32, exponent: u32) -> Self {
        Self {
            name,
            suffix,
            mantissa,
            exponent,
        }
    }

    /// `floor(elapsed_seconds / unit_seconds)` for an elapsed nanosecond count
    pub fn count(&self, elapsed_nanos: u64) -> BigUint {
        let ten = BigUint::from(10u32);
        let numerator = BigUint::from(elapsed_nanos) * ten.pow(self.exponent);
        let denominator = BigUint::from(self.mantissa) * ten.pow(NANOS_EXPONENT);
        numerator / denominator
    }
}

/// Units rendered by Planck mode, in display order
pub const PLANCK_UNITS: [SubNanoUnit; 6] = [
    SubNanoUnit::new("picosecond", "p", 1, 12),
    SubNanoUnit::new("femtosecond", "f", 1, 15),
    SubNanoUnit::new("attosecond", "a", 1, 18),
    SubNanoUnit::new("zeptosecond", "z", 1, 21),
    SubNanoUnit::new("yoctosecond", "y", 1, 24),
    // 5.391247e-44 s
    SubNanoUnit::new("planck time", "ℓ", 5_391_247, 50),
];

/// Unit counts for `elapsed_nanos`, paired with their unit
pub fn extrapolate(elapsed_nanos: u64) -> Vec<(SubNanoUnit, BigUint)> {
    PLANCK_UNITS
        .iter()
        .map(|unit| (*unit, unit.count(elapsed_nanos)))
        .collect()
}

/// Append ` | <p> <f> <a> <z> <y> <ℓ>` to `out`
pub fn append_planck_block(out: &mut String, elapsed_nanos: u64) {
    out.push_str(" |");
    for (unit, count) in extrapolate(elapsed_nanos) {
        // Writing into a String cannot fail
        let _ = write!(out, " {}{}", count, unit.suffix);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn counts(elapsed_nanos: u64) -> Vec<String> {
        extrapolate(elapsed_nanos)
            .into_iter()
            .map(|(_, count)| count.to_string())
            .collect()
    }

    #[test]
    fn test_zero_elapsed_is_all_zero() {
        assert_eq!(counts(0), vec!["0"; 6]);

        let mut out = String::new();
        append_planck_block(&mut out, 0);
        assert_eq!(out, " | 0p 0f 0a 0z 0y 0ℓ");
    }

    #[test]
    fn test_one_nanosecond_scales_exactly() {
        assert_eq!(
            counts(1),
            vec![
                "1000",
                "1000000",
                "1000000000",
                "1000000000000",
                "1000000000000000",
                "18548584399861479171701834473545730",
            ]
        );
    }

    #[test]
    fn test_one_second_in_planck_times() {
        let planck = PLANCK_UNITS[5].count(1_000_000_000);
        assert_eq!(planck.to_string(), "18548584399861479171701834473545730700151560");
    }

    #[test]
    fn test_million_hours_does_not_overflow() {
        let elapsed = 3_600_000_000_000u64 * 1_000_000;
        let planck = PLANCK_UNITS[5].count(elapsed);
        assert_eq!(
            planck.to_string(),
            "66774903839501325018126604104764630520545617739272565"
        );
        assert_eq!(PLANCK_UNITS[0].count(elapsed).to_string(), "3600000000000000000000");
    }

    #[test]
    fn test_u64_max_is_handled() {
        let yocto = PLANCK_UNITS[4].count(u64::MAX);
        assert_eq!(yocto, BigUint::from(u64::MAX) * BigUint::from(10u32).pow(15));
    }

    #[test]
    fn test_suffixes_in_display_order() {
        let suffixes: Vec<&str> = PLANCK_UNITS.iter().map(|unit| unit.suffix).collect();
        assert_eq!(suffixes, vec!["p", "f", "a", "z", "y", "ℓ"]);
    }
}
