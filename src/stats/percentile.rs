use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Hundredths of a percent in one whole percent.
const HUNDREDTHS_PER_PERCENT: u64 = 100;
/// Upper bound of the scale, in hundredths (100.00%).
const MAX_HUNDREDTHS: u64 = 10_000;

/// A percentile on the 0–100 scale, stored in hundredths of a percent.
///
/// There is no constructor taking a 0–1 fraction. Every percentile in the
/// engine, including the fixed significant band, goes through this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Percentile(u16);

impl Percentile {
    pub const MIN: Self = Self(0);
    pub const P50: Self = Self(5_000);
    pub const P90: Self = Self(9_000);
    pub const P95: Self = Self(9_500);
    pub const P99: Self = Self(9_900);
    pub const MAX: Self = Self(10_000);

    /// Build a percentile from a whole number on the 0–100 scale.
    ///
    /// # Errors
    ///
    /// Returns an error when `whole` is above 100.
    pub fn new(whole: u64) -> Result<Self, ValidationError> {
        Self::from_hundredths(whole.saturating_mul(HUNDREDTHS_PER_PERCENT))
    }

    /// Build a percentile from hundredths of a percent (`9_990` is p99.9).
    ///
    /// # Errors
    ///
    /// Returns an error when `hundredths` is above 10 000.
    pub fn from_hundredths(hundredths: u64) -> Result<Self, ValidationError> {
        if hundredths > MAX_HUNDREDTHS {
            return Err(ValidationError::PercentileOutOfRange { hundredths });
        }
        let value = u16::try_from(hundredths)
            .map_err(|_err| ValidationError::PercentileOutOfRange { hundredths })?;
        Ok(Self(value))
    }

    #[must_use]
    pub const fn hundredths(self) -> u16 {
        self.0
    }

    /// 1-based rank of this percentile in a sorted sequence of `count`
    /// samples: `ceil(k / 100 * count)` clamped to `[1, count]`.
    ///
    /// Returns 0 only when `count` is 0.
    #[must_use]
    pub fn rank(self, count: usize) -> usize {
        if count == 0 {
            return 0;
        }
        let count_u128 = count as u128;
        let scaled = u128::from(self.0).saturating_mul(count_u128);
        let divisor = u128::from(MAX_HUNDREDTHS);
        let whole = scaled.checked_div(divisor).unwrap_or(0);
        let rounded_up = if scaled.checked_rem(divisor).unwrap_or(0) == 0 {
            whole
        } else {
            whole.saturating_add(1)
        };
        let rank = usize::try_from(rounded_up).unwrap_or(count);
        rank.clamp(1, count)
    }
}

impl FromStr for Percentile {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches(['p', 'P']);
        if trimmed.is_empty() {
            return Err(ValidationError::PercentileEmpty);
        }
        let (whole_str, frac_str) = trimmed.split_once('.').unwrap_or((trimmed, ""));
        if whole_str.is_empty() || !whole_str.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::InvalidPercentileFormat {
                value: s.to_owned(),
            });
        }
        if !frac_str.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::InvalidPercentileFormat {
                value: s.to_owned(),
            });
        }
        if frac_str.len() > 2 {
            return Err(ValidationError::PercentileTooPrecise {
                value: s.to_owned(),
            });
        }
        let whole: u64 =
            whole_str
                .parse()
                .map_err(|err| ValidationError::InvalidPercentileNumber {
                    value: s.to_owned(),
                    source: err,
                })?;
        let frac: u64 = match frac_str.len() {
            0 => Ok(0),
            1 => frac_str
                .parse::<u64>()
                .map(|tenths| tenths.saturating_mul(10)),
            _ => frac_str.parse::<u64>(),
        }
        .map_err(|err| ValidationError::InvalidPercentileNumber {
            value: s.to_owned(),
            source: err,
        })?;
        Self::from_hundredths(
            whole
                .saturating_mul(HUNDREDTHS_PER_PERCENT)
                .saturating_add(frac),
        )
    }
}

impl fmt::Display for Percentile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / 100;
        let frac = self.0 % 100;
        if frac == 0 {
            write!(f, "p{}", whole)
        } else if frac % 10 == 0 {
            write!(f, "p{}.{}", whole, frac / 10)
        } else {
            write!(f, "p{}.{:02}", whole, frac)
        }
    }
}
