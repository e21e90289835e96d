//! Token validity durations: `<amount><unit>` with unit one of `s`, `m`, `h`, `d`.
//!
//! Compound durations such as `1h30m` are not accepted.

use chrono::Duration;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

use crate::errors::ValidationError;

static VALIDITY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]+)(s|m|h|d)$").unwrap()
});

/// Upper bound keeping `chrono::Duration::seconds` from overflowing
const MAX_VALIDITY_SECONDS: i64 = i64::MAX / 1_000;

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 60 * SECONDS_PER_MINUTE;
const SECONDS_PER_DAY: i64 = 24 * SECONDS_PER_HOUR;

/// A strictly positive number of seconds a token stays valid for
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenValidity {
    seconds: i64,
}

impl TokenValidity {
    /// Creates a validity from a second count; `None` unless positive and in range
    pub fn from_seconds(seconds: i64) -> Option<Self> {
        if seconds > 0 && seconds <= MAX_VALIDITY_SECONDS {
            Some(Self { seconds })
        } else {
            None
        }
    }

    /// Number of seconds
    pub fn as_seconds(&self) -> i64 {
        self.seconds
    }

    /// The validity as a `chrono::Duration`
    pub fn as_duration(&self) -> Duration {
        Duration::seconds(self.seconds)
    }
}

impl Default for TokenValidity {
    /// One hour
    fn default() -> Self {
        Self {
            seconds: SECONDS_PER_HOUR,
        }
    }
}

impl FromStr for TokenValidity {
    type Err = ValidationError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidDuration {
            input: input.to_string(),
        };

        let captures = VALIDITY_PATTERN.captures(input).ok_or_else(invalid)?;
        let amount: i64 = captures[1].parse().map_err(|_| invalid())?;
        let unit = match &captures[2] {
            "s" => 1,
            "m" => SECONDS_PER_MINUTE,
            "h" => SECONDS_PER_HOUR,
            "d" => SECONDS_PER_DAY,
            _ => return Err(invalid()),
        };

        amount
            .checked_mul(unit)
            .and_then(Self::from_seconds)
            .ok_or_else(invalid)
    }
}

impl fmt::Display for TokenValidity {
    /// Renders in the largest unit that divides the second count evenly
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.seconds;
        if s % SECONDS_PER_DAY == 0 {
            write!(f, "{}d", s / SECONDS_PER_DAY)
        } else if s % SECONDS_PER_HOUR == 0 {
            write!(f, "{}h", s / SECONDS_PER_HOUR)
        } else if s % SECONDS_PER_MINUTE == 0 {
            write!(f, "{}m", s / SECONDS_PER_MINUTE)
        } else {
            write!(f, "{}s", s)
        }
    }
}

/// Parses a validity string such as `10m` or `7d`
pub fn parse_validity(input: &str) -> Result<TokenValidity, ValidationError> {
    input.parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_each_unit() {
        assert_eq!(parse_validity("45s").unwrap().as_seconds(), 45);
        assert_eq!(parse_validity("10m").unwrap().as_seconds(), 600);
        assert_eq!(parse_validity("1h").unwrap().as_seconds(), 3600);
        assert_eq!(parse_validity("7d").unwrap().as_seconds(), 604_800);
    }

    #[test]
    fn test_parse_rejects_malformed_input() {
        for input in ["1h30m", "abc", "-5m", "", "10", "h", "10 m", " 10m", "10m ", "10M", "1.5h", "+5s"] {
            let err = parse_validity(input).unwrap_err();
            assert_eq!(
                err,
                ValidationError::InvalidDuration {
                    input: input.to_string()
                },
                "input {:?} should be rejected",
                input
            );
        }
    }

    #[test]
    fn test_parse_rejects_zero() {
        assert!(parse_validity("0s").is_err());
        assert!(parse_validity("0d").is_err());
    }

    #[test]
    fn test_parse_rejects_overflow() {
        assert!(parse_validity("99999999999999999999d").is_err());
        assert!(parse_validity("106751991167301d").is_err());
    }

    #[test]
    fn test_leading_zeros_are_accepted() {
        assert_eq!(parse_validity("007m").unwrap().as_seconds(), 420);
    }

    #[test]
    fn test_display_uses_largest_unit() {
        assert_eq!(parse_validity("90s").unwrap().to_string(), "90s");
        assert_eq!(parse_validity("120s").unwrap().to_string(), "2m");
        assert_eq!(parse_validity("60m").unwrap().to_string(), "1h");
        assert_eq!(parse_validity("48h").unwrap().to_string(), "2d");
    }

    #[test]
    fn test_default_is_one_hour() {
        assert_eq!(TokenValidity::default().as_seconds(), 3600);
        assert_eq!(TokenValidity::default().as_duration(), Duration::hours(1));
    }

    #[test]
    fn test_from_seconds_bounds() {
        assert!(TokenValidity::from_seconds(0).is_none());
        assert!(TokenValidity::from_seconds(-1).is_none());
        assert!(TokenValidity::from_seconds(1).is_some());
    }
}
