use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

const MINUTE_MILLIS: i64 = 1000 * 60;
const HOUR_MILLIS: i64 = MINUTE_MILLIS * 60;
const DAY_MILLIS: i64 = HOUR_MILLIS * 24;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidOffsetError {
    #[error("Offset `{0}` must be a positive integer followed by one of `m`, `h` or `d`")]
    Malformed(String),
    #[error("Offset `{0}` is too large")]
    Overflow(String),
}

/// Parses a human readable lead time like `15m`, `24h` or `2d` into millis.
///
/// Every token that does not match `^(\d+)(m|h|d)$` with a non zero
/// magnitude is rejected.
pub fn parse_offset(token: &str) -> Result<i64, InvalidOffsetError> {
    let malformed = || InvalidOffsetError::Malformed(token.to_string());

    let unit = token.chars().last().ok_or_else(malformed)?;
    let unit_millis = match unit {
        'm' => MINUTE_MILLIS,
        'h' => HOUR_MILLIS,
        'd' => DAY_MILLIS,
        _ => return Err(malformed()),
    };

    let magnitude = &token[..token.len() - 1];
    if magnitude.is_empty() || !magnitude.chars().all(|c| c.is_ascii_digit()) {
        return Err(malformed());
    }
    let magnitude = magnitude
        .parse::<i64>()
        .map_err(|_| InvalidOffsetError::Overflow(token.to_string()))?;
    if magnitude == 0 {
        return Err(malformed());
    }

    magnitude
        .checked_mul(unit_millis)
        .ok_or_else(|| InvalidOffsetError::Overflow(token.to_string()))
}

/// A validated reminder lead time, keeping the token it was parsed from
/// so that it can be shown back to users and stored on `ReminderSchedule`s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderOffset {
    token: String,
    millis: i64,
}

impl ReminderOffset {
    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn millis(&self) -> i64 {
        self.millis
    }
}

impl FromStr for ReminderOffset {
    type Err = InvalidOffsetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let millis = parse_offset(s)?;
        Ok(Self {
            token: s.to_string(),
            millis,
        })
    }
}

impl Display for ReminderOffset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.token)
    }
}

impl Serialize for ReminderOffset {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.token)
    }
}

impl<'de> Deserialize<'de> for ReminderOffset {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        token.parse().map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_valid_tokens() {
        let cases = vec![
            ("1m", 60_000),
            ("59m", 59 * 60_000),
            ("1h", 3_600_000),
            ("23h", 23 * 3_600_000),
            ("1d", 86_400_000),
            ("30d", 30 * 86_400_000),
        ];
        for (token, expected) in cases {
            assert_eq!(parse_offset(token), Ok(expected), "token: {}", token);
        }
    }

    #[test]
    fn rejects_invalid_tokens() {
        for token in &["", "abc", "5x", "-5h", "h", "0m", "1.5h", " 1h", "1H"] {
            assert!(parse_offset(token).is_err(), "token: {:?}", token);
        }
    }

    #[test]
    fn rejects_overflowing_tokens() {
        assert_eq!(
            parse_offset("99999999999999999999d"),
            Err(InvalidOffsetError::Overflow("99999999999999999999d".into()))
        );
        assert!(parse_offset("9999999999999999d").is_err());
    }

    #[test]
    fn offset_keeps_its_token() {
        let offset = "15m".parse::<ReminderOffset>().unwrap();
        assert_eq!(offset.token(), "15m");
        assert_eq!(offset.millis(), 15 * 60_000);
        assert_eq!(offset.to_string(), "15m");
    }
}
