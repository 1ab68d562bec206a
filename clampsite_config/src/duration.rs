use std::{ops::Deref, str::FromStr};

use serde::Deserialize;
use thiserror::Error;

/// A duration written in the compact `"1h 2m 3s"` notation. Every
/// whitespace separated part is a number followed by one of the units `s`,
/// `m`, `h` or `d`. An empty string is a zero duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Duration(pub std::time::Duration);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid duration: {0:?}")]
pub struct InvalidDuration(String);

impl From<Duration> for std::time::Duration {
    fn from(value: Duration) -> Self {
        value.0
    }
}

impl Deref for Duration {
    type Target = std::time::Duration;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromStr for Duration {
    type Err = InvalidDuration;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split_whitespace()
            .try_fold(std::time::Duration::ZERO, |total, part| {
                parse_part(part)
                    .and_then(|seconds| total.checked_add(std::time::Duration::from_secs(seconds)))
                    .ok_or_else(|| InvalidDuration(part.into()))
            })
            .map(Self)
    }
}

fn parse_part(part: &str) -> Option<u64> {
    let split = part.len().checked_sub(1)?;
    let (value, unit) = part.split_at_checked(split)?;
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let factor = match unit {
        "s" => 1,
        "m" => 60,
        "h" => 60 * 60,
        "d" => 24 * 60 * 60,
        _ => return None,
    };
    value.parse::<u64>().ok()?.checked_mul(factor)
}

impl<'de> Deserialize<'de> for Duration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        String::deserialize(deserializer)?
            .parse()
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_duration() {
        for (input, expected) in [
            ("13s", Some(13)),
            ("42m", Some(42 * 60)),
            ("7h", Some(7 * 60 * 60)),
            ("20d", Some(20 * 24 * 60 * 60)),
            ("", Some(0)),
            ("1m 30s", Some(90)),
            ("1d 2h 3m 4s", Some(((24 + 2) * 60 + 3) * 60 + 4)),
            ("xyz", None),
            ("7dd", None),
            ("s", None),
            ("10", None),
            ("-3s", None),
            ("18446744073709551615s", Some(u64::MAX)),
            ("18446744073709551615s 1s", None),
            ("18446744073709551615m", None),
        ] {
            let input = serde_json::Value::String(input.into());
            let output = serde_json::from_value::<Duration>(input)
                .ok()
                .map(|x| x.as_secs());
            assert_eq!(output, expected);
        }
    }

    #[test]
    fn error_names_the_offending_part() {
        let err = "1m 3x".parse::<Duration>().unwrap_err();
        assert_eq!(err.to_string(), r#"Invalid duration: "3x""#);
    }
}
