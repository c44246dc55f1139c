//! Serde helpers for human-readable durations in configuration.

use serde::de::{self, Visitor};
use serde::{Deserializer, Serializer};
use std::{fmt, time::Duration};

/// Duration as a humantime string (`"3s"`, `"1m30s"`) or a plain number of seconds
pub mod duration {
    use super::*;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let duration_str = humantime::format_duration(*duration).to_string();
        serializer.serialize_str(&duration_str)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct DurationVisitor;

        impl<'de> Visitor<'de> for DurationVisitor {
            type Value = Duration;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str(
                    "a duration as seconds (number) or human-readable string (e.g., '3s', '500ms', '1m')",
                )
            }

            fn visit_u64<E>(self, seconds: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(Duration::from_secs(seconds))
            }

            fn visit_i64<E>(self, seconds: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                u64::try_from(seconds)
                    .map(Duration::from_secs)
                    .map_err(|_| de::Error::custom(format!("Negative duration: {seconds}")))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                humantime::parse_duration(value)
                    .map_err(|e| de::Error::custom(format!("Invalid duration '{value}': {e}")))
            }
        }

        deserializer.deserialize_any(DurationVisitor)
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};
    use std::time::Duration;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Timeouts {
        #[serde(with = "super::duration")]
        fetch: Duration,
    }

    #[test]
    fn test_parse_human_readable() {
        let parsed: Timeouts = serde_json::from_str(r#"{"fetch": "1m30s"}"#).unwrap();
        assert_eq!(parsed.fetch, Duration::from_secs(90));

        let parsed: Timeouts = serde_json::from_str(r#"{"fetch": "250ms"}"#).unwrap();
        assert_eq!(parsed.fetch, Duration::from_millis(250));
    }

    #[test]
    fn test_parse_seconds() {
        let parsed: Timeouts = serde_json::from_str(r#"{"fetch": 3}"#).unwrap();
        assert_eq!(parsed.fetch, Duration::from_secs(3));
    }

    #[test]
    fn test_invalid_duration() {
        let result: Result<Timeouts, _> = serde_json::from_str(r#"{"fetch": "soon"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_serialize_human_readable() {
        let json = serde_json::to_string(&Timeouts {
            fetch: Duration::from_secs(3),
        })
        .unwrap();
        assert_eq!(json, r#"{"fetch":"3s"}"#);
    }
}
