//! Serde helpers shared by configuration types

use std::time::Duration;

use serde::{Deserialize, Deserializer, Serializer};

/// `Duration` written as whole milliseconds
///
/// Reads either a millisecond count or a duration string such as `"30s"`
/// or `"1m 30s"` (see [`parse_duration`](crate::time::parse_duration)).
///
/// ```rust
/// use std::time::Duration;
///
/// use cornerstone_common::duration_millis;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Settings {
///     #[serde(with = "duration_millis")]
///     timeout: Duration,
/// }
///
/// let parsed: Settings = serde_json::from_str(r#"{"timeout":"1m 30s"}"#).unwrap();
/// assert_eq!(parsed.timeout, Duration::from_secs(90));
/// ```
pub mod duration_millis {
    use super::*;

    type SerializeResult<S> = Result<<S as Serializer>::Ok, <S as Serializer>::Error>;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum MillisOrText {
        Millis(u64),
        Text(String),
    }

    pub fn serialize<S>(duration: &Duration, serializer: S) -> SerializeResult<S>
    where
        S: Serializer,
    {
        serializer.serialize_u64(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        match MillisOrText::deserialize(deserializer)? {
            MillisOrText::Millis(millis) => Ok(Duration::from_millis(millis)),
            MillisOrText::Text(text) => {
                crate::time::parse_duration(&text).map_err(serde::de::Error::custom)
            }
        }
    }
}
