use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// ISO-8601 timestamp that keeps the exact text it was read from.
///
/// Accepts RFC 3339 (`2025-01-15T10:30:00.123456Z`) and offset-less local
/// forms (`2025-01-15T10:30:00.123456`, read as UTC). Serializes back to the
/// original text, so re-saving a loaded file does not rewrite timestamps.
/// Ordering and equality use the instant, not the text.
#[derive(Clone, Debug)]
pub struct Timestamp {
    instant: DateTime<Utc>,
    text: String,
}

impl Timestamp {
    /// Current time at microsecond precision, written as RFC 3339 UTC.
    pub fn now() -> Self {
        let now = Utc::now();
        let text = now.to_rfc3339_opts(SecondsFormat::Micros, true);
        // re-parse so the instant carries the same precision as the text
        Self::parse(&text).unwrap_or_else(|| Self { instant: now, text })
    }

    pub fn parse(text: &str) -> Option<Self> {
        let instant = DateTime::parse_from_rfc3339(text)
            .map(|d| d.with_timezone(&Utc))
            .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f").map(|n| n.and_utc()))
            .ok()?;
        Some(Self { instant, text: text.to_string() })
    }

    pub fn instant(&self) -> DateTime<Utc> {
        self.instant
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl PartialEq for Timestamp {
    fn eq(&self, other: &Self) -> bool {
        self.instant == other.instant
    }
}

impl Eq for Timestamp {}

impl PartialOrd for Timestamp {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Timestamp {
    fn cmp(&self, other: &Self) -> Ordering {
        self.instant.cmp(&other.instant)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Timestamp::parse(&text)
            .ok_or_else(|| de::Error::custom(format!("invalid ISO-8601 timestamp: {text}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_offset_less_and_rfc3339() {
        let naive = Timestamp::parse("2025-01-15T10:30:00.123456").expect("naive");
        let zulu = Timestamp::parse("2025-01-15T10:30:00.123456Z").expect("rfc3339");
        let offset = Timestamp::parse("2025-01-15T12:30:00.123456+02:00").expect("offset");
        assert_eq!(naive, zulu);
        assert_eq!(zulu, offset);
        assert_eq!(naive.as_str(), "2025-01-15T10:30:00.123456");

        assert!(Timestamp::parse("2025-01-15T10:30:00").is_some());
        assert!(Timestamp::parse("yesterday").is_none());
    }

    #[test]
    fn serializes_original_text() {
        let ts: Timestamp = serde_json::from_str("\"2025-01-15T10:30:00.123456\"").unwrap();
        assert_eq!(serde_json::to_string(&ts).unwrap(), "\"2025-01-15T10:30:00.123456\"");
        assert!(serde_json::from_str::<Timestamp>("\"not a time\"").is_err());
    }

    #[test]
    fn now_round_trips_and_orders() {
        let a = Timestamp::now();
        let back: Timestamp = serde_json::from_str(&serde_json::to_string(&a).unwrap()).unwrap();
        assert_eq!(back, a);
        assert!(a.as_str().ends_with('Z'));

        let old = Timestamp::parse("2025-01-15T10:30:00.123456").unwrap();
        assert!(old < a);
    }
}
