//! Record types.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

/// An opaque record identifier.
///
/// Ids are issued from a monotonic millisecond clock, so newer records carry
/// larger ids. They are never reused within a collection.
///
/// Serialized as a JSON number. Deserialization also accepts a string of
/// digits, which is how older contact lists stored their ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct RecordId(u64);

impl RecordId {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RecordId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

impl From<u64> for RecordId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

struct RecordIdVisitor;

impl Visitor<'_> for RecordIdVisitor {
    type Value = RecordId;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a non-negative integer or a string of digits")
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<RecordId, E> {
        Ok(RecordId(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<RecordId, E> {
        u64::try_from(value)
            .map(RecordId)
            .map_err(|_| E::invalid_value(de::Unexpected::Signed(value), &self))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<RecordId, E> {
        value
            .parse()
            .map_err(|_| E::invalid_value(de::Unexpected::Str(value), &self))
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(RecordIdVisitor)
    }
}

/// A stored record: an id, the domain fields and bookkeeping timestamps.
///
/// Serialized flat, with the domain fields inlined next to `id`,
/// `createdAt` and `updatedAt`.
///
/// Both timestamps are optional on input. A missing `createdAt` is taken
/// from the id's millisecond value and a missing `updatedAt` from
/// `createdAt`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Record<F> {
    /// Assigned at creation, immutable thereafter.
    pub id: RecordId,

    /// The domain-specific attributes.
    #[serde(flatten)]
    pub fields: F,

    pub created_at: DateTime<Utc>,

    /// Refreshed on every update; never earlier than `created_at`.
    pub updated_at: DateTime<Utc>,
}

/// The on-disk shape of a record, before timestamps are filled in.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredRecord<F> {
    id: RecordId,
    #[serde(flatten)]
    fields: F,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,
}

impl<F> From<StoredRecord<F>> for Record<F> {
    fn from(stored: StoredRecord<F>) -> Self {
        let created_at = stored
            .created_at
            .or_else(|| {
                i64::try_from(stored.id.0)
                    .ok()
                    .and_then(DateTime::<Utc>::from_timestamp_millis)
            })
            .unwrap_or_default();
        let updated_at = stored.updated_at.unwrap_or(created_at).max(created_at);

        Self {
            id: stored.id,
            fields: stored.fields,
            created_at,
            updated_at,
        }
    }
}

impl<'de, F: Deserialize<'de>> Deserialize<'de> for Record<F> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        StoredRecord::deserialize(deserializer).map(Record::from)
    }
}

impl<F> Record<F> {
    /// Check whether the record was edited after creation.
    pub fn is_edited(&self) -> bool {
        self.updated_at > self.created_at
    }
}

/// Issues fresh record ids.
///
/// The next id is the current time in milliseconds, bumped past the last
/// issued (or observed) id when the clock has not advanced.
#[derive(Debug, Clone, Default)]
pub(crate) struct IdGenerator {
    last: u64,
}

impl IdGenerator {
    /// Make sure future ids are greater than `id`.
    pub(crate) fn observe(&mut self, id: RecordId) {
        self.last = self.last.max(id.0);
    }

    pub(crate) fn next(&mut self, now: DateTime<Utc>) -> RecordId {
        let millis = u64::try_from(now.timestamp_millis()).unwrap_or_default();
        self.last = millis.max(self.last.saturating_add(1));
        RecordId(self.last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Note {
        note_text: String,
    }

    #[test]
    fn ids_are_strictly_increasing_within_one_millisecond() {
        let mut ids = IdGenerator::default();
        let now = Utc::now();
        let a = ids.next(now);
        let b = ids.next(now);
        let c = ids.next(now);
        assert!(a < b && b < c);
    }

    #[test]
    fn observed_ids_are_never_reissued() {
        let mut ids = IdGenerator::default();
        let future = RecordId::new(u64::try_from(Utc::now().timestamp_millis()).unwrap() + 10_000);
        ids.observe(future);
        assert!(ids.next(Utc::now()) > future);
    }

    #[test]
    fn record_serializes_flat() {
        let at = DateTime::parse_from_rfc3339("2024-01-01T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let record = Record {
            id: RecordId::new(7),
            fields: Note {
                note_text: "hello".to_string(),
            },
            created_at: at,
            updated_at: at,
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["id"], json!(7));
        assert_eq!(value["noteText"], json!("hello"));
        assert_eq!(value["createdAt"], json!("2024-01-01T10:00:00Z"));

        let back: Record<Note> = serde_json::from_value(value).unwrap();
        assert_eq!(back, record);
        assert!(!back.is_edited());
    }

    #[test]
    fn missing_timestamps_are_filled_in() {
        let only_created: Record<Note> = serde_json::from_value(json!({
            "id": 1704067200000u64,
            "noteText": "a",
            "createdAt": "2024-01-01T09:00:00.000Z",
        }))
        .unwrap();
        assert_eq!(only_created.updated_at, only_created.created_at);
        assert!(!only_created.is_edited());

        let bare: Record<Note> = serde_json::from_value(json!({
            "id": "1704067200000",
            "noteText": "b",
        }))
        .unwrap();
        assert_eq!(bare.id, RecordId::new(1_704_067_200_000));
        assert_eq!(bare.created_at.timestamp_millis(), 1_704_067_200_000);
        assert_eq!(bare.updated_at, bare.created_at);
    }

    #[test]
    fn record_id_accepts_numbers_and_digit_strings() {
        let from_number: RecordId = serde_json::from_value(json!(42)).unwrap();
        let from_string: RecordId = serde_json::from_value(json!("42")).unwrap();
        assert_eq!(from_number, from_string);
        assert_eq!(serde_json::to_value(from_string).unwrap(), json!(42));

        assert!(serde_json::from_value::<RecordId>(json!("abc")).is_err());
        assert!(serde_json::from_value::<RecordId>(json!(-1)).is_err());
    }

    #[test]
    fn parse_record_id() {
        assert_eq!(" 123 ".parse::<RecordId>().unwrap(), RecordId::new(123));
        assert!("abc".parse::<RecordId>().is_err());
    }
}
