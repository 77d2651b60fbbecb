use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One timestamped item inside a notepad.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: u64,
    pub content: String,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

/// A named, game-scoped collection of entries.
///
/// Serialized field order is the on-disk schema order; keep it stable so that a
/// notepad written back from the recycle bin is byte-identical to the original.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notepad {
    pub title: String,
    pub game: String,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub entries: Vec<Entry>,
}

impl Notepad {
    pub fn new(game: impl Into<String>, title: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            title: title.into(),
            game: game.into(),
            created_at: now,
            updated_at: now,
            entries: Vec::new(),
        }
    }

    /// Largest entry id currently held, 0 when empty.
    pub fn max_entry_id(&self) -> u64 {
        self.entries.iter().map(|e| e.id).max().unwrap_or(0)
    }

    /// Appends an entry numbered after both the current maximum and `floor`
    /// (the high-water mark left behind by an earlier notepad at this key).
    pub fn append(&mut self, content: impl Into<String>, now: DateTime<Utc>, floor: u64) -> Entry {
        let entry = Entry {
            id: self.max_entry_id().max(floor) + 1,
            content: content.into(),
            created_at: now,
        };
        self.entries.push(entry.clone());
        self.updated_at = now;
        entry
    }

    pub fn summary(&self) -> NotepadSummary {
        NotepadSummary {
            title: self.title.clone(),
            game: self.game.clone(),
            entry_count: self.entries.len(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Listing row for a notepad.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotepadSummary {
    pub title: String,
    pub game: String,
    pub entry_count: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The destructive operation a snapshot can reverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapshotOperation {
    NotepadDelete,
    GameClear,
    AllClear,
}

/// Everything removed by the most recent delete or clear.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub operation: SnapshotOperation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(with = "timestamp")]
    pub captured_at: DateTime<Utc>,
    pub notepads: Vec<Notepad>,
}

/// Timestamps are written as RFC 3339 in UTC. Older plugin versions wrote
/// local time without an offset, which is still accepted on read.
pub mod timestamp {
    use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        value.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid timestamp: {}", raw)))
    }

    pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").ok()?;
        Local
            .from_local_datetime(&naive)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
    }
}
