//! Meeting records as the backend stores them.
//!
//! The backend owns every `Meeting`; the client only ever holds copies.
//! `MeetingFields` is the id-less payload sent on create and update.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize};

/// Wire format for dates (`2024-01-10`).
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Wire format for times (`09:00`).
pub const TIME_FORMAT: &str = "%H:%M";

/// Server-assigned meeting identifier.
///
/// Opaque to the client: the backend may hand out numbers or strings, and
/// both are kept as the text that goes into `/api/meetings/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct MeetingId(String);

impl MeetingId {
    pub fn new(id: impl Into<String>) -> Self {
        MeetingId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MeetingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for MeetingId {
    fn from(id: u64) -> Self {
        MeetingId(id.to_string())
    }
}

impl From<&str> for MeetingId {
    fn from(id: &str) -> Self {
        MeetingId(id.to_string())
    }
}

impl FromStr for MeetingId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err("Meeting id cannot be empty".to_string());
        }
        Ok(MeetingId(trimmed.to_string()))
    }
}

impl<'de> Deserialize<'de> for MeetingId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(serde_json::Number),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Number(n) => MeetingId(n.to_string()),
            RawId::Text(s) => MeetingId(s),
        })
    }
}

/// The fixed set of meeting categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MeetingType {
    Academic,
    Business,
    Leisure,
    Sport,
    Social,
    Workshop,
    Training,
}

impl MeetingType {
    /// All types, in the order they are offered to the user.
    pub const ALL: [MeetingType; 7] = [
        MeetingType::Academic,
        MeetingType::Business,
        MeetingType::Leisure,
        MeetingType::Sport,
        MeetingType::Social,
        MeetingType::Workshop,
        MeetingType::Training,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            MeetingType::Academic => "Academic",
            MeetingType::Business => "Business",
            MeetingType::Leisure => "Leisure",
            MeetingType::Sport => "Sport",
            MeetingType::Social => "Social",
            MeetingType::Workshop => "Workshop",
            MeetingType::Training => "Training",
        }
    }
}

impl fmt::Display for MeetingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MeetingType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        MeetingType::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                let available: Vec<_> = MeetingType::ALL.iter().map(|t| t.name()).collect();
                format!(
                    "Unknown meeting type '{}'. Available: {}",
                    wanted,
                    available.join(", ")
                )
            })
    }
}

/// A meeting as returned by `GET /api/meetings`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meeting {
    pub id: MeetingId,
    pub title: String,
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub time: NaiveTime,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(rename = "type")]
    pub kind: MeetingType,
}

impl Meeting {
    pub fn from_fields(id: MeetingId, fields: MeetingFields) -> Self {
        Meeting {
            id,
            title: fields.title,
            date: fields.date,
            time: fields.time,
            description: fields.description,
            kind: fields.kind,
        }
    }

    /// The editable part of this meeting.
    pub fn fields(&self) -> MeetingFields {
        MeetingFields {
            title: self.title.clone(),
            date: self.date,
            time: self.time,
            description: self.description.clone(),
            kind: self.kind,
        }
    }
}

/// One-line card text, e.g. `Standup — 2024-01-10 at 09:00 — Business`.
impl fmt::Display for Meeting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} — {} at {} — {}",
            self.title,
            self.date.format(DATE_FORMAT),
            self.time.format(TIME_FORMAT),
            self.kind
        )
    }
}

/// Request body for `POST /api/meetings` and `PUT /api/meetings/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeetingFields {
    pub title: String,
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub time: NaiveTime,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(rename = "type")]
    pub kind: MeetingType,
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|_| format!("Invalid date '{}'. Expected YYYY-MM-DD", s.trim()))
}

/// Parse an `HH:MM` time. `HH:MM:SS` is accepted too, since some backends
/// echo times back with seconds.
pub fn parse_time(s: &str) -> Result<NaiveTime, String> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .map_err(|_| format!("Invalid time '{}'. Expected HH:MM", s))
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format(super::TIME_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_time(&raw).map_err(serde::de::Error::custom)
    }
}
