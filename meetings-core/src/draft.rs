//! The edit buffer behind the meeting form.
//!
//! A `Draft` holds field values exactly as typed. Nothing is checked until
//! `to_fields` turns it into a request body at submit time.

use std::fmt;

use crate::error::{MeetingError, MeetingResult};
use crate::meeting::{
    DATE_FORMAT, Meeting, MeetingFields, MeetingId, MeetingType, TIME_FORMAT, parse_date,
    parse_time,
};

/// A form field that `MeetingManager::update_draft_field` can write to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Title,
    Date,
    Time,
    Description,
    Type,
}

impl DraftField {
    pub const ALL: [DraftField; 5] = [
        DraftField::Title,
        DraftField::Date,
        DraftField::Time,
        DraftField::Description,
        DraftField::Type,
    ];

    /// Field name as it appears in the JSON body.
    pub fn name(&self) -> &'static str {
        match self {
            DraftField::Title => "title",
            DraftField::Date => "date",
            DraftField::Time => "time",
            DraftField::Description => "description",
            DraftField::Type => "type",
        }
    }

    pub fn is_required(&self) -> bool {
        !matches!(self, DraftField::Description)
    }
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Uncommitted form state, optionally bound to the meeting being edited.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Draft {
    pub title: String,
    pub date: String,
    pub time: String,
    pub description: String,
    pub kind: String,
    /// Which meeting a submit will update. `None` means submit creates.
    pub editing_id: Option<MeetingId>,
}

impl Draft {
    /// Prime a draft with an existing meeting's values.
    pub fn from_meeting(meeting: &Meeting) -> Self {
        Draft {
            title: meeting.title.clone(),
            date: meeting.date.format(DATE_FORMAT).to_string(),
            time: meeting.time.format(TIME_FORMAT).to_string(),
            description: meeting.description.clone(),
            kind: meeting.kind.to_string(),
            editing_id: Some(meeting.id.clone()),
        }
    }

    pub fn get(&self, field: DraftField) -> &str {
        match field {
            DraftField::Title => &self.title,
            DraftField::Date => &self.date,
            DraftField::Time => &self.time,
            DraftField::Description => &self.description,
            DraftField::Type => &self.kind,
        }
    }

    pub fn set(&mut self, field: DraftField, value: impl Into<String>) {
        let value = value.into();
        match field {
            DraftField::Title => self.title = value,
            DraftField::Date => self.date = value,
            DraftField::Time => self.time = value,
            DraftField::Description => self.description = value,
            DraftField::Type => self.kind = value,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing_id.is_some()
    }

    /// True for a freshly reset draft.
    pub fn is_empty(&self) -> bool {
        *self == Draft::default()
    }

    /// Validate the draft and build the request body.
    ///
    /// Required: title, date, time and type. Date and time must also be
    /// well formed, the same checks a date/time input enforces.
    pub fn to_fields(&self) -> MeetingResult<MeetingFields> {
        let missing: Vec<&str> = DraftField::ALL
            .iter()
            .filter(|field| field.is_required() && self.get(**field).trim().is_empty())
            .map(|field| field.name())
            .collect();

        if !missing.is_empty() {
            return Err(MeetingError::InvalidDraft(format!(
                "missing required {}: {}",
                if missing.len() == 1 { "field" } else { "fields" },
                missing.join(", ")
            )));
        }

        let date = parse_date(&self.date).map_err(MeetingError::InvalidDraft)?;
        let time = parse_time(&self.time).map_err(MeetingError::InvalidDraft)?;
        let kind: MeetingType = self.kind.parse().map_err(MeetingError::InvalidDraft)?;

        Ok(MeetingFields {
            title: self.title.trim().to_string(),
            date,
            time,
            description: self.description.clone(),
            kind,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn filled() -> Draft {
        let mut draft = Draft::default();
        draft.set(DraftField::Title, "Standup");
        draft.set(DraftField::Date, "2024-01-10");
        draft.set(DraftField::Time, "09:00");
        draft.set(DraftField::Type, "Business");
        draft
    }

    #[test]
    fn set_merges_single_field() {
        let mut draft = filled();
        draft.set(DraftField::Title, "Retro");
        assert_eq!(draft.title, "Retro");
        assert_eq!(draft.date, "2024-01-10");
        assert_eq!(draft.get(DraftField::Type), "Business");
    }

    #[test]
    fn to_fields_builds_body() {
        let fields = filled().to_fields().unwrap();
        assert_eq!(fields.title, "Standup");
        assert_eq!(fields.date, NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());
        assert_eq!(fields.time, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        assert_eq!(fields.description, "");
        assert_eq!(fields.kind, MeetingType::Business);
    }

    #[test]
    fn to_fields_lists_missing_required_fields() {
        let mut draft = Draft::default();
        draft.set(DraftField::Description, "only a description");
        let err = draft.to_fields().unwrap_err().to_string();
        assert!(err.contains("missing required fields: title, date, time, type"), "{err}");
    }

    #[test]
    fn blank_title_counts_as_missing() {
        let mut draft = filled();
        draft.set(DraftField::Title, "   ");
        let err = draft.to_fields().unwrap_err().to_string();
        assert!(err.contains("missing required field: title"), "{err}");
    }

    #[test]
    fn malformed_date_is_rejected() {
        let mut draft = filled();
        draft.set(DraftField::Date, "next tuesday");
        assert!(matches!(draft.to_fields(), Err(MeetingError::InvalidDraft(_))));
    }

    #[test]
    fn from_meeting_round_trips_through_to_fields() {
        let meeting = Meeting::from_fields(MeetingId::from(5), filled().to_fields().unwrap());
        let draft = Draft::from_meeting(&meeting);
        assert_eq!(draft.editing_id, Some(MeetingId::from(5)));
        assert_eq!(draft.time, "09:00");
        assert_eq!(draft.to_fields().unwrap(), meeting.fields());
    }

    #[test]
    fn default_draft_is_empty() {
        assert!(Draft::default().is_empty());
        assert!(!filled().is_empty());
    }
}
