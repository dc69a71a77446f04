//! Type filter for the meeting list.

use std::fmt;
use std::str::FromStr;

use crate::meeting::{Meeting, MeetingType};

/// Which meetings the filtered view shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Only(MeetingType),
}

impl TypeFilter {
    /// `All` first, then every meeting type.
    pub fn choices() -> Vec<TypeFilter> {
        std::iter::once(TypeFilter::All)
            .chain(MeetingType::ALL.into_iter().map(TypeFilter::Only))
            .collect()
    }

    pub fn matches(&self, meeting: &Meeting) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Only(kind) => meeting.kind == *kind,
        }
    }

    /// Project `collection` through this filter, keeping relative order.
    pub fn apply(&self, collection: &[Meeting]) -> Vec<Meeting> {
        collection
            .iter()
            .filter(|meeting| self.matches(meeting))
            .cloned()
            .collect()
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeFilter::All => f.write_str("All"),
            TypeFilter::Only(kind) => write!(f, "{kind}"),
        }
    }
}

impl FromStr for TypeFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(TypeFilter::All);
        }
        s.parse::<MeetingType>().map(TypeFilter::Only)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meeting::MeetingId;
    use chrono::{NaiveDate, NaiveTime};

    fn meeting(id: u64, kind: MeetingType) -> Meeting {
        Meeting {
            id: MeetingId::from(id),
            title: format!("Meeting {id}"),
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            description: String::new(),
            kind,
        }
    }

    fn sample() -> Vec<Meeting> {
        vec![
            meeting(1, MeetingType::Business),
            meeting(2, MeetingType::Sport),
            meeting(3, MeetingType::Business),
            meeting(4, MeetingType::Academic),
            meeting(5, MeetingType::Business),
        ]
    }

    fn ids(meetings: &[Meeting]) -> Vec<&str> {
        meetings.iter().map(|m| m.id.as_str()).collect()
    }

    #[test]
    fn only_keeps_matching_in_order() {
        let filtered = TypeFilter::Only(MeetingType::Business).apply(&sample());
        assert_eq!(ids(&filtered), vec!["1", "3", "5"]);
    }

    #[test]
    fn every_type_yields_exact_subset() {
        let collection = sample();
        for kind in MeetingType::ALL {
            let filtered = TypeFilter::Only(kind).apply(&collection);
            let expected: Vec<_> = collection.iter().filter(|m| m.kind == kind).cloned().collect();
            assert_eq!(filtered, expected, "filter {kind}");
        }
    }

    #[test]
    fn all_is_identity() {
        let collection = sample();
        assert_eq!(TypeFilter::All.apply(&collection), collection);
    }

    #[test]
    fn type_with_no_meetings_is_empty() {
        assert!(TypeFilter::Only(MeetingType::Leisure).apply(&sample()).is_empty());
    }

    #[test]
    fn parses_all_and_type_names() {
        assert_eq!("All".parse::<TypeFilter>(), Ok(TypeFilter::All));
        assert_eq!("all".parse::<TypeFilter>(), Ok(TypeFilter::All));
        assert_eq!(
            "Training".parse::<TypeFilter>(),
            Ok(TypeFilter::Only(MeetingType::Training))
        );
        assert!("Nope".parse::<TypeFilter>().is_err());
    }

    #[test]
    fn choices_start_with_all() {
        let choices = TypeFilter::choices();
        assert_eq!(choices.len(), 8);
        assert_eq!(choices[0], TypeFilter::All);
        assert_eq!(choices[1].to_string(), "Academic");
    }
}
