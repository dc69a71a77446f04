//! TUI rendering traits for meeting types.
//!
//! This module provides extension traits that add colored terminal rendering
//! to meetings-core types using owo_colors.

use meetings_core::meeting::{DATE_FORMAT, TIME_FORMAT};
use meetings_core::{Meeting, MeetingType, Notice, TypeFilter};
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for MeetingType {
    fn render(&self) -> String {
        let name = self.name();
        match self {
            MeetingType::Academic => name.blue().to_string(),
            MeetingType::Business => name.cyan().to_string(),
            MeetingType::Leisure => name.green().to_string(),
            MeetingType::Sport => name.yellow().to_string(),
            MeetingType::Social => name.magenta().to_string(),
            MeetingType::Workshop => name.bright_blue().to_string(),
            MeetingType::Training => name.bright_magenta().to_string(),
        }
    }
}

/// One-line card: `Standup — 2024-01-10 at 09:00 — Business [1]`
impl Render for Meeting {
    fn render(&self) -> String {
        let when = format!(
            "{} at {}",
            self.date.format(DATE_FORMAT),
            self.time.format(TIME_FORMAT)
        );
        let id_tag = format!("[{}]", self.id);

        format!(
            "{} — {} — {} {}",
            self.title.bold(),
            when,
            self.kind.render(),
            id_tag.dimmed()
        )
    }
}

impl Render for Notice {
    fn render(&self) -> String {
        self.to_string().red().to_string()
    }
}

/// Render the card list, one meeting per block with its description
/// underneath.
pub fn render_cards(meetings: &[Meeting], filter: TypeFilter) -> String {
    if meetings.is_empty() {
        let label = match filter {
            TypeFilter::All => "No meetings".to_string(),
            TypeFilter::Only(kind) => format!("No {} meetings", kind),
        };
        return format!("   {}", label.dimmed());
    }

    let mut lines = Vec::new();
    for meeting in meetings {
        lines.push(format!("   {}", meeting.render()));
        if !meeting.description.is_empty() {
            lines.push(format!("      {}", meeting.description.dimmed()));
        }
    }

    lines.join("\n")
}

/// Simple pluralization helper
pub fn pluralize(count: usize) -> String {
    if count == 1 {
        "1 meeting".to_string()
    } else {
        format!("{} meetings", count)
    }
}
