pub mod add;
pub mod delete;
pub mod edit;
pub mod list;
pub mod shell;

use anyhow::{Context, Result};
use clap::Args;
use meetings_core::{DraftField, HttpStore, MeetingManager, MeetingType};

use crate::render::Render;
use crate::utils::tui::with_spinner;

pub type View = MeetingManager<HttpStore>;

/// Meeting fields given on the command line. Absent flags leave the draft
/// untouched.
#[derive(Args, Debug, Default)]
pub struct FieldArgs {
    /// Meeting title
    #[arg(long)]
    pub title: Option<String>,

    /// Date (YYYY-MM-DD)
    #[arg(short, long)]
    pub date: Option<String>,

    /// Time of day (HH:MM)
    #[arg(long)]
    pub time: Option<String>,

    /// Free-text description
    #[arg(long)]
    pub description: Option<String>,

    /// Meeting type (Academic, Business, Leisure, Sport, Social, Workshop, Training)
    #[arg(short = 't', long = "type")]
    pub kind: Option<MeetingType>,
}

impl FieldArgs {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.date.is_none()
            && self.time.is_none()
            && self.description.is_none()
            && self.kind.is_none()
    }

    /// Merge every given flag into the view's draft.
    pub fn apply(self, view: &mut View) {
        let values = [
            (DraftField::Title, self.title),
            (DraftField::Date, self.date),
            (DraftField::Time, self.time),
            (DraftField::Description, self.description),
            (DraftField::Type, self.kind.map(|k| k.to_string())),
        ];

        for (field, value) in values {
            if let Some(value) = value {
                view.update_draft_field(field, value);
            }
        }
    }
}

/// Initial load for the one-shot commands; a failure aborts the command.
/// A successful load can still carry a notice about skipped rows.
pub async fn load(view: &mut View) -> Result<()> {
    match with_spinner("Loading meetings", view.initialize_load()).await {
        Ok(()) => {
            print_notice(view);
            Ok(())
        }
        Err(err) => {
            view.take_notice();
            Err(err).context("Failed to load meetings")
        }
    }
}

/// Print a pending notice, e.g. a reload that failed after a successful submit.
pub fn print_notice(view: &mut View) {
    if let Some(notice) = view.take_notice() {
        eprintln!("  {}", notice.render());
    }
}
