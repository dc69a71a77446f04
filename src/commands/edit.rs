use anyhow::{Context, Result};
use meetings_core::MeetingId;
use owo_colors::OwoColorize;

use super::{FieldArgs, View, load, print_notice};
use crate::render::Render;
use crate::utils::tui::with_spinner;

pub async fn run(mut view: View, id: MeetingId, fields: FieldArgs) -> Result<()> {
    if fields.is_empty() {
        anyhow::bail!(
            "Nothing to change.\n\n\
            Pass at least one of --title, --date, --time, --description or --type, e.g.:\n  \
            meetings edit {} --type Academic",
            id
        );
    }

    load(&mut view).await?;

    view.begin_edit_by_id(&id)
        .with_context(|| format!("Meeting {} is not on the server", id))?;
    fields.apply(&mut view);

    let result = with_spinner("Updating meeting", view.submit_draft()).await;
    result.context("Failed to update meeting")?;
    print_notice(&mut view);

    match view.find(&id) {
        Some(meeting) => println!("{} {}", "  Updated:".yellow(), meeting.render()),
        None => println!("{}", format!("  Updated meeting {}", id).yellow()),
    }

    Ok(())
}
