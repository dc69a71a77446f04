use anyhow::{Context, Result};
use meetings_core::MeetingId;
use owo_colors::OwoColorize;

use super::{View, load};
use crate::utils::tui::with_spinner;

pub async fn run(mut view: View, id: MeetingId) -> Result<()> {
    load(&mut view).await?;

    let title = view.find(&id).map(|m| m.title.clone());

    let result = with_spinner("Deleting meeting", view.delete_meeting(&id)).await;
    result.with_context(|| format!("Failed to delete meeting {}", id))?;

    let label = title.unwrap_or_else(|| format!("meeting {}", id));
    println!("{}", format!("  Deleted: {}", label).red());

    Ok(())
}
