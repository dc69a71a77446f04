use anyhow::{Context, Result};
use owo_colors::OwoColorize;

use super::{FieldArgs, View, print_notice};
use crate::render::Render;
use crate::utils::tui::with_spinner;

pub async fn run(mut view: View, fields: FieldArgs) -> Result<()> {
    fields.apply(&mut view);

    let result = with_spinner("Creating meeting", view.submit_draft()).await;
    let submitted = result.context("Failed to create meeting")?;
    print_notice(&mut view);

    match view.find(submitted.id()) {
        Some(meeting) => println!("{} {}", "  Created:".green(), meeting.render()),
        None => println!("{}", format!("  Created meeting {}", submitted.id()).green()),
    }

    Ok(())
}
