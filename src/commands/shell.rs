//! Interactive meeting page: the card list plus a form driven by prompts.

use anyhow::Result;
use dialoguer::{Input, Select};
use meetings_core::meeting::{parse_date, parse_time};
use meetings_core::{DraftField, Meeting, MeetingType, TypeFilter};
use owo_colors::OwoColorize;

use super::View;
use crate::render::{Render, pluralize, render_cards};
use crate::utils::tui::with_spinner;

#[derive(Clone, Copy, PartialEq, Eq)]
enum MenuItem {
    Add,
    ResumeEdit,
    CancelEdit,
    Edit,
    Delete,
    Filter,
    Refresh,
    Quit,
}

pub async fn run(mut view: View) -> Result<()> {
    // A failed load leaves the page empty; the notice says why.
    let _ = with_spinner("Loading meetings", view.initialize_load()).await;

    loop {
        print_page(&mut view);

        let items = menu(&view);
        let labels: Vec<String> = items.iter().map(|item| label(*item, &view)).collect();
        let choice = Select::new()
            .with_prompt("  What next?")
            .items(&labels)
            .default(0)
            .interact()?;

        match items[choice] {
            MenuItem::Add | MenuItem::ResumeEdit => {
                fill_form(&mut view)?;
                submit(&mut view).await;
            }
            MenuItem::CancelEdit => view.cancel_edit(),
            MenuItem::Edit => {
                if let Some(meeting) = pick_meeting(&view, "  Edit which meeting?")? {
                    view.begin_edit(&meeting);
                    fill_form(&mut view)?;
                    submit(&mut view).await;
                }
            }
            MenuItem::Delete => {
                if let Some(meeting) = pick_meeting(&view, "  Delete which meeting?")? {
                    let result =
                        with_spinner("Deleting meeting", view.delete_meeting(&meeting.id)).await;
                    if result.is_ok() {
                        println!("{}", format!("  Deleted: {}", meeting.title).red());
                    }
                }
            }
            MenuItem::Filter => choose_filter(&mut view)?,
            MenuItem::Refresh => {
                let _ = with_spinner("Loading meetings", view.refresh()).await;
            }
            MenuItem::Quit => break,
        }
    }

    Ok(())
}

fn print_page(view: &mut View) {
    println!();
    println!("{}", "Meeting Manager".bold());

    let mut status = format!(
        "Filter: {} · {} of {} shown",
        view.filter(),
        view.filtered().len(),
        pluralize(view.collection().len())
    );
    if let Some(synced) = view.last_synced() {
        let local = synced.with_timezone(&chrono::Local);
        status.push_str(&format!(" · synced {}", local.format("%H:%M:%S")));
    }
    println!("{}", status.dimmed());

    if let Some(id) = &view.draft().editing_id {
        println!("{}", format!("Editing meeting [{}]", id).yellow());
    }

    println!();
    println!("{}", render_cards(view.filtered(), view.filter()));

    if let Some(notice) = view.take_notice() {
        println!();
        println!("  {}", notice.render());
    }
    println!();
}

fn menu(view: &View) -> Vec<MenuItem> {
    let mut items = Vec::new();

    if view.is_editing() {
        items.push(MenuItem::ResumeEdit);
        items.push(MenuItem::CancelEdit);
    } else {
        items.push(MenuItem::Add);
    }

    if !view.filtered().is_empty() {
        items.push(MenuItem::Edit);
        items.push(MenuItem::Delete);
    }

    items.extend([MenuItem::Filter, MenuItem::Refresh, MenuItem::Quit]);
    items
}

fn label(item: MenuItem, view: &View) -> String {
    match item {
        MenuItem::Add => "Add meeting".to_string(),
        MenuItem::ResumeEdit => format!("Continue editing \"{}\"", view.draft().title),
        MenuItem::CancelEdit => "Cancel edit".to_string(),
        MenuItem::Edit => "Edit a meeting".to_string(),
        MenuItem::Delete => "Delete a meeting".to_string(),
        MenuItem::Filter => format!("Filter by type ({})", view.filter()),
        MenuItem::Refresh => "Refresh".to_string(),
        MenuItem::Quit => "Quit".to_string(),
    }
}

/// Prompt for every field, pre-filled from the current draft.
fn fill_form(view: &mut View) -> Result<()> {
    let title = prompt_text(view, DraftField::Title, "  Title", |input: &String| {
        if input.trim().is_empty() {
            Err("Title is required".to_string())
        } else {
            Ok(())
        }
    })?;
    view.update_draft_field(DraftField::Title, title);

    let date = prompt_text(view, DraftField::Date, "  Date (YYYY-MM-DD)", |input: &String| {
        parse_date(input).map(|_| ())
    })?;
    view.update_draft_field(DraftField::Date, date);

    let time = prompt_text(view, DraftField::Time, "  Time (HH:MM)", |input: &String| {
        parse_time(input).map(|_| ())
    })?;
    view.update_draft_field(DraftField::Time, time);

    let description: String = Input::new()
        .with_prompt("  Description (skip)")
        .default(view.draft().description.clone())
        .show_default(!view.draft().description.is_empty())
        .allow_empty(true)
        .interact_text()?;
    view.update_draft_field(DraftField::Description, description);

    let names: Vec<&str> = MeetingType::ALL.iter().map(|t| t.name()).collect();
    let current = view
        .draft()
        .kind
        .parse::<MeetingType>()
        .ok()
        .and_then(|kind| MeetingType::ALL.iter().position(|t| *t == kind))
        .unwrap_or(0);
    let selection = Select::new()
        .with_prompt("  Meeting type")
        .items(&names)
        .default(current)
        .interact()?;
    view.update_draft_field(DraftField::Type, MeetingType::ALL[selection].to_string());

    Ok(())
}

fn prompt_text<V>(view: &View, field: DraftField, prompt: &str, validate: V) -> Result<String>
where
    V: FnMut(&String) -> Result<(), String>,
{
    let current = view.draft().get(field).to_string();
    let mut input = Input::<String>::new().with_prompt(prompt).validate_with(validate);
    if !current.is_empty() {
        input = input.default(current);
    }
    Ok(input.interact_text()?)
}

async fn submit(view: &mut View) {
    let message = if view.is_editing() {
        "Updating meeting"
    } else {
        "Creating meeting"
    };

    if let Ok(submitted) = with_spinner(message, view.submit_draft()).await {
        if let Some(meeting) = view.find(submitted.id()) {
            println!("{} {}", "  Saved:".green(), meeting.render());
        }
    }
}

/// Choose one of the cards currently shown.
fn pick_meeting(view: &View, prompt: &str) -> Result<Option<Meeting>> {
    let meetings = view.filtered();
    let mut labels: Vec<String> = meetings.iter().map(|m| m.render()).collect();
    labels.push("Back".to_string());

    let selection = Select::new()
        .with_prompt(prompt)
        .items(&labels)
        .default(0)
        .interact()?;

    Ok(meetings.get(selection).cloned())
}

fn choose_filter(view: &mut View) -> Result<()> {
    let choices = TypeFilter::choices();
    let labels: Vec<String> = choices.iter().map(|c| c.to_string()).collect();
    let current = choices.iter().position(|c| *c == view.filter()).unwrap_or(0);

    let selection = Select::new()
        .with_prompt("  Show")
        .items(&labels)
        .default(current)
        .interact()?;

    view.apply_filter(choices[selection]);
    Ok(())
}
