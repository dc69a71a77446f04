use anyhow::Result;
use meetings_core::TypeFilter;

use super::{View, load};
use crate::render::render_cards;

pub async fn run(mut view: View, filter: TypeFilter) -> Result<()> {
    load(&mut view).await?;

    view.apply_filter(filter);
    println!("{}", render_cards(view.filtered(), view.filter()));

    Ok(())
}
