use std::fs;
use std::path::Path;

use note_cards::{render_html, FileUriResolver, PreferenceStore, RenderPayload, Result, TagFilter, ThemeState};

use crate::Context;

pub fn run(ctx: &Context, output: Option<&Path>, tag: Option<&str>) -> Result<()> {
    let collection = ctx.collect()?;
    let mut filter = TagFilter::new(collection.tags.clone());
    if let Some(tag) = tag {
        filter.select_tag(tag)?;
    }

    let store = ctx.preference_store()?;
    let theme = ThemeState::init(store.load_theme()?, ctx.config.prefers_dark);
    let payload = RenderPayload::build(&collection, &filter, theme, &FileUriResolver);

    let document = if ctx.json { payload.to_json()? } else { render_html(&payload)? };

    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, document)?;
            tracing::info!(path = %path.display(), notes = collection.len(), "wrote card page");
            println!("Wrote {} notes to {}", collection.len(), path.display());
        }
        None => println!("{}", document),
    }
    super::scan::print_skipped(&collection);
    Ok(())
}
