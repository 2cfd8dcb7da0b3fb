use note_cards::{NoteRecord, Result, TagFilter};

use crate::Context;

pub fn run(ctx: &Context, tag: &str) -> Result<()> {
    let collection = ctx.collect()?;
    let mut filter = TagFilter::new(collection.tags.clone());
    filter.select_tag(tag)?;

    let visible: Vec<&NoteRecord> = collection.notes.iter().filter(|n| filter.is_visible(n)).collect();
    let count = filter.count(&collection.notes);

    if ctx.json {
        let output = serde_json::json!({
            "activeTag": filter.active(),
            "count": count,
            "label": count.to_string(),
            "notes": visible,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Notes: {}", count);
    for note in visible {
        super::scan::print_note(note, &collection.root);
    }
    super::scan::print_skipped(&collection);
    Ok(())
}
