use std::path::Path;

use note_cards::util;
use note_cards::{NoteCollection, NoteRecord, Result};

use crate::Context;

pub fn run(ctx: &Context) -> Result<()> {
    let collection = ctx.collect()?;

    if ctx.json {
        let skipped: Vec<String> = collection.errors.iter().map(|e| e.to_string()).collect();
        let output = serde_json::json!({
            "root": util::display_path(&collection.root),
            "notes": collection.notes,
            "skipped": skipped,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if collection.is_empty() {
        println!("No notes found in {}", util::display_path(&collection.root));
    }
    for note in &collection.notes {
        print_note(note, &collection.root);
    }
    print_skipped(&collection);
    Ok(())
}

/// Two-line listing: title with tags, then path and excerpt
pub fn print_note(note: &NoteRecord, root: &Path) {
    let tags: String = note.tags.iter().map(|t| format!(" #{}", t)).collect();
    println!("{}{}", note.title, tags);
    println!("    {}: {}", util::display_relative(&note.source_path, root), one_line(&note.excerpt));
}

pub fn print_skipped(collection: &NoteCollection) {
    for error in &collection.errors {
        eprintln!("skipped: {}", error);
    }
}

fn one_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
