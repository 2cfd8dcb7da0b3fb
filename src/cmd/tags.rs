use note_cards::Result;

use crate::Context;

pub fn run(ctx: &Context) -> Result<()> {
    let collection = ctx.collect()?;

    if ctx.json {
        println!("{}", serde_json::to_string(&collection.tags)?);
    } else if collection.tags.is_empty() {
        println!("(no tags)");
    } else {
        for tag in collection.tags.iter() {
            println!("{}", tag);
        }
    }
    Ok(())
}
