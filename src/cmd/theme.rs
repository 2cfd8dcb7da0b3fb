use note_cards::{PreferenceStore, Result, Theme, ThemeAction, ThemeState};

use crate::Context;

pub fn run(ctx: &Context, action: Option<ThemeAction>) -> Result<()> {
    let mut store = ctx.preference_store()?;
    let mut state = ThemeState::init(store.load_theme()?, ctx.config.prefers_dark);

    match action {
        None => {}
        Some(ThemeAction::Toggle) => {
            let theme = state.toggle();
            store.save_theme(theme)?;
        }
        Some(ThemeAction::Light) => state = chosen(&mut store, Theme::Light)?,
        Some(ThemeAction::Dark) => state = chosen(&mut store, Theme::Dark)?,
    }

    if ctx.json {
        println!("{}", serde_json::to_string(&state)?);
    } else if state.explicit {
        println!("{}", state.theme);
    } else {
        println!("{} (following system)", state.theme);
    }
    Ok(())
}

fn chosen(store: &mut impl PreferenceStore, theme: Theme) -> Result<ThemeState> {
    store.save_theme(theme)?;
    Ok(ThemeState { theme, explicit: true })
}
