use note_cards::{dispatch, EditorHost, Result, SurfaceMessage};

pub fn run(json: &str) -> Result<()> {
    let message = SurfaceMessage::parse(json)?;
    dispatch(&mut EditorHost::from_env(), message)
}
