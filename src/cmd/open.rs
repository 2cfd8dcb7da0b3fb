use std::path::Path;

use note_cards::{dispatch, EditorHost, Result, SurfaceMessage};

pub fn run(path: &Path) -> Result<()> {
    let message = SurfaceMessage::OpenNote {
        file_path: path.to_path_buf(),
    };
    dispatch(&mut EditorHost::from_env(), message)
}
