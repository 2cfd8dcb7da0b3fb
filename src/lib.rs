pub mod cli;
pub mod config;
pub mod constants;
pub mod cover;
pub mod error;
pub mod excerpt;
pub mod filter;
pub mod frontmatter;
pub mod fs;
pub mod host;
pub mod markdown;
pub mod notes;
pub mod render;
pub mod scanner;
pub mod theme;
pub mod util;

pub use cli::{Cli, Command, ThemeAction};
pub use config::Config;
pub use cover::CoverRef;
pub use error::{Error, Result};
pub use filter::{ActiveTag, FilterState, NoteCount, TagControl, TagFilter};
pub use fs::{FileSystem, OsFileSystem};
pub use host::{dispatch, EditorHost, Host, SurfaceMessage};
pub use notes::{collect, NoteCollection, NoteOptions, NoteRecord, TagVocabulary};
pub use render::{render_html, FileUriResolver, RenderPayload, ResourceResolver};
pub use theme::{JsonPreferenceStore, PreferenceStore, Theme, ThemeState};

/// Scan `root` on the local filesystem
pub fn collect_notes(root: &std::path::Path, options: &NoteOptions) -> Result<NoteCollection> {
    collect(&OsFileSystem, root, options)
}
