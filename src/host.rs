//! Messages from the card surface and the host that answers them
//!
//! The surface only ever asks for two things: open a note, or show a
//! message. Both arrive as JSON objects tagged by `command`.

use std::path::{Path, PathBuf};
use std::process::Command;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum SurfaceMessage {
    OpenNote {
        #[serde(rename = "filePath")]
        file_path: PathBuf,
    },
    Alert {
        text: String,
    },
}

impl SurfaceMessage {
    pub fn parse(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Environment the surface runs inside
pub trait Host {
    fn open_document(&mut self, path: &Path) -> Result<()>;
    fn notify(&mut self, message: &str);
}

/// Route one message to the host
///
/// A failed open is reported through [`Host::notify`] and then returned.
pub fn dispatch<H: Host + ?Sized>(host: &mut H, message: SurfaceMessage) -> Result<()> {
    match message {
        SurfaceMessage::OpenNote { file_path } => {
            tracing::debug!(path = %file_path.display(), "open requested");
            if let Err(e) = host.open_document(&file_path) {
                host.notify(&format!("Failed to open note: {}", e));
                return Err(e);
            }
            Ok(())
        }
        SurfaceMessage::Alert { text } => {
            host.notify(&text);
            Ok(())
        }
    }
}

/// Opens documents with `$VISUAL`, `$EDITOR` or the platform opener
#[derive(Debug, Clone, Default)]
pub struct EditorHost {
    editor: Option<String>,
}

impl EditorHost {
    pub fn new(editor: Option<String>) -> Self {
        Self { editor }
    }

    pub fn from_env() -> Self {
        let editor = ["VISUAL", "EDITOR"]
            .iter()
            .filter_map(|key| std::env::var(key).ok())
            .find(|value| !value.trim().is_empty());
        Self { editor }
    }

    fn command(&self, path: &Path) -> Command {
        match self.editor.as_deref() {
            Some(editor) => {
                // Editors are often configured with flags, e.g. "code -w"
                let mut parts = editor.split_whitespace();
                let mut cmd = Command::new(parts.next().unwrap_or(editor));
                cmd.args(parts).arg(path);
                cmd
            }
            None => platform_opener(path),
        }
    }
}

#[cfg(target_os = "macos")]
fn platform_opener(path: &Path) -> Command {
    let mut cmd = Command::new("open");
    cmd.arg(path);
    cmd
}

#[cfg(windows)]
fn platform_opener(path: &Path) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.args(["/C", "start", ""]).arg(path);
    cmd
}

#[cfg(not(any(target_os = "macos", windows)))]
fn platform_opener(path: &Path) -> Command {
    let mut cmd = Command::new("xdg-open");
    cmd.arg(path);
    cmd
}

impl Host for EditorHost {
    fn open_document(&mut self, path: &Path) -> Result<()> {
        let open_error = |reason: String| Error::Open {
            path: path.to_path_buf(),
            reason,
        };
        if !path.is_file() {
            return Err(open_error("no such document".to_string()));
        }

        let status = self.command(path).status().map_err(|e| open_error(e.to_string()))?;
        if !status.success() {
            return Err(open_error(format!("editor exited with {}", status)));
        }
        tracing::info!(path = %path.display(), "opened note");
        Ok(())
    }

    fn notify(&mut self, message: &str) {
        tracing::info!(message, "surface notification");
        println!("{}", message);
    }
}
