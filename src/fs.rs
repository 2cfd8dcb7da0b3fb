//! Filesystem read interface used by the scanner and the aggregator
//!
//! The scan only needs to list directories, read whole files and resolve
//! the root, so those three calls form the seam. `OsFileSystem` is the real
//! implementation; tests swap in an in-memory tree to inject failures.

use std::io;
use std::path::{Path, PathBuf};

/// Kind of a directory entry, symlinks are not followed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
    Other,
}

/// A single directory entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// File name (lossy for non UTF-8 names)
    pub name: String,
    /// Full path of the entry
    pub path: PathBuf,
    pub kind: EntryKind,
}

pub trait FileSystem {
    /// List the entries of a directory
    fn read_dir(&self, path: &Path) -> io::Result<Vec<Entry>>;

    /// Read a whole file as UTF-8 text
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Resolve a path to its absolute form
    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf>;

    /// Whether `path` names an existing directory
    fn is_dir(&self, path: &Path) -> bool;
}

/// The host filesystem
#[derive(Debug, Default, Clone, Copy)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn read_dir(&self, path: &Path) -> io::Result<Vec<Entry>> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(path)? {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!(dir = %path.display(), error = %e, "skipping unreadable entry");
                    continue;
                }
            };
            let kind = match entry.file_type() {
                Ok(t) if t.is_dir() => EntryKind::Dir,
                Ok(t) if t.is_file() => EntryKind::File,
                Ok(_) => EntryKind::Other,
                Err(e) => {
                    tracing::warn!(path = %entry.path().display(), error = %e, "cannot inspect entry");
                    continue;
                }
            };
            entries.push(Entry {
                name: entry.file_name().to_string_lossy().into_owned(),
                path: entry.path(),
                kind,
            });
        }
        Ok(entries)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        // dunce avoids the UNC prefix on Windows
        dunce::canonicalize(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }
}
