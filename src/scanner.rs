//! Document discovery
//!
//! Walks a note tree with an explicit stack of pending directories, so the
//! native call stack stays flat however deep the tree is. Unreadable
//! sub-directories are logged and skipped; only the root can fail the scan.

use std::path::{Path, PathBuf};

use crate::constants as C;
use crate::error::{Error, Result};
use crate::fs::{EntryKind, FileSystem};

/// Which entries the scan yields and which directories it skips
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    /// File name suffix identifying documents
    pub suffix: String,
    /// Directory names never descended into (hidden directories always are)
    pub exclude: Vec<String>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            suffix: C::MARKDOWN_EXTENSION.to_string(),
            exclude: C::DEFAULT_EXCLUDED_DIRS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ScanOptions {
    /// Whether a directory with this name should be descended into
    pub fn should_descend(&self, name: &str) -> bool {
        !name.starts_with(C::HIDDEN_PREFIX) && !self.exclude.iter().any(|e| e == name)
    }

    /// Whether a file with this name is a document
    pub fn is_document(&self, name: &str) -> bool {
        name.ends_with(&self.suffix)
    }
}

/// Result of walking a note tree
#[derive(Debug, Default)]
pub struct DocumentScan {
    /// Canonical root the scan started from
    pub root: PathBuf,
    /// Candidate documents, in traversal order
    pub documents: Vec<PathBuf>,
    /// Sub-directories that could not be listed
    pub errors: Vec<Error>,
}

/// Enumerate every document under `root`
pub fn scan<F: FileSystem + ?Sized>(fs: &F, root: &Path, options: &ScanOptions) -> Result<DocumentScan> {
    let root = fs
        .canonicalize(root)
        .map_err(|_| Error::RootNotFound { path: root.to_path_buf() })?;
    if !fs.is_dir(&root) {
        return Err(Error::RootNotFound { path: root });
    }

    let entries = fs.read_dir(&root).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            Error::RootNotFound { path: root.clone() }
        } else {
            Error::RootUnreadable { path: root.clone(), source }
        }
    })?;

    let mut result = DocumentScan {
        root: root.clone(),
        ..Default::default()
    };
    let mut pending: Vec<PathBuf> = Vec::new();
    visit(entries, options, &mut pending, &mut result.documents);

    while let Some(dir) = pending.pop() {
        match fs.read_dir(&dir) {
            Ok(entries) => visit(entries, options, &mut pending, &mut result.documents),
            Err(source) => {
                tracing::warn!(dir = %dir.display(), error = %source, "skipping unreadable directory");
                result.errors.push(Error::DirectoryRead { path: dir, source });
            }
        }
    }

    tracing::debug!(
        root = %root.display(),
        documents = result.documents.len(),
        skipped = result.errors.len(),
        "scan finished"
    );
    Ok(result)
}

fn visit(
    entries: Vec<crate::fs::Entry>,
    options: &ScanOptions,
    pending: &mut Vec<PathBuf>,
    documents: &mut Vec<PathBuf>,
) {
    for entry in entries {
        match entry.kind {
            EntryKind::Dir if options.should_descend(&entry.name) => pending.push(entry.path),
            EntryKind::Dir => {
                tracing::debug!(dir = %entry.path.display(), "excluded directory");
            }
            EntryKind::File if options.is_document(&entry.name) => documents.push(entry.path),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::memory::MemoryFileSystem;
    use crate::fs::OsFileSystem;
    use std::fs;
    use tempfile::TempDir;

    fn sorted(mut paths: Vec<PathBuf>) -> Vec<PathBuf> {
        paths.sort();
        paths
    }

    #[test]
    fn test_scan_finds_nested_markdown() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("a/b/c")).unwrap();
        fs::write(root.join("top.md"), "top").unwrap();
        fs::write(root.join("a/b/c/deep.md"), "deep").unwrap();
        fs::write(root.join("a/readme.txt"), "not a note").unwrap();

        let result = scan(&OsFileSystem, root, &ScanOptions::default()).unwrap();
        let canonical = dunce::canonicalize(root).unwrap();

        assert_eq!(
            sorted(result.documents),
            vec![canonical.join("a/b/c/deep.md"), canonical.join("top.md")]
        );
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_scan_skips_hidden_and_dependency_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join(".git")).unwrap();
        fs::create_dir_all(root.join("node_modules/pkg")).unwrap();
        fs::create_dir_all(root.join("notes")).unwrap();
        fs::write(root.join(".git/HEAD.md"), "x").unwrap();
        fs::write(root.join("node_modules/pkg/README.md"), "x").unwrap();
        fs::write(root.join("notes/kept.md"), "x").unwrap();

        let result = scan(&OsFileSystem, root, &ScanOptions::default()).unwrap();

        assert_eq!(result.documents.len(), 1);
        assert!(result.documents[0].ends_with("notes/kept.md"));
    }

    #[test]
    fn test_scan_survives_unreadable_subdirectory() {
        let mut fs = MemoryFileSystem::new("/notes");
        fs.add_file("/notes/a.md", "a")
            .deny_dir("/notes/private")
            .add_file("/notes/work/b.md", "b");

        let result = scan(&fs, Path::new("/notes"), &ScanOptions::default()).unwrap();

        assert_eq!(
            sorted(result.documents),
            vec![PathBuf::from("/notes/a.md"), PathBuf::from("/notes/work/b.md")]
        );
        assert_eq!(result.errors.len(), 1);
        assert!(matches!(
            &result.errors[0],
            Error::DirectoryRead { path, .. } if path == Path::new("/notes/private")
        ));
    }

    #[test]
    fn test_scan_missing_root() {
        let fs = MemoryFileSystem::new("/notes");
        let err = scan(&fs, Path::new("/elsewhere"), &ScanOptions::default()).unwrap_err();
        assert!(matches!(err, Error::RootNotFound { .. }));
    }

    #[test]
    fn test_scan_file_as_root() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("a.md");
        fs::write(&file, "# A").unwrap();

        let err = scan(&OsFileSystem, &file, &ScanOptions::default()).unwrap_err();
        assert!(matches!(err, Error::RootNotFound { .. }));

        let mut memory = MemoryFileSystem::new("/notes");
        memory.add_file("/notes/a.md", "a");
        let err = scan(&memory, Path::new("/notes/a.md"), &ScanOptions::default()).unwrap_err();
        assert!(matches!(err, Error::RootNotFound { .. }));
    }

    #[test]
    fn test_scan_unreadable_root_is_fatal() {
        let mut fs = MemoryFileSystem::new("/notes");
        fs.deny_dir("/notes");
        let err = scan(&fs, Path::new("/notes"), &ScanOptions::default()).unwrap_err();
        assert!(matches!(err, Error::RootUnreadable { .. }));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_scan_deep_tree_uses_work_stack() {
        let mut fs = MemoryFileSystem::new("/root");
        let mut dir = PathBuf::from("/root");
        for i in 0..500 {
            dir.push(format!("d{}", i));
        }
        fs.add_file(dir.join("leaf.md"), "leaf");

        let result = scan(&fs, Path::new("/root"), &ScanOptions::default()).unwrap();
        assert_eq!(result.documents, vec![dir.join("leaf.md")]);
    }

    #[test]
    fn test_custom_suffix_and_excludes() {
        let options = ScanOptions {
            suffix: ".markdown".to_string(),
            exclude: vec!["archive".to_string()],
        };
        assert!(options.is_document("a.markdown"));
        assert!(!options.is_document("a.md"));
        assert!(!options.should_descend("archive"));
        assert!(options.should_descend("node_modules"));
        assert!(!options.should_descend(".hidden"));
    }
}
