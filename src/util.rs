//! Path display helpers

use std::path::Path;

/// Display a path with forward slashes (cross-platform standard)
/// Converts Windows backslashes to forward slashes for consistent output
pub fn display_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Display `path` relative to `root` when it lives underneath it
pub fn display_relative(path: &Path, root: &Path) -> String {
    display_path(path.strip_prefix(root).unwrap_or(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_path() {
        assert_eq!(display_path(Path::new("notes/a.md")), "notes/a.md");
    }

    #[test]
    fn test_display_relative() {
        let root = Path::new("/home/user/notes");
        assert_eq!(display_relative(Path::new("/home/user/notes/x/a.md"), root), "x/a.md");
        assert_eq!(display_relative(Path::new("/elsewhere/b.md"), root), "/elsewhere/b.md");
    }
}
