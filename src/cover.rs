//! Cover image references

use std::fmt;
use std::path::{Component, Path, PathBuf};

use serde::{Serialize, Serializer};

/// A normalized cover reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoverRef {
    /// Absolute path on the local filesystem
    Local(PathBuf),
    /// `http://` or `https://` URL, passed through untouched
    Remote(String),
    /// `data:` URI, passed through untouched
    Inline(String),
}

impl fmt::Display for CoverRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoverRef::Local(path) => write!(f, "{}", crate::util::display_path(path)),
            CoverRef::Remote(s) | CoverRef::Inline(s) => f.write_str(s),
        }
    }
}

impl Serialize for CoverRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

fn has_prefix_ignore_case(value: &str, prefix: &str) -> bool {
    value
        .get(..prefix.len())
        .map(|head| head.eq_ignore_ascii_case(prefix))
        .unwrap_or(false)
}

/// Whether a cover value points at a remote or inline resource
pub fn is_external(value: &str) -> bool {
    has_prefix_ignore_case(value, "http://")
        || has_prefix_ignore_case(value, "https://")
        || has_prefix_ignore_case(value, "data:")
}

/// Normalize a raw cover value relative to the document's directory
pub fn resolve_cover(raw: Option<&str>, doc_dir: &Path) -> Option<CoverRef> {
    let raw = raw?;
    if has_prefix_ignore_case(raw, "data:") {
        return Some(CoverRef::Inline(raw.to_string()));
    }
    if is_external(raw) {
        return Some(CoverRef::Remote(raw.to_string()));
    }
    let resolved = normalize(&doc_dir.join(raw));
    tracing::trace!(cover = raw, resolved = %resolved.display(), "resolved local cover");
    Some(CoverRef::Local(resolved))
}

/// Fold `.` and `..` components without touching the filesystem
fn normalize(path: &Path) -> PathBuf {
    let mut result = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // Never pop past the root
                if !matches!(result.components().next_back(), Some(Component::RootDir | Component::Prefix(_)) | None) {
                    result.pop();
                }
            }
            other => result.push(other.as_os_str()),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_cover_unchanged() {
        let cover = resolve_cover(Some("https://x/y.png"), Path::new("/any/dir"));
        assert_eq!(cover, Some(CoverRef::Remote("https://x/y.png".to_string())));

        let cover = resolve_cover(Some("HTTP://x/y.png"), Path::new("/any/dir"));
        assert_eq!(cover, Some(CoverRef::Remote("HTTP://x/y.png".to_string())));
    }

    #[test]
    fn test_data_uri_unchanged() {
        let uri = "data:image/png;base64,iVBORw0KGgo=";
        assert_eq!(
            resolve_cover(Some(uri), Path::new("/notes")),
            Some(CoverRef::Inline(uri.to_string()))
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_relative_cover_resolved() {
        let cover = resolve_cover(Some("img/a.png"), Path::new("/notes/x"));
        assert_eq!(cover, Some(CoverRef::Local(PathBuf::from("/notes/x/img/a.png"))));
    }

    #[cfg(unix)]
    #[test]
    fn test_relative_cover_with_dot_segments() {
        let cover = resolve_cover(Some("./../assets/./b.png"), Path::new("/notes/x"));
        assert_eq!(cover, Some(CoverRef::Local(PathBuf::from("/notes/assets/b.png"))));

        let cover = resolve_cover(Some("../../../../c.png"), Path::new("/notes/x"));
        assert_eq!(cover, Some(CoverRef::Local(PathBuf::from("/c.png"))));
    }

    #[cfg(unix)]
    #[test]
    fn test_absolute_cover_kept() {
        let cover = resolve_cover(Some("/srv/img/c.png"), Path::new("/notes/x"));
        assert_eq!(cover, Some(CoverRef::Local(PathBuf::from("/srv/img/c.png"))));
    }

    #[test]
    fn test_absent_cover() {
        assert_eq!(resolve_cover(None, Path::new("/notes")), None);
    }

    #[test]
    fn test_short_values_are_local() {
        assert!(!is_external("ht"));
        assert!(!is_external("img/http://a.png"));
    }

    #[cfg(unix)]
    #[test]
    fn test_serializes_as_plain_string() {
        let local = CoverRef::Local(PathBuf::from("/notes/a.png"));
        assert_eq!(serde_json::to_string(&local).unwrap(), "\"/notes/a.png\"");
        let remote = CoverRef::Remote("https://x/y.png".to_string());
        assert_eq!(serde_json::to_string(&remote).unwrap(), "\"https://x/y.png\"");
    }
}
