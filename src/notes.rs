//! Note aggregation
//!
//! Turns scanned documents into `NoteRecord`s, sorts them, and derives the
//! tag vocabulary. A document that fails to read or parse is logged and left
//! out; it never aborts the rest of the collection.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::constants as C;
use crate::cover::{resolve_cover, CoverRef};
use crate::error::{Error, Result};
use crate::excerpt;
use crate::frontmatter::{self, Metadata};
use crate::fs::FileSystem;
use crate::markdown;
use crate::scanner::{self, ScanOptions};

/// One card per discovered document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteRecord {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover: Option<CoverRef>,
    pub source_path: PathBuf,
    pub base_name: String,
    pub excerpt: String,
    pub tags: Vec<String>,
}

impl NoteRecord {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// File name as shown on the card
    pub fn file_name(&self) -> String {
        self.source_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.base_name.clone())
    }
}

/// Sorted, de-duplicated union of every note's tags
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TagVocabulary(Vec<String>);

impl TagVocabulary {
    pub fn from_notes(notes: &[NoteRecord]) -> Self {
        let tags: BTreeSet<&str> = notes.iter().flat_map(|n| n.tags.iter().map(String::as_str)).collect();
        Self(tags.into_iter().map(str::to_string).collect())
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.binary_search_by(|t| t.as_str().cmp(tag)).is_ok()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Options controlling discovery and summaries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteOptions {
    pub scan: ScanOptions,
    /// Maximum excerpt length in characters, before the ellipsis
    pub excerpt_length: usize,
}

impl Default for NoteOptions {
    fn default() -> Self {
        Self {
            scan: ScanOptions::default(),
            excerpt_length: C::DEFAULT_EXCERPT_LENGTH,
        }
    }
}

/// Every note of one scan, sorted, with its tag vocabulary
#[derive(Debug, Default)]
pub struct NoteCollection {
    pub root: PathBuf,
    pub notes: Vec<NoteRecord>,
    pub tags: TagVocabulary,
    /// Directories and documents that were skipped
    pub errors: Vec<Error>,
}

impl NoteCollection {
    /// Sort notes and compute the vocabulary
    pub fn new(root: PathBuf, mut notes: Vec<NoteRecord>) -> Self {
        sort_notes(&mut notes);
        let tags = TagVocabulary::from_notes(&notes);
        Self {
            root,
            notes,
            tags,
            errors: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

/// Case-insensitive ascending order by base name
pub fn sort_notes(notes: &mut [NoteRecord]) {
    notes.sort_by(|a, b| {
        a.base_name
            .to_lowercase()
            .cmp(&b.base_name.to_lowercase())
            .then_with(|| a.source_path.cmp(&b.source_path))
    });
}

/// Build a record from document text already in memory
pub fn parse_note(path: &Path, content: &str, options: &NoteOptions) -> Result<NoteRecord> {
    let base_name = base_name(path, &options.scan.suffix)?;
    let doc_dir = path.parent().unwrap_or_else(|| Path::new(""));

    let parts = frontmatter::split(content);
    let metadata = match parts.block {
        Some(block) if block.len() > C::MAX_FRONTMATTER_SIZE => {
            tracing::warn!(
                path = %path.display(),
                size = block.len(),
                limit = C::MAX_FRONTMATTER_SIZE,
                "frontmatter too large, ignoring metadata"
            );
            Metadata::default()
        }
        Some(block) => {
            tracing::trace!(path = %path.display(), block, "frontmatter block");
            Metadata::from_block(block)
        }
        None => Metadata::default(),
    };

    let plain = markdown::to_plain_text(parts.body);

    Ok(NoteRecord {
        title: metadata.title.unwrap_or_else(|| base_name.clone()),
        cover: resolve_cover(metadata.cover.as_deref(), doc_dir),
        source_path: path.to_path_buf(),
        base_name,
        excerpt: excerpt::excerpt(&plain, options.excerpt_length),
        tags: metadata.tags,
    })
}

/// Read and parse a single document
pub fn build_note<F: FileSystem + ?Sized>(fs: &F, path: &Path, options: &NoteOptions) -> Result<NoteRecord> {
    let content = fs.read_to_string(path).map_err(|source| Error::DocumentRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_note(path, &content, options)
}

/// Scan `root` and aggregate every readable document
pub fn collect<F: FileSystem + ?Sized>(fs: &F, root: &Path, options: &NoteOptions) -> Result<NoteCollection> {
    let scan = scanner::scan(fs, root, &options.scan)?;

    let mut notes = Vec::with_capacity(scan.documents.len());
    let mut errors = scan.errors;
    for path in &scan.documents {
        match build_note(fs, path, options) {
            Ok(note) => {
                tracing::debug!(path = %path.display(), tags = note.tags.len(), "parsed note");
                notes.push(note);
            }
            Err(e) => {
                tracing::warn!(error = %e, "skipping document");
                errors.push(e);
            }
        }
    }

    let mut collection = NoteCollection::new(scan.root, notes);
    collection.errors = errors;
    tracing::info!(
        notes = collection.len(),
        tags = collection.tags.len(),
        skipped = collection.errors.len(),
        "collected notes"
    );
    Ok(collection)
}

fn base_name(path: &Path, suffix: &str) -> Result<String> {
    let parse_error = |reason: &str| Error::DocumentParse {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    };
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| parse_error("file name is not valid UTF-8"))?;
    let stem = name.strip_suffix(suffix).unwrap_or(name);
    if stem.is_empty() {
        return Err(parse_error("empty file name"));
    }
    Ok(stem.to_string())
}
