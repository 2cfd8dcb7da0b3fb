//! Tag filter state for the card view
//!
//! Pure state plus transitions; no rendering, no I/O. Event handlers on
//! whatever surface shows the cards translate clicks into [`TagFilter::select`]
//! calls and re-read the derived visibility and counts.

use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::constants as C;
use crate::error::{Error, Result};
use crate::notes::{NoteRecord, TagVocabulary};

/// Currently selected filter
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum ActiveTag {
    #[default]
    All,
    Tag(String),
}

impl ActiveTag {
    pub fn as_str(&self) -> &str {
        match self {
            ActiveTag::All => C::ALL_TAGS,
            ActiveTag::Tag(tag) => tag,
        }
    }

    /// Whether a note passes this filter
    pub fn admits(&self, note: &NoteRecord) -> bool {
        match self {
            ActiveTag::All => true,
            ActiveTag::Tag(tag) => note.has_tag(tag),
        }
    }
}

impl fmt::Display for ActiveTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ActiveTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ActiveTag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(if s == C::ALL_TAGS { ActiveTag::All } else { ActiveTag::Tag(s) })
    }
}

/// A filter button, only ever built from the vocabulary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagControl {
    pub label: String,
    pub selection: ActiveTag,
}

/// Total and visible note counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NoteCount {
    pub total: usize,
    /// Only set while a specific tag is selected
    pub visible: Option<usize>,
}

impl fmt::Display for NoteCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.visible {
            Some(visible) => write!(f, "{}/{}", visible, self.total),
            None => write!(f, "{}", self.total),
        }
    }
}

/// Serializable filter state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    pub active_tag: ActiveTag,
}

/// Tag selection over one collection
#[derive(Debug, Clone)]
pub struct TagFilter {
    vocabulary: TagVocabulary,
    state: FilterState,
}

impl TagFilter {
    pub fn new(vocabulary: TagVocabulary) -> Self {
        Self {
            vocabulary,
            state: FilterState::default(),
        }
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn active(&self) -> &ActiveTag {
        &self.state.active_tag
    }

    /// "All" followed by one control per vocabulary tag
    pub fn controls(&self) -> Vec<TagControl> {
        std::iter::once(TagControl {
            label: "All".to_string(),
            selection: ActiveTag::All,
        })
        .chain(self.vocabulary.iter().map(|tag| TagControl {
            label: tag.to_string(),
            selection: ActiveTag::Tag(tag.to_string()),
        }))
        .collect()
    }

    /// Apply a control generated by [`TagFilter::controls`]
    pub fn select(&mut self, control: &TagControl) {
        tracing::debug!(tag = %control.selection, "tag selected");
        self.state.active_tag = control.selection.clone();
    }

    /// Select by name; `"all"` resets, unknown tags are rejected
    pub fn select_tag(&mut self, tag: &str) -> Result<()> {
        let selection = if tag == C::ALL_TAGS && !self.vocabulary.contains(tag) {
            ActiveTag::All
        } else if self.vocabulary.contains(tag) {
            ActiveTag::Tag(tag.to_string())
        } else {
            return Err(Error::UnknownTag(tag.to_string()));
        };
        self.state.active_tag = selection;
        Ok(())
    }

    pub fn reset(&mut self) {
        self.state.active_tag = ActiveTag::All;
    }

    pub fn is_visible(&self, note: &NoteRecord) -> bool {
        self.state.active_tag.admits(note)
    }

    /// Source paths of the visible notes
    pub fn visible<'a>(&self, notes: &'a [NoteRecord]) -> BTreeSet<&'a Path> {
        notes
            .iter()
            .filter(|n| self.is_visible(n))
            .map(|n| n.source_path.as_path())
            .collect()
    }

    pub fn count(&self, notes: &[NoteRecord]) -> NoteCount {
        let total = notes.len();
        let visible = match self.state.active_tag {
            ActiveTag::All => None,
            ActiveTag::Tag(_) => Some(notes.iter().filter(|n| self.is_visible(n)).count()),
        };
        NoteCount { total, visible }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn note(name: &str, tags: &[&str]) -> NoteRecord {
        NoteRecord {
            title: name.to_string(),
            cover: None,
            source_path: PathBuf::from(format!("/n/{}.md", name)),
            base_name: name.to_string(),
            excerpt: "x".to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    fn fixture() -> (Vec<NoteRecord>, TagFilter) {
        let notes = vec![note("R1", &["work", "urgent"]), note("R2", &["home"])];
        let filter = TagFilter::new(TagVocabulary::from_notes(&notes));
        (notes, filter)
    }

    #[test]
    fn test_initial_state_shows_all() {
        let (notes, filter) = fixture();
        assert_eq!(filter.active(), &ActiveTag::All);
        assert_eq!(filter.visible(&notes).len(), 2);
        assert_eq!(filter.count(&notes).to_string(), "2");
    }

    #[test]
    fn test_select_work_then_all() {
        let (notes, mut filter) = fixture();

        filter.select_tag("work").unwrap();
        let visible = filter.visible(&notes);
        assert_eq!(visible.into_iter().collect::<Vec<_>>(), vec![Path::new("/n/R1.md")]);
        let count = filter.count(&notes);
        assert_eq!(count, NoteCount { total: 2, visible: Some(1) });
        assert_eq!(count.to_string(), "1/2");

        filter.select_tag("all").unwrap();
        assert_eq!(filter.visible(&notes).len(), 2);
        assert_eq!(filter.count(&notes).visible, None);
    }

    #[test]
    fn test_untagged_only_under_all() {
        let notes = vec![note("a", &[]), note("b", &["x"])];
        let mut filter = TagFilter::new(TagVocabulary::from_notes(&notes));
        assert!(filter.is_visible(&notes[0]));
        filter.select_tag("x").unwrap();
        assert!(!filter.is_visible(&notes[0]));
        assert!(filter.is_visible(&notes[1]));
    }

    #[test]
    fn test_unknown_tag_rejected() {
        let (_, mut filter) = fixture();
        filter.select_tag("work").unwrap();
        let err = filter.select_tag("nope").unwrap_err();
        assert!(matches!(err, Error::UnknownTag(t) if t == "nope"));
        assert_eq!(filter.active(), &ActiveTag::Tag("work".to_string()));
    }

    #[test]
    fn test_controls_follow_vocabulary() {
        let (notes, mut filter) = fixture();
        let controls = filter.controls();
        let labels: Vec<&str> = controls.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["All", "home", "urgent", "work"]);

        filter.select(&controls[1]);
        assert_eq!(filter.count(&notes).to_string(), "1/2");
        filter.select(&controls[0]);
        assert_eq!(filter.count(&notes).to_string(), "2");
    }

    #[test]
    fn test_tag_named_all_is_distinct_from_sentinel() {
        let notes = vec![note("a", &["all"]), note("b", &[])];
        let mut filter = TagFilter::new(TagVocabulary::from_notes(&notes));
        filter.select_tag("all").unwrap();
        assert_eq!(filter.count(&notes).to_string(), "1/2");
        filter.reset();
        assert_eq!(filter.count(&notes).to_string(), "2");
    }

    #[test]
    fn test_state_round_trips_as_json() {
        let (_, mut filter) = fixture();
        assert_eq!(serde_json::to_string(filter.state()).unwrap(), r#"{"activeTag":"all"}"#);
        filter.select_tag("home").unwrap();
        let json = serde_json::to_string(filter.state()).unwrap();
        assert_eq!(json, r#"{"activeTag":"home"}"#);
        let state: FilterState = serde_json::from_str(&json).unwrap();
        assert_eq!(state.active_tag, ActiveTag::Tag("home".to_string()));
    }
}
