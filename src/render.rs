//! Card page rendering
//!
//! Builds the payload handed to a rendering surface and the self-contained
//! HTML page the CLI writes. Local cover paths go through a
//! [`ResourceResolver`] so the surface can load them.

use std::path::Path;

use askama::Template;
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::cover::CoverRef;
use crate::error::Result;
use crate::filter::{ActiveTag, NoteCount, TagControl, TagFilter};
use crate::notes::{NoteCollection, NoteRecord, TagVocabulary};
use crate::theme::{Theme, ThemeState};

/// Turns local paths into references the surface can load
pub trait ResourceResolver {
    fn resolve_local(&self, path: &Path) -> Option<String>;
}

/// Resolves to `file://` URIs, for pages opened straight from disk
#[derive(Debug, Default, Clone, Copy)]
pub struct FileUriResolver;

impl ResourceResolver for FileUriResolver {
    fn resolve_local(&self, path: &Path) -> Option<String> {
        url::Url::from_file_path(path).ok().map(|u| u.to_string())
    }
}

/// Cover as the surface should load it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "src", rename_all = "camelCase")]
pub enum CoverSource {
    Image(String),
    /// A local path the resolver could not convert
    Invalid,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardPayload {
    pub title: String,
    pub base_name: String,
    pub file_name: String,
    pub excerpt: String,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover: Option<CoverSource>,
    pub source_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_uri: Option<String>,
    pub visible: bool,
}

impl CardPayload {
    fn new(note: &NoteRecord, visible: bool, resolver: &dyn ResourceResolver) -> Self {
        let cover = note.cover.as_ref().map(|cover| match cover {
            CoverRef::Local(path) => match resolver.resolve_local(path) {
                Some(src) => CoverSource::Image(src),
                None => {
                    tracing::warn!(cover = %path.display(), "cannot resolve local cover");
                    CoverSource::Invalid
                }
            },
            CoverRef::Remote(src) | CoverRef::Inline(src) => CoverSource::Image(src.clone()),
        });
        Self {
            title: note.title.clone(),
            base_name: note.base_name.clone(),
            file_name: note.file_name(),
            excerpt: note.excerpt.clone(),
            tags: note.tags.clone(),
            cover,
            source_path: crate::util::display_path(&note.source_path),
            source_uri: resolver.resolve_local(&note.source_path),
            visible,
        }
    }
}

/// Everything a surface needs to draw the card view
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderPayload {
    pub notes: Vec<CardPayload>,
    pub tags: TagVocabulary,
    pub controls: Vec<TagControl>,
    pub active_tag: ActiveTag,
    pub count: NoteCount,
    pub theme: ThemeState,
    pub generated_at: String,
}

impl RenderPayload {
    pub fn build(
        collection: &NoteCollection,
        filter: &TagFilter,
        theme: ThemeState,
        resolver: &dyn ResourceResolver,
    ) -> Self {
        let notes = collection
            .notes
            .iter()
            .map(|note| CardPayload::new(note, filter.is_visible(note), resolver))
            .collect();
        Self {
            notes,
            tags: collection.tags.clone(),
            controls: filter.controls(),
            active_tag: filter.active().clone(),
            count: filter.count(&collection.notes),
            theme,
            generated_at: chrono::Local::now().to_rfc3339(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Per-page script nonce derived from the payload
fn nonce(payload: &RenderPayload) -> Result<String> {
    let mut hasher = Sha256::new();
    hasher.update(serde_json::to_vec(payload)?);
    hasher.update(payload.generated_at.as_bytes());
    let digest = format!("{:x}", hasher.finalize());
    Ok(digest.chars().take(32).collect())
}

#[derive(Template)]
#[template(path = "cards.html")]
struct CardsPage<'a> {
    nonce: &'a str,
    theme: Theme,
    explicit: bool,
    dark: bool,
    count: NoteCount,
    controls: Vec<ControlView<'a>>,
    cards: Vec<CardView<'a>>,
}

struct ControlView<'a> {
    tag: &'a str,
    label: &'a str,
    active: bool,
}

struct CardView<'a> {
    note: &'a CardPayload,
    file_uri: &'a str,
    tags_json: String,
    cover_src: Option<&'a str>,
    cover_invalid: bool,
}

impl<'a> CardView<'a> {
    fn new(note: &'a CardPayload) -> Result<Self> {
        let (cover_src, cover_invalid) = match &note.cover {
            Some(CoverSource::Image(src)) => (Some(src.as_str()), false),
            Some(CoverSource::Invalid) => (None, true),
            None => (None, false),
        };
        Ok(Self {
            note,
            file_uri: note.source_uri.as_deref().unwrap_or(""),
            tags_json: serde_json::to_string(&note.tags)?,
            cover_src,
            cover_invalid,
        })
    }
}

/// Render the full HTML page
pub fn render_html(payload: &RenderPayload) -> Result<String> {
    let nonce = nonce(payload)?;
    let controls = payload
        .controls
        .iter()
        .map(|control| ControlView {
            tag: control.selection.as_str(),
            label: &control.label,
            active: control.selection == payload.active_tag,
        })
        .collect();
    let cards = payload.notes.iter().map(CardView::new).collect::<Result<Vec<_>>>()?;

    let page = CardsPage {
        nonce: &nonce,
        theme: payload.theme.theme,
        explicit: payload.theme.explicit,
        dark: payload.theme.theme == Theme::Dark,
        count: payload.count,
        controls,
        cards,
    };
    Ok(page.render()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    struct NoResolver;

    impl ResourceResolver for NoResolver {
        fn resolve_local(&self, _path: &Path) -> Option<String> {
            None
        }
    }

    fn note(name: &str, tags: &[&str], cover: Option<CoverRef>) -> NoteRecord {
        NoteRecord {
            title: format!("{} <title>", name),
            cover,
            source_path: PathBuf::from(format!("/notes/{}.md", name)),
            base_name: name.to_string(),
            excerpt: "Body & more".to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    fn collection() -> NoteCollection {
        NoteCollection::new(
            PathBuf::from("/notes"),
            vec![
                note("b", &["work"], Some(CoverRef::Remote("https://x/y.png".to_string()))),
                note("a", &["home", "work"], Some(CoverRef::Local(PathBuf::from("/notes/img/a.png")))),
                note("c", &[], None),
            ],
        )
    }

    #[test]
    fn test_render_html_escapes_attributes() {
        let collection = NoteCollection::new(PathBuf::from("/notes"), vec![note("say \"hi\"", &["<b>"], None)]);
        let filter = TagFilter::new(collection.tags.clone());
        let payload = RenderPayload::build(&collection, &filter, ThemeState::init(None, false), &NoResolver);
        let html = render_html(&payload).unwrap();

        assert!(!html.contains("say \"hi\""));
        assert!(!html.contains("<b>"));
        assert!(html.contains("&lt;b&gt;"));
    }

    #[cfg(unix)]
    #[test]
    fn test_file_uri_resolver() {
        let uri = FileUriResolver.resolve_local(Path::new("/notes/my img.png")).unwrap();
        assert_eq!(uri, "file:///notes/my%20img.png");
        assert_eq!(FileUriResolver.resolve_local(Path::new("relative.png")), None);
    }

    #[test]
    fn test_payload_marks_visibility() {
        let collection = collection();
        let mut filter = TagFilter::new(collection.tags.clone());
        filter.select_tag("home").unwrap();
        let payload = RenderPayload::build(&collection, &filter, ThemeState::init(None, false), &FileUriResolver);

        let visible: Vec<&str> = payload.notes.iter().filter(|c| c.visible).map(|c| c.base_name.as_str()).collect();
        assert_eq!(visible, vec!["a"]);
        assert_eq!(payload.count.to_string(), "1/3");
        assert_eq!(payload.controls.len(), 3);
    }

    #[test]
    fn test_unresolvable_local_cover_is_invalid() {
        let collection = collection();
        let filter = TagFilter::new(collection.tags.clone());
        let payload = RenderPayload::build(&collection, &filter, ThemeState::init(None, true), &NoResolver);

        assert_eq!(payload.notes[0].cover, Some(CoverSource::Invalid));
        assert_eq!(payload.notes[1].cover, Some(CoverSource::Image("https://x/y.png".to_string())));
        assert_eq!(payload.notes[2].cover, None);
    }

    #[test]
    fn test_payload_json_shape() {
        let collection = collection();
        let filter = TagFilter::new(collection.tags.clone());
        let payload = RenderPayload::build(&collection, &filter, ThemeState::init(Some(Theme::Dark), false), &NoResolver);
        let json: serde_json::Value = serde_json::from_str(&payload.to_json().unwrap()).unwrap();

        assert_eq!(json["activeTag"], "all");
        assert_eq!(json["tags"], serde_json::json!(["home", "work"]));
        assert_eq!(json["theme"]["theme"], "dark");
        assert_eq!(json["notes"][0]["baseName"], "a");
        assert_eq!(json["notes"][1]["cover"]["kind"], "image");
    }

    #[test]
    fn test_render_html_escapes_and_lists_controls() {
        let collection = collection();
        let filter = TagFilter::new(collection.tags.clone());
        let payload = RenderPayload::build(&collection, &filter, ThemeState::init(None, false), &FileUriResolver);
        let html = render_html(&payload).unwrap();

        assert!(html.contains("a &lt;title&gt;"));
        assert!(html.contains("Body &amp; more"));
        assert!(!html.contains("<title>a"));
        assert_eq!(html.matches("class=\"tag-btn").count(), 3);
        assert_eq!(html.matches("class=\"note-card\"").count(), 3);
        assert!(html.contains("theme-light"));
    }

    #[test]
    fn test_render_html_empty_state() {
        let collection = NoteCollection::new(PathBuf::from("/notes"), Vec::new());
        let filter = TagFilter::new(collection.tags.clone());
        let payload = RenderPayload::build(&collection, &filter, ThemeState::init(None, false), &FileUriResolver);
        let html = render_html(&payload).unwrap();

        assert!(html.contains("No notes found"));
        assert!(!html.contains("class=\"tags-filter\""));
    }

    #[test]
    fn test_stored_theme_drives_page() {
        let collection = collection();
        let filter = TagFilter::new(collection.tags.clone());
        let payload = RenderPayload::build(&collection, &filter, ThemeState::init(Some(Theme::Dark), false), &NoResolver);
        let html = render_html(&payload).unwrap();

        assert!(html.contains(r#"<body class="theme-dark" data-theme-explicit="true">"#));
        assert!(!html.contains("localStorage"));
    }

    #[test]
    fn test_system_theme_marked_not_explicit() {
        let collection = collection();
        let filter = TagFilter::new(collection.tags.clone());
        let payload = RenderPayload::build(&collection, &filter, ThemeState::init(None, false), &NoResolver);
        let html = render_html(&payload).unwrap();

        assert!(html.contains(r#"<body class="theme-light" data-theme-explicit="false">"#));
    }

    #[test]
    fn test_nonce_present_in_csp_and_script() {
        let collection = collection();
        let filter = TagFilter::new(collection.tags.clone());
        let payload = RenderPayload::build(&collection, &filter, ThemeState::init(None, false), &FileUriResolver);
        let html = render_html(&payload).unwrap();
        let nonce = nonce(&payload).unwrap();

        assert_eq!(nonce.len(), 32);
        assert!(html.contains(&format!("'nonce-{}'", nonce)));
        assert!(html.contains(&format!("<script nonce=\"{}\">", nonce)));
    }
}
