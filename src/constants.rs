//! Constants for note-cards
//!
//! Magic numbers, file names and fixed strings shared across the scanner,
//! the text pipeline and the presentation layer.

// === Discovery ===

/// Default file suffix for notes
pub const MARKDOWN_EXTENSION: &str = ".md";

/// Prefix marking hidden directories, never descended into
pub const HIDDEN_PREFIX: char = '.';

/// Dependency directories skipped by default
pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &["node_modules"];

// === Frontmatter ===

/// Maximum size of frontmatter to parse (prevents DoS on malformed files)
pub const MAX_FRONTMATTER_SIZE: usize = 64 * 1024; // 64KB

/// Metadata keys understood by the extractor
pub const KEY_COVER: &str = "Cover";
pub const KEY_TITLE: &str = "Title";
pub const KEY_TAGS: &str = "Tags";

// === Excerpts ===

/// Default excerpt length in characters
pub const DEFAULT_EXCERPT_LENGTH: usize = 120;

/// Marker appended to truncated excerpts
pub const ELLIPSIS: &str = "...";

/// Shown when a note body yields no text
pub const EMPTY_EXCERPT_PLACEHOLDER: &str = "No summary available";

// === Presentation ===

/// Sentinel tag selecting every note
pub const ALL_TAGS: &str = "all";

/// Preference key holding the theme
pub const THEME_KEY: &str = "theme";

// === Configuration ===

/// Directory under the platform config dir
pub const APP_DIR_NAME: &str = "note-cards";

/// Optional YAML configuration file name
pub const CONFIG_FILENAME: &str = "config.yaml";

/// Preference store file name
pub const PREFERENCES_FILENAME: &str = "preferences.json";

/// Environment variable names
pub const ENV_ROOT: &str = "NOTE_CARDS_ROOT";
pub const ENV_EXCERPT_LENGTH: &str = "NOTE_CARDS_EXCERPT_LENGTH";
pub const ENV_PREFERS_DARK: &str = "NOTE_CARDS_PREFERS_DARK";
pub const ENV_LOG: &str = "NOTE_CARDS_LOG";
