//! Frontmatter extraction
//!
//! A metadata block is only recognized at the very start of a document,
//! fenced by `---` lines. Fields are pulled out of the raw block text by an
//! ordered list of strategies, strict first; the first one that yields a
//! value wins.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants as C;

static BLOCK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)\A---[ \t]*\r?\n(?:(.*?)\r?\n)?---[ \t]*(?:\r?\n|\z)").expect("valid frontmatter regex")
});

static COVER: Lazy<FieldPattern> = Lazy::new(|| FieldPattern::new(C::KEY_COVER));
static TITLE: Lazy<FieldPattern> = Lazy::new(|| FieldPattern::new(C::KEY_TITLE));
static TAGS: Lazy<FieldPattern> = Lazy::new(|| FieldPattern::new(C::KEY_TAGS));

/// A document split into its metadata block and body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frontmatter<'a> {
    /// Raw text between the fences, if the document has a block
    pub block: Option<&'a str>,
    /// Document text after the block, trimmed
    pub body: &'a str,
}

/// Split a document into frontmatter block and body
pub fn split(content: &str) -> Frontmatter<'_> {
    match BLOCK_RE.captures(content) {
        Some(caps) => {
            let end = caps.get(0).map(|m| m.end()).unwrap_or(0);
            Frontmatter {
                block: Some(caps.get(1).map(|m| m.as_str()).unwrap_or("")),
                body: content[end..].trim(),
            }
        }
        None => Frontmatter {
            block: None,
            body: content.trim(),
        },
    }
}

/// Extraction strategy, in the order they are tried
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// `Key: value` on its own line
    Strict,
    /// `Key:` anywhere on a line, value is the rest of that line
    Relaxed,
    /// First trimmed, case-folded line starting with `key:`
    LineScan,
}

pub const TIERS: [Tier; 3] = [Tier::Strict, Tier::Relaxed, Tier::LineScan];

/// Case-insensitive matcher for one metadata key
#[derive(Debug)]
pub struct FieldPattern {
    needle: String,
    strict: Regex,
    relaxed: Regex,
}

impl FieldPattern {
    pub fn new(key: &str) -> Self {
        let escaped = regex::escape(key);
        let strict = Regex::new(&format!(r"(?miR)^{}:[ \t]+(\S[^\r\n]*)$", escaped))
            .expect("valid strict field regex");
        let relaxed = Regex::new(&format!(r"(?i)\b{}:[ \t]*(\S[^\r\n]*)", escaped))
            .expect("valid relaxed field regex");
        Self {
            needle: format!("{}:", key.to_lowercase()),
            strict,
            relaxed,
        }
    }

    /// Run a single strategy over the block
    pub fn apply(&self, tier: Tier, block: &str) -> Option<String> {
        let value = match tier {
            Tier::Strict => capture(&self.strict, block),
            Tier::Relaxed => capture(&self.relaxed, block),
            Tier::LineScan => self.line_scan(block),
        }?;
        let value = value.trim();
        if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        }
    }

    /// Try every strategy in order, returning the winning tier and value
    pub fn extract_with_tier(&self, block: &str) -> Option<(Tier, String)> {
        TIERS
            .iter()
            .find_map(|&tier| self.apply(tier, block).map(|value| (tier, value)))
    }

    pub fn extract(&self, block: &str) -> Option<String> {
        self.extract_with_tier(block).map(|(_, value)| value)
    }

    fn line_scan(&self, block: &str) -> Option<String> {
        let prefix_chars = self.needle.chars().count();
        block.lines().find_map(|line| {
            let trimmed = line.trim();
            let head: String = trimmed.chars().take(prefix_chars).collect();
            if head.to_lowercase() == self.needle {
                Some(trimmed.chars().skip(prefix_chars).collect())
            } else {
                None
            }
        })
    }
}

fn capture(re: &Regex, block: &str) -> Option<String> {
    re.captures(block)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Fields understood by the note card view
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    pub title: Option<String>,
    /// Raw cover reference, not yet resolved
    pub cover: Option<String>,
    pub tags: Vec<String>,
}

impl Metadata {
    /// Extract `Title`, `Cover` and `Tags` from a raw block
    pub fn from_block(block: &str) -> Self {
        Self {
            title: TITLE.extract(block),
            cover: COVER.extract(block),
            tags: TAGS.extract(block).map(|v| parse_tags(&v)).unwrap_or_default(),
        }
    }
}

/// Split a comma separated tag list, keeping first occurrences in order
pub fn parse_tags(value: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in value.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        if !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }
    tags
}
