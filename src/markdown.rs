//! Markdown to plain text conversion
//!
//! A best-effort stripper, not a renderer. The conversion is an ordered list
//! of pure text steps; later steps assume the shapes left by earlier ones, so
//! the order in [`PIPELINE`] is part of the contract. Line-anchored steps
//! only eat horizontal whitespace so paragraph breaks survive until the
//! blank line step.

use once_cell::sync::Lazy;
use regex::Regex;

fn re(pattern: &str) -> Regex {
    Regex::new(pattern).expect("valid markdown regex")
}

static HEADING: Lazy<Regex> = Lazy::new(|| re(r"(?mR)^#+(?:[ \t]+|$)"));
static BOLD: Lazy<Regex> = Lazy::new(|| re(r"\*\*(.*?)\*\*"));
static ITALIC: Lazy<Regex> = Lazy::new(|| re(r"\*(.*?)\*"));
static UNDERSCORE: Lazy<Regex> = Lazy::new(|| re(r"_(.*?)_"));
static FENCED_CODE: Lazy<Regex> = Lazy::new(|| re(r"```[\s\S]*?```"));
static INLINE_CODE: Lazy<Regex> = Lazy::new(|| re(r"`([^`]+)`"));
static IMAGE: Lazy<Regex> = Lazy::new(|| re(r"!\[([^\]]*)\]\([^)]+\)"));
static LINK: Lazy<Regex> = Lazy::new(|| re(r"\[([^\]]+)\]\([^)]+\)"));
static BLOCKQUOTE: Lazy<Regex> = Lazy::new(|| re(r"(?m)^>[ \t]*"));
static HORIZONTAL_RULE: Lazy<Regex> = Lazy::new(|| re(r"(?mR)^[-*_]{3,}[ \t]*$"));
static UNORDERED_ITEM: Lazy<Regex> = Lazy::new(|| re(r"(?m)^[ \t]*[-*+][ \t]+"));
static ORDERED_ITEM: Lazy<Regex> = Lazy::new(|| re(r"(?m)^[ \t]*\d+\.[ \t]+"));
static BLANK_RUN: Lazy<Regex> = Lazy::new(|| re(r"\n\s*\n\s*\n"));
static LEFTOVER_SYMBOLS: Lazy<Regex> = Lazy::new(|| re(r"[|\-:\[\]]"));

/// One named step of the conversion
#[derive(Clone, Copy)]
pub struct Step {
    pub name: &'static str,
    pub apply: fn(&str) -> String,
}

impl std::fmt::Debug for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Step").field("name", &self.name).finish()
    }
}

/// Conversion steps, applied in order
pub const PIPELINE: &[Step] = &[
    Step { name: "headings", apply: strip_headings },
    Step { name: "emphasis", apply: unwrap_emphasis },
    Step { name: "code", apply: strip_code },
    Step { name: "links", apply: unwrap_links },
    Step { name: "blockquotes", apply: strip_blockquotes },
    Step { name: "horizontal_rules", apply: strip_horizontal_rules },
    Step { name: "list_markers", apply: strip_list_markers },
    Step { name: "blank_lines", apply: collapse_blank_lines },
    Step { name: "symbols", apply: strip_symbols },
];

/// Convert markdown body text to plain prose
pub fn to_plain_text(markdown: &str) -> String {
    if markdown.is_empty() {
        return String::new();
    }
    PIPELINE
        .iter()
        .fold(markdown.to_string(), |text, step| (step.apply)(&text))
        .trim()
        .to_string()
}

/// `# Title` -> `Title`
pub fn strip_headings(text: &str) -> String {
    HEADING.replace_all(text, "").into_owned()
}

/// `**a**`, `*a*`, `_a_` -> `a`
pub fn unwrap_emphasis(text: &str) -> String {
    let text = BOLD.replace_all(text, "$1");
    let text = ITALIC.replace_all(&text, "$1");
    UNDERSCORE.replace_all(&text, "$1").into_owned()
}

/// Drop fenced blocks with their content, keep inline code text
pub fn strip_code(text: &str) -> String {
    let text = FENCED_CODE.replace_all(text, "");
    INLINE_CODE.replace_all(&text, "$1").into_owned()
}

/// `![alt](src)` -> `alt`, `[text](href)` -> `text`
pub fn unwrap_links(text: &str) -> String {
    // Images first, otherwise the link pattern eats `[alt](src)` and leaves a `!`
    let text = IMAGE.replace_all(text, "$1");
    LINK.replace_all(&text, "$1").into_owned()
}

pub fn strip_blockquotes(text: &str) -> String {
    BLOCKQUOTE.replace_all(text, "").into_owned()
}

pub fn strip_horizontal_rules(text: &str) -> String {
    HORIZONTAL_RULE.replace_all(text, "").into_owned()
}

pub fn strip_list_markers(text: &str) -> String {
    let text = UNORDERED_ITEM.replace_all(text, "");
    ORDERED_ITEM.replace_all(&text, "").into_owned()
}

pub fn collapse_blank_lines(text: &str) -> String {
    BLANK_RUN.replace_all(text, "\n\n").into_owned()
}

/// Remove every `|`, `-`, `:`, `[` and `]`, including inside prose
pub fn strip_symbols(text: &str) -> String {
    LEFTOVER_SYMBOLS.replace_all(text, "").into_owned()
}
