//! Word-safe excerpt truncation

use crate::constants as C;

/// Truncate `text` to at most `max` characters plus an ellipsis
///
/// Cuts at the last space of the first `max` characters when that space sits
/// at or beyond 80% of `max`, otherwise cuts mid-word at `max`.
pub fn truncate(text: &str, max: usize) -> String {
    let len = text.chars().count();
    if len <= max {
        return text.to_string();
    }

    let head: String = text.chars().take(max).collect();
    let last_space = head.chars().enumerate().filter(|&(_, c)| c == ' ').map(|(i, _)| i).last();

    match last_space {
        // i >= 0.8 * max, kept in integers
        Some(i) if i * 5 >= max * 4 => {
            let cut: String = head.chars().take(i).collect();
            format!("{}{}", cut, C::ELLIPSIS)
        }
        _ => format!("{}{}", head, C::ELLIPSIS),
    }
}

/// Truncated excerpt, or the placeholder when nothing is left
pub fn excerpt(text: &str, max: usize) -> String {
    let result = truncate(text, max);
    if result.is_empty() {
        C::EMPTY_EXCERPT_PLACEHOLDER.to_string()
    } else {
        result
    }
}
