//! Description text cleanup
//!
//! The description endpoint returns seller-authored HTML. The catalog only
//! needs plain text, so tags are stripped with a few regex passes rather
//! than a full DOM parse.

use once_cell::sync::Lazy;
use regex::Regex;

static BR_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<br\s*/?>").unwrap());
static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());
static BLANK_LINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n").unwrap());

/// Maximum length of a catalog description, in characters.
pub const DESCRIPTION_MAX_CHARS: usize = 200;

/// Strip HTML markup from a raw description.
///
/// `<br>` tags become newlines, all other tags are removed, and runs of
/// blank lines collapse to one.
pub fn clean_description(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let text = BR_TAG.replace_all(raw, "\n");
    let text = HTML_TAG.replace_all(&text, "");
    let text = BLANK_LINES.replace_all(&text, "\n");
    text.trim().to_string()
}

/// Truncate a cleaned description to [`DESCRIPTION_MAX_CHARS`] characters,
/// appending an ellipsis marker when anything was cut off.
pub fn truncate_description(text: &str) -> String {
    if text.chars().count() <= DESCRIPTION_MAX_CHARS {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(DESCRIPTION_MAX_CHARS - 3).collect();
    truncated.push_str("...");
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_tags() {
        let raw = "<p>Durable <b>steel</b> frame</p>";
        assert_eq!(clean_description(raw), "Durable steel frame");
    }

    #[test]
    fn test_br_becomes_newline() {
        let raw = "Line one<br/>Line two<BR>Line three";
        assert_eq!(clean_description(raw), "Line one\nLine two\nLine three");
    }

    #[test]
    fn test_blank_lines_collapse() {
        let raw = "First<br><br>   <br>Second";
        assert_eq!(clean_description(raw), "First\nSecond");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(clean_description(""), "");
    }

    #[test]
    fn test_truncation_appends_ellipsis() {
        let long = "x".repeat(500);
        let truncated = truncate_description(&long);
        assert_eq!(truncated.chars().count(), DESCRIPTION_MAX_CHARS);
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn test_short_text_untouched() {
        let text = "Short description";
        assert_eq!(truncate_description(text), text);
    }

    #[test]
    fn test_exact_limit_untouched() {
        let text = "y".repeat(DESCRIPTION_MAX_CHARS);
        assert_eq!(truncate_description(&text), text);
    }

    #[test]
    fn test_truncation_counts_chars_not_bytes() {
        let long = "я".repeat(300);
        let truncated = truncate_description(&long);
        assert_eq!(truncated.chars().count(), DESCRIPTION_MAX_CHARS);
    }
}
