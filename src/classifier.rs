use regex::Regex;
use std::sync::OnceLock;

/// One input line, sorted into the only four shapes the grammar knows.
///
/// Tag names and text borrow from the line they were classified from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifiedLine<'a> {
    /// `<name>`
    OpenTag(&'a str),
    /// `</name>`
    CloseTag(&'a str),
    /// Anything not starting with `<`, verbatim
    Text(&'a str),
    /// Starts with `<` but is neither an open nor a close tag
    Invalid,
}

fn open_tag_regex() -> &'static Regex {
    static OPEN_TAG_REGEX: OnceLock<Regex> = OnceLock::new();
    OPEN_TAG_REGEX.get_or_init(|| Regex::new(r"^<([A-Za-z][A-Za-z0-9]*)>$").unwrap())
}

fn close_tag_regex() -> &'static Regex {
    static CLOSE_TAG_REGEX: OnceLock<Regex> = OnceLock::new();
    CLOSE_TAG_REGEX.get_or_init(|| Regex::new(r"^</([A-Za-z][A-Za-z0-9]*)>$").unwrap())
}

/// Classify a trimmed, non-empty line.
///
/// Never fails: every line lands in exactly one variant.
pub fn classify(line: &str) -> ClassifiedLine<'_> {
    if !line.starts_with('<') {
        return ClassifiedLine::Text(line);
    }

    if let Some(name) = open_tag_regex().captures(line).and_then(|c| c.get(1)) {
        return ClassifiedLine::OpenTag(name.as_str());
    }

    if let Some(name) = close_tag_regex().captures(line).and_then(|c| c.get(1)) {
        return ClassifiedLine::CloseTag(name.as_str());
    }

    ClassifiedLine::Invalid
}
