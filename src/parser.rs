use crate::classifier::{classify, ClassifiedLine};
use log::{debug, trace};
use std::fmt;

/// The first structural rule a document broke.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// A close tag arrived with nothing open
    UnmatchedClose { name: String },
    /// A close tag did not name the innermost open element
    MismatchedClose { expected: String, found: String },
    /// Text appeared outside every element
    TextOutsideElement,
    /// A line started with `<` but was not a tag
    InvalidLine { line: String },
    /// Input ended with elements still open
    UnclosedTags { open: Vec<String> },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::UnmatchedClose { name } => {
                write!(f, "close tag </{}> has no open element", name)
            }
            Violation::MismatchedClose { expected, found } => {
                write!(f, "expected </{}> but found </{}>", expected, found)
            }
            Violation::TextOutsideElement => write!(f, "text outside of any element"),
            Violation::InvalidLine { line } => write!(f, "invalid tag syntax: {}", line),
            Violation::UnclosedTags { open } => {
                write!(f, "unclosed tags at end of input: {}", open.join(", "))
            }
        }
    }
}

/// Result of one parser run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOutcome {
    pub malformed: bool,
    pub deepest_text: Option<String>,
    /// Why the run was malformed, if it was
    pub violation: Option<Violation>,
    /// Lines consumed, including the one that broke the document
    pub lines_read: usize,
}

impl ParseOutcome {
    /// The deepest text, only when the document is well-formed.
    ///
    /// A well-nested document with no text at all yields `None` here, the
    /// same as a structurally broken one.
    pub fn deepest(&self) -> Option<&str> {
        if self.malformed {
            return None;
        }
        self.deepest_text.as_deref()
    }
}

/// Streaming tag-matching state machine.
///
/// Feed it trimmed, non-empty lines one at a time, then call [`finish`].
/// The first violation is terminal: later lines are ignored.
///
/// [`finish`]: NestingParser::finish
#[derive(Debug, Default)]
pub struct NestingParser {
    stack: Vec<String>,
    max_depth: Option<usize>,
    deepest_text: Option<String>,
    violation: Option<Violation>,
    lines_read: usize,
}

impl NestingParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of currently open elements
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn is_malformed(&self) -> bool {
        self.violation.is_some()
    }

    /// Apply one line. Returns `false` once the document is malformed and no
    /// more input should be fed.
    pub fn feed(&mut self, line: &str) -> bool {
        if self.is_malformed() {
            return false;
        }
        self.lines_read += 1;

        let classified = classify(line);
        trace!("line {}: {:?}", self.lines_read, classified);

        match classified {
            ClassifiedLine::OpenTag(name) => self.stack.push(name.to_string()),
            ClassifiedLine::CloseTag(name) => match self.stack.pop() {
                None => self.fail(Violation::UnmatchedClose {
                    name: name.to_string(),
                }),
                Some(open) if open != name => self.fail(Violation::MismatchedClose {
                    expected: open,
                    found: name.to_string(),
                }),
                Some(_) => {}
            },
            ClassifiedLine::Text(content) => {
                let depth = self.stack.len();
                if depth == 0 {
                    self.fail(Violation::TextOutsideElement);
                } else if self.max_depth.map_or(true, |max| depth > max) {
                    self.max_depth = Some(depth);
                    self.deepest_text = Some(content.to_string());
                }
            }
            ClassifiedLine::Invalid => self.fail(Violation::InvalidLine {
                line: line.to_string(),
            }),
        }

        !self.is_malformed()
    }

    fn fail(&mut self, violation: Violation) {
        debug!("malformed at line {}: {}", self.lines_read, violation);
        self.violation = Some(violation);
    }

    /// End of input: every open element must have been closed.
    pub fn finish(mut self) -> ParseOutcome {
        if !self.is_malformed() && !self.stack.is_empty() {
            let open = std::mem::take(&mut self.stack);
            self.fail(Violation::UnclosedTags { open });
        }

        ParseOutcome {
            malformed: self.violation.is_some(),
            deepest_text: self.deepest_text,
            violation: self.violation,
            lines_read: self.lines_read,
        }
    }

    /// Run a fresh parser over an in-memory sequence of lines.
    pub fn run<I, S>(lines: I) -> ParseOutcome
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut parser = Self::new();
        for line in lines {
            if !parser.feed(line.as_ref()) {
                break;
            }
        }
        parser.finish()
    }

    /// Run a fresh parser over a fallible line source.
    ///
    /// A source error aborts the run. Once the document is malformed the
    /// source is not read any further, so later errors are never seen.
    pub fn try_run<I, S, E>(lines: I) -> Result<ParseOutcome, E>
    where
        I: IntoIterator<Item = Result<S, E>>,
        S: AsRef<str>,
    {
        let mut parser = Self::new();
        for line in lines {
            if !parser.feed(line?.as_ref()) {
                break;
            }
        }
        Ok(parser.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn run(lines: &[&str]) -> ParseOutcome {
        NestingParser::run(lines.iter().copied())
    }

    #[test]
    fn test_nested_example() {
        let outcome = run(&["<a>", "x", "<b>", "y", "</b>", "</a>"]);
        assert!(!outcome.malformed);
        assert_eq!(outcome.deepest(), Some("y"));
        assert_eq!(outcome.violation, None);
        assert_eq!(outcome.lines_read, 6);
    }

    #[test]
    fn test_first_text_at_max_depth_wins() {
        let outcome = run(&["<a>", "<b>", "first", "second", "</b>", "<c>", "third", "</c>", "</a>"]);
        assert_eq!(outcome.deepest(), Some("first"));
    }

    #[test]
    fn test_shallow_text_after_deep_text_does_not_replace_it() {
        let outcome = run(&["<a>", "<b>", "deep", "</b>", "shallow", "</a>"]);
        assert_eq!(outcome.deepest(), Some("deep"));
    }

    #[test]
    fn test_deeper_sibling_replaces_earlier_text() {
        let outcome = run(&[
            "<html>", "<body>", "<p>", "one", "</p>", "<div>", "<span>", "two", "</span>",
            "</div>", "</body>", "</html>",
        ]);
        assert_eq!(outcome.deepest(), Some("two"));
    }

    #[test]
    fn test_unclosed_tag() {
        let outcome = run(&["<a>"]);
        assert!(outcome.malformed);
        assert_eq!(
            outcome.violation,
            Some(Violation::UnclosedTags {
                open: vec!["a".to_string()]
            })
        );
    }

    #[test]
    fn test_unclosed_tag_after_text() {
        let outcome = run(&["<a>", "text"]);
        assert!(outcome.malformed);
        assert_eq!(outcome.deepest(), None);
    }

    #[test]
    fn test_unmatched_close() {
        let outcome = run(&["</a>"]);
        assert!(outcome.malformed);
        assert_eq!(
            outcome.violation,
            Some(Violation::UnmatchedClose {
                name: "a".to_string()
            })
        );
    }

    #[test]
    fn test_mismatched_close_checks_only_top() {
        let outcome = run(&["<a>", "<b>", "</a>"]);
        assert!(outcome.malformed);
        assert_eq!(
            outcome.violation,
            Some(Violation::MismatchedClose {
                expected: "b".to_string(),
                found: "a".to_string()
            })
        );
    }

    #[test]
    fn test_close_is_case_sensitive() {
        let outcome = run(&["<a>", "text", "</A>"]);
        assert!(outcome.malformed);
    }

    #[test]
    fn test_text_at_depth_zero() {
        let outcome = run(&["hello"]);
        assert!(outcome.malformed);
        assert_eq!(outcome.violation, Some(Violation::TextOutsideElement));
    }

    #[test]
    fn test_text_after_root_closed() {
        let outcome = run(&["<a>", "in", "</a>", "out"]);
        assert_eq!(outcome.violation, Some(Violation::TextOutsideElement));
    }

    #[test]
    fn test_invalid_syntax() {
        for bad in ["<1a>", "<a/>"] {
            let outcome = run(&["<a>", "text", bad, "</a>"]);
            assert!(outcome.malformed, "{} should be malformed", bad);
            assert_eq!(
                outcome.violation,
                Some(Violation::InvalidLine {
                    line: bad.to_string()
                })
            );
        }
    }

    #[test]
    fn test_no_text_is_reported_as_malformed() {
        let outcome = run(&["<a>", "</a>"]);
        assert!(!outcome.malformed);
        assert_eq!(outcome.violation, None);
        assert_eq!(outcome.deepest(), None);
    }

    #[test]
    fn test_empty_input() {
        let outcome = run(&[]);
        assert!(!outcome.malformed);
        assert_eq!(outcome.deepest(), None);
    }

    #[test]
    fn test_stops_at_first_violation() {
        let outcome = run(&["<a>", "</b>", "<c>", "</c>"]);
        assert_eq!(outcome.lines_read, 2);
    }

    #[test]
    fn test_feed_reports_when_to_stop() {
        let mut parser = NestingParser::new();
        assert!(parser.feed("<a>"));
        assert_eq!(parser.depth(), 1);
        assert!(!parser.feed("</b>"));
        assert!(parser.is_malformed());
        assert!(!parser.feed("<c>"));
        assert_eq!(parser.finish().lines_read, 2);
    }

    #[test]
    fn test_malformed_outcome_keeps_text_seen_so_far() {
        let outcome = run(&["<a>", "x", "</b>"]);
        assert!(outcome.malformed);
        assert_eq!(outcome.deepest_text.as_deref(), Some("x"));
        assert_eq!(outcome.deepest(), None);
    }

    #[test]
    fn test_try_run_propagates_source_error() {
        let lines: Vec<Result<&str, String>> = vec![Ok("<a>"), Err("boom".to_string())];
        let result = NestingParser::try_run(lines);
        assert_eq!(result, Err("boom".to_string()));
    }

    #[test]
    fn test_try_run_stops_reading_after_violation() {
        let lines: Vec<Result<&str, String>> =
            vec![Ok("</a>"), Err("never read".to_string())];
        let outcome = NestingParser::try_run(lines).unwrap();
        assert!(outcome.malformed);
    }

    #[test]
    fn test_reused_names_at_different_levels() {
        let outcome = run(&["<div>", "<div>", "inner", "</div>", "</div>"]);
        assert_eq!(outcome.deepest(), Some("inner"));
    }
}
