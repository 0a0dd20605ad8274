use crate::error::SourceResult;
use crate::parser::ParseOutcome;
use std::fmt;

pub const OUTPUT_MALFORMED: &str = "malformed HTML";
pub const OUTPUT_URL_ERROR: &str = "URL connection error";

/// What the user gets to see for one analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    /// The source could not be opened or read
    ConnectionError,
    /// Broken nesting, or a well-nested document without any text
    Malformed,
    /// The first text line at the greatest depth
    Deepest(String),
}

impl Report {
    pub fn from_outcome(outcome: ParseOutcome) -> Self {
        match outcome {
            ParseOutcome {
                malformed: false,
                deepest_text: Some(text),
                ..
            } => Report::Deepest(text),
            _ => Report::Malformed,
        }
    }

    /// Source failures take precedence over anything parsed before them.
    pub fn from_result(result: SourceResult<ParseOutcome>) -> Self {
        match result {
            Ok(outcome) => Self::from_outcome(outcome),
            Err(_) => Report::ConnectionError,
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::ConnectionError => f.write_str(OUTPUT_URL_ERROR),
            Report::Malformed => f.write_str(OUTPUT_MALFORMED),
            Report::Deepest(text) => f.write_str(text),
        }
    }
}
