//! # html-analyzer
//!
//! Checks the nesting of a simplified, line-oriented HTML document and finds
//! the text sitting at the greatest depth.
//!
//! ## Input format
//! - one open tag, close tag, or text fragment per line
//! - tags are `<name>` / `</name>` with `name` matching `[A-Za-z][A-Za-z0-9]*`
//! - no attributes, no self-closing tags, no mixed content
//! - blank lines and surrounding whitespace are ignored
//!
//! ## Example
//! ```
//! use html_analyzer::{analyze_str, Report};
//!
//! let html = "<html>\n<body>\nshallow\n<p>\ndeep\n</p>\n</body>\n</html>\n";
//! assert_eq!(analyze_str(html), Report::Deepest("deep".to_string()));
//!
//! // Text outside every element is not allowed
//! assert_eq!(analyze_str("hello"), Report::Malformed);
//! ```
//!
//! A well-nested document containing no text at all is reported as
//! malformed, the same as a broken one.

pub mod classifier;
pub mod config;
pub mod error;
pub mod parser;
pub mod report;
pub mod source;

pub use classifier::{classify, ClassifiedLine};
pub use config::AnalyzerConfig;
pub use error::{ConfigError, ConfigResult, SourceError, SourceResult};
pub use parser::{NestingParser, ParseOutcome, Violation};
pub use report::Report;

/// Parse lines read from `url` without turning the result into a report.
pub fn parse_url(url: &str, config: &AnalyzerConfig) -> SourceResult<ParseOutcome> {
    let lines = source::open(url, config)?;
    NestingParser::try_run(lines)
}

/// Fetch `url` and analyze it.
pub fn analyze_url(url: &str, config: &AnalyzerConfig) -> Report {
    let result = parse_url(url, config);
    if let Err(ref e) = result {
        log::warn!("{}", e);
    }
    Report::from_result(result)
}

/// Analyze an in-memory document.
pub fn analyze_str(text: &str) -> Report {
    Report::from_result(NestingParser::try_run(source::lines_from_str(text)))
}
