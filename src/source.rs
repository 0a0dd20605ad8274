use crate::config::AnalyzerConfig;
use crate::error::{SourceError, SourceResult};
use log::{debug, info};
use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use url::Url;

/// Open `url` and return its trimmed, non-empty lines.
///
/// Supports `http`, `https` and `file` URLs. Nothing is classified until
/// this succeeds, so a failure here always wins over any parse result.
pub fn open(url: &str, config: &AnalyzerConfig) -> SourceResult<LineReader<Box<dyn BufRead>>> {
    let parsed = Url::parse(url).map_err(|e| SourceError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    let reader: Box<dyn BufRead> = match parsed.scheme() {
        "http" | "https" => Box::new(BufReader::new(fetch(&parsed, config)?)),
        "file" => {
            let path = parsed.to_file_path().map_err(|_| SourceError::InvalidUrl {
                url: url.to_string(),
                reason: "not a local file path".to_string(),
            })?;
            debug!("opening file {}", path.display());
            Box::new(BufReader::new(File::open(path)?))
        }
        other => {
            return Err(SourceError::UnsupportedScheme {
                scheme: other.to_string(),
            })
        }
    };

    info!("opened {}", parsed);
    Ok(LineReader::new(reader))
}

fn fetch(url: &Url, config: &AnalyzerConfig) -> SourceResult<impl std::io::Read> {
    let agent = ureq::AgentBuilder::new()
        .timeout(config.timeout())
        .user_agent(&config.user_agent)
        .build();

    let response = agent
        .get(url.as_str())
        .call()
        .map_err(|e| SourceError::Connection {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    debug!(
        "{} responded {} ({})",
        url,
        response.status(),
        response.content_type()
    );
    Ok(response.into_reader())
}

/// Lines of an in-memory document, prepared the same way as a fetched one.
pub fn lines_from_str(text: &str) -> LineReader<&[u8]> {
    LineReader::new(text.as_bytes())
}

/// Strips ASCII control characters and spaces from both ends.
pub fn trim_line(line: &str) -> &str {
    line.trim_matches(|c: char| c <= ' ')
}

/// Iterator over the trimmed, non-empty lines of a UTF-8 stream.
///
/// Lines end at `\n`, `\r\n` or a lone `\r`. Invalid UTF-8 is replaced
/// with U+FFFD rather than rejected. A read error is yielded once and
/// ends the iteration.
pub struct LineReader<R> {
    reader: R,
    buf: Vec<u8>,
    pending: VecDeque<String>,
    done: bool,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            pending: VecDeque::new(),
            done: false,
        }
    }

    fn fill(&mut self) -> SourceResult<()> {
        loop {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => {
                    self.done = true;
                    return Ok(());
                }
                Ok(_) => {
                    let chunk = String::from_utf8_lossy(&self.buf);
                    for piece in chunk.split(['\n', '\r']) {
                        let line = trim_line(piece);
                        if !line.is_empty() {
                            self.pending.push_back(line.to_string());
                        }
                    }
                    if !self.pending.is_empty() {
                        return Ok(());
                    }
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => {
                    self.done = true;
                    return Err(e.into());
                }
            }
        }
    }
}

impl<R: BufRead> Iterator for LineReader<R> {
    type Item = SourceResult<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pending.is_empty() && !self.done {
            if let Err(e) = self.fill() {
                return Some(Err(e));
            }
        }
        self.pending.pop_front().map(Ok)
    }
}
