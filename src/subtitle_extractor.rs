use std::fmt;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use log::debug;
use once_cell::sync::Lazy;
use quick_xml::NsReader;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use regex::Regex;

use crate::text_normalizer;

// @module: Caption parsing and transcript assembly

// @const: TTML namespace URI
const TTML_NS: &[u8] = b"http://www.w3.org/ns/ttml";

// @const: SRT cue header regex (sequence number plus timestamp range)
static SRT_CUE_HEADER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d+\s*\n\d{2}:\d{2}:\d{2},\d{3} --> \d{2}:\d{2}:\d{2},\d{3}\s*\n").unwrap()
});

// @const: Loose TTML paragraph regex for the malformed-document fallback
static TTML_PARAGRAPH_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<p[^>]*>(.*?)</p>").unwrap()
});

/// Caption container format, detected from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubtitleFormat {
    /// Timed Text Markup Language (XML-based)
    Ttml,
    /// WebVTT
    Vtt,
    /// SubRip
    Srt,
    /// Anything else, handled with a whole-blob cleanup
    Unknown,
}

impl SubtitleFormat {
    /// Detect the caption format from a file path's extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        let extension = path
            .as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase());

        match extension.as_deref() {
            Some("ttml") => SubtitleFormat::Ttml,
            Some("vtt") => SubtitleFormat::Vtt,
            Some("srt") => SubtitleFormat::Srt,
            _ => SubtitleFormat::Unknown,
        }
    }
}

impl fmt::Display for SubtitleFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SubtitleFormat::Ttml => write!(f, "ttml"),
            SubtitleFormat::Vtt => write!(f, "vtt"),
            SubtitleFormat::Srt => write!(f, "srt"),
            SubtitleFormat::Unknown => write!(f, "unknown"),
        }
    }
}

// @struct: Raw caption payload with its detected format
#[derive(Debug, Clone)]
pub struct SubtitleDocument {
    // @field: Raw caption file content
    pub content: String,

    // @field: Detected container format
    pub format: SubtitleFormat,
}

impl SubtitleDocument {
    /// Create a document from in-memory content
    pub fn new(content: impl Into<String>, format: SubtitleFormat) -> Self {
        SubtitleDocument {
            content: content.into(),
            format,
        }
    }

    /// Read a caption file, detecting the format from its extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read caption file: {}", path.display()))?;

        Ok(SubtitleDocument {
            content,
            format: SubtitleFormat::from_path(path),
        })
    }

    /// Extract a clean transcript from the document
    ///
    /// TTML gets a strict XML pass first; when that fails (truncated downloads
    /// are common) the paragraph-scanning fallback runs instead. The remaining
    /// formats are line-oriented and never fail, so the result is always a
    /// transcript, possibly an empty one.
    pub fn extract(&self) -> Transcript {
        let lines = match self.format {
            SubtitleFormat::Ttml => match Self::parse_ttml(&self.content) {
                Ok(lines) => lines,
                Err(e) => {
                    debug!("Strict TTML parse failed ({}), scanning for paragraph spans", e);
                    Self::scan_ttml_paragraphs(&self.content)
                }
            },
            SubtitleFormat::Vtt => Self::parse_vtt(&self.content),
            SubtitleFormat::Srt => Self::parse_srt(&self.content),
            SubtitleFormat::Unknown => vec![text_normalizer::normalize(&self.content)],
        };

        Transcript::from_lines(lines)
    }

    /// Parse a well-formed TTML document into one normalized line per
    /// paragraph element
    ///
    /// Only elements named `p` in the TTML namespace count; all their
    /// descendant text is concatenated, so inline spans and line breaks do
    /// not split a caption. Returns an error for malformed XML, including a
    /// document that ends inside an open paragraph, and the caller decides
    /// whether to fall back to pattern scanning.
    pub fn parse_ttml(content: &str) -> Result<Vec<String>> {
        let mut reader = NsReader::from_str(content);
        let mut lines = Vec::new();
        let mut paragraph: Option<String> = None;
        let mut depth = 0usize;

        loop {
            match reader.read_resolved_event()? {
                (ns, Event::Start(e)) => {
                    if paragraph.is_some() {
                        depth += 1;
                    } else if Self::is_ttml_paragraph(ns, &e) {
                        paragraph = Some(String::new());
                        depth = 0;
                    }
                }
                (ns, Event::Empty(e)) => {
                    // Self-closing <p/> still produces a line; <br/> inside a
                    // paragraph contributes no text
                    if paragraph.is_none() && Self::is_ttml_paragraph(ns, &e) {
                        lines.push(String::new());
                    }
                }
                (_, Event::End(_)) => {
                    if paragraph.is_some() {
                        if depth == 0 {
                            if let Some(text) = paragraph.take() {
                                lines.push(text_normalizer::normalize(&text));
                            }
                        } else {
                            depth -= 1;
                        }
                    }
                }
                (_, Event::Text(e)) => {
                    if let Some(text) = paragraph.as_mut() {
                        text.push_str(&e.unescape()?);
                    }
                }
                (_, Event::CData(e)) => {
                    if let Some(text) = paragraph.as_mut() {
                        text.push_str(&String::from_utf8_lossy(&e));
                    }
                }
                (_, Event::Eof) => {
                    if paragraph.is_some() {
                        return Err(anyhow!("Document ended inside an open paragraph"));
                    }
                    break;
                }
                _ => {}
            }
        }

        Ok(lines)
    }

    /// Scan raw content for `<p ...>...</p>` spans without requiring
    /// well-formed XML
    ///
    /// This is the fallback for truncated or malformed TTML documents. It
    /// never fails; when no spans match it yields no lines.
    pub fn scan_ttml_paragraphs(content: &str) -> Vec<String> {
        TTML_PARAGRAPH_REGEX
            .captures_iter(content)
            .map(|caps| text_normalizer::normalize(&caps[1]))
            .collect()
    }

    /// Extract caption text lines from WebVTT content
    ///
    /// Skips the two header lines, cue timing lines containing the `-->`
    /// marker, blank lines, and bare cue sequence numbers.
    pub fn parse_vtt(content: &str) -> Vec<String> {
        let mut lines = Vec::new();

        for (index, line) in content.lines().enumerate() {
            if index < 2 || line.contains("-->") || line.trim().is_empty() {
                continue;
            }

            // Cue sequence numbers sit on their own line
            if line.trim().chars().all(|c| c.is_ascii_digit()) {
                continue;
            }

            lines.push(text_normalizer::normalize(line));
        }

        lines
    }

    /// Extract caption text lines from SubRip content
    ///
    /// Cue headers (a sequence number line followed by a `HH:MM:SS,mmm -->
    /// HH:MM:SS,mmm` range) are stripped first, then every remaining
    /// non-blank line is normalized.
    pub fn parse_srt(content: &str) -> Vec<String> {
        let stripped = SRT_CUE_HEADER_REGEX.replace_all(content, "\n");

        stripped
            .split('\n')
            .filter(|line| !line.trim().is_empty())
            .map(text_normalizer::normalize)
            .collect()
    }

    /// Check whether a start tag is a paragraph element in the TTML namespace
    fn is_ttml_paragraph(ns: ResolveResult, e: &BytesStart) -> bool {
        matches!(ns, ResolveResult::Bound(Namespace(n)) if n == TTML_NS)
            && e.local_name().as_ref() == b"p"
    }
}

/// Deduplicated plain-text transcript
#[derive(Debug, Clone, PartialEq)]
pub struct Transcript {
    /// Normalized caption lines in display order
    pub lines: Vec<String>,
}

impl Transcript {
    /// Build a transcript, collapsing immediately adjacent duplicate lines
    ///
    /// A line is kept when it is non-empty after trimming and differs from
    /// the previously kept line. Auto-generated captions re-emit overlapping
    /// text across cues, which this removes; a repeated line separated by
    /// other dialogue survives.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut kept: Vec<String> = Vec::new();

        for line in lines {
            let trimmed = line.as_ref().trim();
            if trimmed.is_empty() {
                continue;
            }
            if kept.last().map(|last| last.as_str()) == Some(trimmed) {
                continue;
            }
            kept.push(trimmed.to_string());
        }

        Transcript { lines: kept }
    }

    /// True when no usable caption lines were found
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of transcript lines
    pub fn len(&self) -> usize {
        self.lines.len()
    }
}

impl fmt::Display for Transcript {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
