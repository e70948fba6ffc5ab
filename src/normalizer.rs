/*!
 * File content decoding, cleanup and truncation
 */

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use encoding_rs::WINDOWS_1252;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::config::ContentLimits;
use crate::error::{CodePdfError, Result};
use crate::types::{NormalizedContent, Truncation, TruncationReason};

const BOM: char = '\u{FEFF}';

/// Characters the output fonts cannot show: control characters other than
/// tab and newline, replacement and non-characters, and emoji and symbol
/// blocks.
static UNPRINTABLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"[\x00-\x08\x0B\x0C\x0E-\x1F\x7F",
        r"\x{FFFD}\x{FFFE}\x{FFFF}",
        r"\x{1F300}-\x{1F9FF}\x{2600}-\x{26FF}\x{2700}-\x{27BF}]",
    ))
    .expect("unprintable character class is valid")
});

/// Decode raw bytes as UTF-8, falling back to a single-byte Latin encoding
pub fn decode(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => {
            let (text, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
            text
        }
    }
}

/// Read and decode the file at `path`
pub fn read_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| CodePdfError::read(path, e))?;
    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(e) => {
            debug!(path = %path.display(), "not valid UTF-8, decoding as Windows-1252");
            Ok(decode(e.as_bytes()).into_owned())
        }
    }
}

/// Drop a single byte-order mark at the very start of `text`
pub fn strip_bom(text: &str) -> &str {
    text.strip_prefix(BOM).unwrap_or(text)
}

/// Split `text` into lines, treating `\r\n`, `\r` and `\n` alike.
///
/// A trailing line break does not start an extra empty line.
pub fn split_lines(text: &str) -> Vec<String> {
    let unified = text.replace("\r\n", "\n").replace('\r', "\n");
    unified.lines().map(str::to_string).collect()
}

/// Keep at most the lines allowed by `limits`.
///
/// Oversized files keep `large_file_lines` regardless of length; other
/// files are capped at `max_lines`. Returns the truncation that applied.
pub fn truncate_lines(
    lines: &mut Vec<String>,
    oversized: bool,
    limits: &ContentLimits,
) -> Option<Truncation> {
    let total = lines.len();
    let (reason, keep) = if oversized {
        (TruncationReason::Large, limits.large_file_lines)
    } else if total > limits.max_lines {
        (TruncationReason::Long, limits.max_lines)
    } else {
        return None;
    };

    lines.truncate(keep);
    Some(Truncation {
        reason,
        shown: lines.len(),
        total,
    })
}

/// Expand tabs and remove characters the document cannot show
pub fn sanitize_line(line: &str, tab_width: usize) -> String {
    let expanded = line.replace('\t', &" ".repeat(tab_width));
    UNPRINTABLE.replace_all(&expanded, "").into_owned()
}

/// Prefix `line` with its right-justified 1-based line number
pub fn number_line(number: usize, line: &str, width: usize) -> String {
    format!("{:>width$} | {}", number, line, width = width)
}

/// Turn decoded `text` into numbered, display-ready lines
pub fn normalize_text(text: &str, oversized: bool, limits: &ContentLimits) -> NormalizedContent {
    let mut lines = split_lines(strip_bom(text));
    let truncation = truncate_lines(&mut lines, oversized, limits);

    let lines = lines
        .iter()
        .enumerate()
        .map(|(index, line)| {
            number_line(
                index + 1,
                &sanitize_line(line, limits.tab_width),
                limits.line_number_width,
            )
        })
        .collect();

    NormalizedContent { lines, truncation }
}

/// Read the file at `path` and normalize its content
pub fn normalize_file(
    path: &Path,
    oversized: bool,
    limits: &ContentLimits,
) -> Result<NormalizedContent> {
    let text = read_text(path)?;
    Ok(normalize_text(&text, oversized, limits))
}
