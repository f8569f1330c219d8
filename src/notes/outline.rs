// Heading-based outline segmentation over extracted text.
//
// Lines are classified in a single pass with no backtracking: heading-like
// lines open a new outline entry, everything else accumulates into a body
// buffer that flushes as a "Section" entry whenever a heading (or the end
// of input) is reached.
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::text::normalize;

/// Label for body chunks that have no detected heading of their own.
pub const SECTION_LABEL: &str = "Section";

// Heading lines must stay readable as a title line.
const MAX_HEADING_LEN: usize = 80;

static LINE_BREAKS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n+").unwrap());

// Optional "1." / "-" / "•" prefix, then a capitalized run of plain words.
static HEADING_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:\d+\.|-|•)?\s*[A-Z][A-Za-z0-9\s-]{3,}$").unwrap());

/// One entry of the document outline. A detected heading produces an entry
/// with an empty body; the prose that follows it lands in a subsequent
/// "Section" entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineChunk {
    pub heading: String,
    pub body: String,
}

fn is_heading(line: &str) -> bool {
    line.chars().count() < MAX_HEADING_LEN && HEADING_PATTERN.is_match(line)
}

/// Scan the text line by line and group body lines under the preceding
/// heading. Chunks come back in document order.
pub fn build_outline(text: &str) -> Vec<OutlineChunk> {
    let cleaned = normalize(text);
    let mut chunks: Vec<OutlineChunk> = Vec::new();
    let mut buffer: Vec<String> = Vec::new();

    for raw_line in LINE_BREAKS.split(&cleaned) {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }
        if is_heading(line) {
            if !buffer.is_empty() {
                chunks.push(OutlineChunk {
                    heading: SECTION_LABEL.to_string(),
                    body: buffer.join(" "),
                });
                buffer.clear();
            }
            chunks.push(OutlineChunk {
                heading: line.to_string(),
                body: String::new(),
            });
        } else {
            buffer.push(line.to_string());
        }
    }

    if !buffer.is_empty() {
        chunks.push(OutlineChunk {
            heading: SECTION_LABEL.to_string(),
            body: buffer.join(" "),
        });
    }

    chunks
}
