// Text primitives for the note pipeline: cleanup, tokenization, and
// sentence splitting. Every function here is a pure function of its input;
// downstream stages call normalize() themselves so callers can pass raw
// extracted text directly.
use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

static HORIZONTAL_WS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]+").unwrap());

static BLANK_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

static NON_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9\s-]").unwrap());

static WS_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

// Common English stopwords plus filler words that dominate lecture decks
// and scanned handouts without carrying any content.
pub static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "about", "above", "after", "again", "all", "also", "an", "and",
        "any", "are", "as", "at", "be", "because", "been", "before", "being",
        "between", "both", "but", "by", "can", "could", "did", "do", "does",
        "down", "during", "each", "few", "for", "from", "further", "had",
        "has", "have", "he", "her", "here", "him", "his", "how", "if", "in",
        "into", "is", "it", "its", "just", "more", "most", "my", "no", "nor",
        "not", "now", "of", "off", "on", "once", "only", "or", "other",
        "our", "out", "over", "own", "same", "she", "should", "so", "some",
        "such", "than", "that", "the", "their", "them", "then", "there",
        "these", "they", "this", "those", "through", "to", "too", "under",
        "until", "up", "very", "was", "we", "were", "what", "when", "where",
        "which", "while", "who", "why", "will", "with", "would", "you",
        "your",
        // domain filler
        "data", "page", "slide", "figure", "table", "section", "chapter",
        "article",
    ]
    .iter()
    .copied()
    .collect()
});

/// Clean up raw extracted text: non-breaking spaces become regular spaces,
/// runs of tabs/spaces collapse to one space, runs of three or more
/// newlines collapse to exactly two, and the result is trimmed. Carriage
/// returns are unified to `\n` first so CRLF input behaves like Unix input.
/// Idempotent.
pub fn normalize(text: &str) -> String {
    let unified = text
        .replace('\u{00a0}', " ")
        .replace("\r\n", "\n")
        .replace('\r', "\n");
    let spaced = HORIZONTAL_WS.replace_all(&unified, " ");
    let limited = BLANK_RUNS.replace_all(&spaced, "\n\n");
    limited.trim().to_string()
}

/// Lowercase the text, blank out everything that is not a letter, digit, or
/// hyphen, then split on whitespace. Tokens of length <= 2 and stopwords
/// are dropped; duplicates and ordering are preserved.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = normalize(text).to_lowercase();
    let stripped = NON_TOKEN.replace_all(&lowered, " ");
    stripped
        .split_whitespace()
        .filter(|word| word.len() > 2 && !STOP_WORDS.contains(*word))
        .map(String::from)
        .collect()
}

/// Split text into sentences at `.`, `!`, or `?` followed by whitespace.
/// The punctuation stays attached to the preceding sentence. Fragments of
/// two characters or fewer are discarded; text without any terminal
/// punctuation comes back as a single sentence.
pub fn split_sentences(text: &str) -> Vec<String> {
    let flat = WS_RUNS.replace_all(&normalize(text), " ").into_owned();
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut chars = flat.chars().peekable();
    while let Some(c) = chars.next() {
        current.push(c);
        if matches!(c, '.' | '!' | '?') && chars.peek().map_or(false, |n| n.is_whitespace()) {
            chars.next();
            push_sentence(&mut sentences, &current);
            current.clear();
        }
    }
    push_sentence(&mut sentences, &current);
    sentences
}

fn push_sentence(sentences: &mut Vec<String>, fragment: &str) {
    let trimmed = fragment.trim();
    if trimmed.chars().count() > 2 {
        sentences.push(trimmed.to_string());
    }
}
