// Frequency-based term ranking and takeaway sentence selection.
use std::collections::{HashMap, HashSet};

use super::text::{split_sentences, tokenize};

/// Default number of takeaway sentences in a notes document.
pub const DEFAULT_TAKEAWAY_COUNT: usize = 6;

/// Default number of ranked terms in a notes document.
pub const DEFAULT_TERM_COUNT: usize = 12;

// Length contribution to a sentence score is capped so very long sentences
// cannot win on length alone.
const LENGTH_CAP: usize = 8;

/// Return the `k` most frequent tokens in the text, most frequent first.
/// Ties keep first-occurrence order.
pub fn top_terms(text: &str, k: usize) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut order: Vec<String> = Vec::new();
    for token in tokenize(text) {
        match counts.get_mut(&token) {
            Some(count) => *count += 1,
            None => {
                counts.insert(token.clone(), 1);
                order.push(token);
            }
        }
    }

    let mut ranked: Vec<(String, usize)> = order
        .into_iter()
        .map(|token| {
            let count = counts[&token];
            (token, count)
        })
        .collect();
    // Stable sort: equal counts stay in first-occurrence order.
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    ranked.into_iter().take(k).map(|(token, _)| token).collect()
}

/// Pick the `n` highest-scoring sentences. A sentence scores by how many
/// distinct content tokens it has plus its capped token count, so dense and
/// reasonably long sentences rise to the top. Ties keep document order.
pub fn select_takeaways(text: &str, n: usize) -> Vec<String> {
    let mut scored: Vec<(String, usize)> = split_sentences(text)
        .into_iter()
        .map(|sentence| {
            let score = sentence_score(&sentence);
            (sentence, score)
        })
        .collect();
    scored.sort_by(|a, b| b.1.cmp(&a.1));

    scored
        .into_iter()
        .take(n)
        .map(|(sentence, _)| sentence)
        .collect()
}

fn sentence_score(sentence: &str) -> usize {
    let tokens = tokenize(sentence);
    let distinct: HashSet<&str> = tokens.iter().map(String::as_str).collect();
    distinct.len() + tokens.len().min(LENGTH_CAP)
}
