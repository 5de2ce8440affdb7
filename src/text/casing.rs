// Sentence-mode casing heuristics.
//
// When input is one sentence per line, the first word of each line is
// capitalized for grammatical reasons only. We lower-case it when the
// corpus shows the word naturally occurring in lower case elsewhere, and
// leave proper nouns and all-caps acronyms alone.

use std::collections::HashMap;

/// Collapse every whitespace run to a single space and trim both ends.
pub fn singlespace(line: &str) -> String {
    line.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Strip a trailing `\n` / `\r\n` (and any stray `\r`).
pub fn chomp(line: &str) -> &str {
    line.trim_end_matches(|c| c == '\r' || c == '\n')
}

/// Corpus-wide counts of words seen in all-lowercase and all-uppercase form.
///
/// Built in a prepass over the input, then frozen and passed explicitly to
/// the down-casing functions.
#[derive(Debug, Default, Clone)]
pub struct CaseStats {
    lowers: HashMap<String, usize>,
    uppers: HashMap<String, usize>,
}

impl CaseStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record every whitespace-separated word of a line.
    pub fn observe_line(&mut self, line: &str) {
        for word in line.split_whitespace() {
            self.observe_word(word);
        }
    }

    pub fn observe_word(&mut self, word: &str) {
        let lower = word.to_lowercase();
        if lower == word {
            *self.lowers.entry(lower).or_insert(0) += 1;
        }
        let upper = word.to_uppercase();
        if upper == word {
            *self.uppers.entry(upper).or_insert(0) += 1;
        }
    }

    /// How often `word` was seen exactly as written in lower case.
    pub fn lower_count(&self, word: &str) -> usize {
        self.lowers.get(word).copied().unwrap_or(0)
    }

    /// How often `word` was seen exactly as written in upper case.
    pub fn upper_count(&self, word: &str) -> usize {
        self.uppers.get(word).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.lowers.is_empty() && self.uppers.is_empty()
    }
}

/// Lower-case a sentence-initial word if the corpus supports it.
///
/// The word is lower-cased only when its lower-case form was observed as a
/// naturally occurring word and the word is not already all-caps.
pub fn downcase_word_first(word: &str, stats: &CaseStats) -> String {
    let lower = word.to_lowercase();
    if stats.lower_count(&lower) > 0 && word.to_uppercase() != word {
        lower
    } else {
        word.to_string()
    }
}

/// Apply [`downcase_word_first`] to the first word of a line.
///
/// The line is re-joined with single spaces.
pub fn downcase_sentence_first(line: &str, stats: &CaseStats) -> String {
    let mut words = line.split_whitespace();
    let Some(first) = words.next() else {
        return String::new();
    };
    let mut out = downcase_word_first(first, stats);
    for word in words {
        out.push(' ');
        out.push_str(word);
    }
    out
}
