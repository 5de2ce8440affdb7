// Adjacent-token pair statistics over raw (unfiltered) token sequences.

use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How far the bigram window slides over a document's tokens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NgramWindow {
    /// Stop two positions before the end, so the last adjacent pair of each
    /// document is never counted. Matches the exchange files produced by
    /// earlier versions of this pipeline.
    #[default]
    Legacy,
    /// Every adjacent pair, including the final one.
    Full,
}

impl NgramWindow {
    /// Number of window start positions for a sequence of `len` tokens.
    pub fn positions(self, len: usize) -> usize {
        match self {
            NgramWindow::Legacy => len.saturating_sub(2),
            NgramWindow::Full => len.saturating_sub(1),
        }
    }
}

impl FromStr for NgramWindow {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "legacy" => Ok(NgramWindow::Legacy),
            "full" => Ok(NgramWindow::Full),
            other => Err(format!("unknown ngram window '{other}' (expected legacy or full)")),
        }
    }
}

/// Iterate over the adjacent pairs of `tokens` under `window`.
pub fn bigrams(tokens: &[String], window: NgramWindow) -> impl Iterator<Item = (&str, &str)> {
    (0..window.positions(tokens.len())).map(move |i| (tokens[i].as_str(), tokens[i + 1].as_str()))
}

/// A multiset of ordered word pairs.
#[derive(Debug, Clone, Default)]
pub struct BigramCounts {
    /// first word -> second word -> count
    pairs: HashMap<String, HashMap<String, usize>>,
    total: usize,
}

impl BigramCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, first: &str, second: &str) {
        *self
            .pairs
            .entry(first.to_string())
            .or_default()
            .entry(second.to_string())
            .or_insert(0) += 1;
        self.total += 1;
    }

    /// How often the ordered pair `(first, second)` was seen.
    pub fn count(&self, first: &str, second: &str) -> usize {
        self.pairs
            .get(first)
            .and_then(|seconds| seconds.get(second))
            .copied()
            .unwrap_or(0)
    }

    pub fn contains(&self, first: &str, second: &str) -> bool {
        self.count(first, second) > 0
    }

    /// Number of distinct pairs.
    pub fn len(&self) -> usize {
        self.pairs.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Total number of pair occurrences.
    pub fn total(&self) -> usize {
        self.total
    }

    /// The `n` most frequent pairs, ties broken alphabetically.
    pub fn most_common(&self, n: usize) -> Vec<((&str, &str), usize)> {
        let mut all: Vec<((&str, &str), usize)> = self
            .pairs
            .iter()
            .flat_map(|(first, seconds)| {
                seconds
                    .iter()
                    .map(move |(second, &count)| ((first.as_str(), second.as_str()), count))
            })
            .collect();
        all.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        all.truncate(n);
        all
    }
}

impl<'a> Extend<(&'a str, &'a str)> for BigramCounts {
    fn extend<I: IntoIterator<Item = (&'a str, &'a str)>>(&mut self, iter: I) {
        for (first, second) in iter {
            self.add(first, second);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_legacy_window_skips_last_pair() {
        let t = toks(&["a", "b", "c", "d"]);
        let pairs: Vec<_> = bigrams(&t, NgramWindow::Legacy).collect();
        assert_eq!(pairs, vec![("a", "b"), ("b", "c")]);
    }

    #[test]
    fn test_full_window_includes_last_pair() {
        let t = toks(&["a", "b", "c", "d"]);
        let pairs: Vec<_> = bigrams(&t, NgramWindow::Full).collect();
        assert_eq!(pairs, vec![("a", "b"), ("b", "c"), ("c", "d")]);
    }

    #[test]
    fn test_short_sequences() {
        assert_eq!(bigrams(&toks(&["a", "b"]), NgramWindow::Legacy).count(), 0);
        assert_eq!(bigrams(&toks(&["a", "b"]), NgramWindow::Full).count(), 1);
        assert_eq!(bigrams(&[], NgramWindow::Full).count(), 0);
    }

    #[test]
    fn test_counts_are_ordered() {
        let mut counts = BigramCounts::new();
        counts.extend([("ocean", "blue"), ("ocean", "blue"), ("deep", "sea")]);
        assert_eq!(counts.count("ocean", "blue"), 2);
        assert!(!counts.contains("blue", "ocean"));
        assert_eq!(counts.len(), 2);
        assert_eq!(counts.total(), 3);
        assert_eq!(counts.most_common(1), vec![(("ocean", "blue"), 2)]);
    }
}
