// Document: an ordered token sequence plus its filtered wordbag.
//
// The wordbag is computed on first request and cached for the document's
// lifetime. Computing it is also what grows the shared vocabulary, so ids
// depend on the order in which documents are first bagged.

use std::collections::BTreeMap;
use std::fmt;

use super::filter::WordFilter;
use super::ngrams::{self, NgramWindow};
use super::vocabulary::{Vocabulary, WordId};
use crate::error::Result;

/// A wordbag key: a vocabulary id, or the raw word when no vocabulary is
/// attached.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Term {
    Id(WordId),
    Word(String),
}

impl Term {
    /// The vocabulary id, if this term has one.
    pub fn id(&self) -> Option<WordId> {
        match self {
            Term::Id(id) => Some(*id),
            Term::Word(_) => None,
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Id(id) => write!(f, "{id}"),
            Term::Word(word) => f.write_str(word),
        }
    }
}

/// Term -> occurrence count, ordered by term.
pub type WordBag = BTreeMap<Term, usize>;

#[derive(Debug, Clone)]
pub struct Document {
    id: usize,
    name: String,
    tokens: Vec<String>,
    wordbag: Option<WordBag>,
}

impl Document {
    /// Create a document. Its display name is `"<id>.<source>"`.
    pub fn new(id: usize, source: &str, tokens: Vec<String>) -> Self {
        Self {
            id,
            name: format!("{id}.{source}"),
            tokens,
            wordbag: None,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The raw token sequence, before any filtering.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// The filtered wordbag, computed once and then reused.
    ///
    /// Later calls return the cached bag even if given a different filter.
    pub fn wordbag(&mut self, filter: &WordFilter, vocab: Option<&mut Vocabulary>) -> &WordBag {
        let tokens = &self.tokens;
        self.wordbag.get_or_insert_with(|| {
            let mut bag = WordBag::new();
            let mut vocab = vocab;
            for token in tokens.iter().filter(|t| filter.admit(t)) {
                let term = match vocab.as_deref_mut() {
                    Some(vocab) => Term::Id(vocab.id(token)),
                    None => Term::Word(token.clone()),
                };
                *bag.entry(term).or_insert(0) += 1;
            }
            bag
        })
    }

    /// The cached wordbag, if it has been computed.
    pub fn cached_wordbag(&self) -> Option<&WordBag> {
        self.wordbag.as_ref()
    }

    /// Cached (term, count) pairs in term order; empty before bagging.
    pub fn entries(&self) -> impl Iterator<Item = (&Term, usize)> {
        self.wordbag
            .iter()
            .flat_map(|bag| bag.iter().map(|(term, &count)| (term, count)))
    }

    /// Number of distinct admitted terms (0 before bagging).
    pub fn count(&self) -> usize {
        self.wordbag.as_ref().map_or(0, BTreeMap::len)
    }

    /// Total admitted token occurrences (0 before bagging).
    pub fn total(&self) -> usize {
        self.entries().map(|(_, count)| count).sum()
    }

    /// Adjacent raw-token pairs.
    pub fn bigrams(&self, window: NgramWindow) -> impl Iterator<Item = (&str, &str)> {
        ngrams::bigrams(&self.tokens, window)
    }

    /// The `n` most frequent terms rendered as words, highest count first.
    pub fn most_common(&self, n: usize, vocab: Option<&Vocabulary>) -> Result<Vec<(String, usize)>> {
        let mut entries: Vec<(&Term, usize)> = self.entries().collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries
            .into_iter()
            .take(n)
            .map(|(term, count)| {
                let word = match (term, vocab) {
                    (Term::Id(id), Some(vocab)) => vocab.word_of(*id)?.to_string(),
                    _ => term.to_string(),
                };
                Ok((word, count))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::stopwords::Stopwords;

    fn doc(words: &[&str]) -> Document {
        Document::new(1, "test", words.iter().map(|w| w.to_string()).collect())
    }

    fn filter() -> WordFilter {
        WordFilter {
            stopwords: Stopwords::from_words(["the", "a"], false),
            ..WordFilter::default()
        }
    }

    #[test]
    fn test_wordbag_with_vocabulary() {
        let mut vocab = Vocabulary::new();
        let mut d = doc(&["the", "cat", "a", "x", "elephant", "cat"]);
        let bag = d.wordbag(&filter(), Some(&mut vocab)).clone();

        assert_eq!(bag.len(), 2);
        assert_eq!(bag[&Term::Id(1)], 2);
        assert_eq!(bag[&Term::Id(2)], 1);
        assert_eq!(vocab.word_of(1).unwrap(), "cat");
        assert_eq!(vocab.word_of(2).unwrap(), "elephant");
        assert_eq!(d.count(), 2);
        assert_eq!(d.total(), 3);
    }

    #[test]
    fn test_wordbag_without_vocabulary_uses_words() {
        let mut d = doc(&["the", "cat", "elephant"]);
        let bag = d.wordbag(&filter(), None);
        let keys: Vec<String> = bag.keys().map(Term::to_string).collect();
        assert_eq!(keys, vec!["cat", "elephant"]);
    }

    #[test]
    fn test_wordbag_is_memoized() {
        let mut vocab = Vocabulary::new();
        let mut d = doc(&["cat", "dog"]);
        d.wordbag(&filter(), Some(&mut vocab));

        // A stricter filter and a fresh vocabulary don't change the cached bag
        let strict = WordFilter {
            min_chars: 10,
            ..filter()
        };
        let mut other = Vocabulary::new();
        assert_eq!(d.wordbag(&strict, Some(&mut other)).len(), 2);
        assert!(other.is_empty());
    }

    #[test]
    fn test_count_before_bagging_is_zero() {
        let d = doc(&["cat"]);
        assert_eq!(d.count(), 0);
        assert!(d.cached_wordbag().is_none());
    }

    #[test]
    fn test_name_includes_id() {
        assert_eq!(doc(&[]).name(), "1.test");
    }

    #[test]
    fn test_most_common() {
        let mut vocab = Vocabulary::new();
        let mut d = doc(&["dog", "cat", "cat", "bird", "cat", "dog"]);
        d.wordbag(&filter(), Some(&mut vocab));
        let top = d.most_common(2, Some(&vocab)).unwrap();
        assert_eq!(top, vec![("cat".to_string(), 3), ("dog".to_string(), 2)]);
    }
}
