// The admission predicate deciding which tokens count toward a wordbag.

use super::stopwords::Stopwords;
use crate::text::tokenizer::is_letter;

/// Filter thresholds plus the stopword set, fixed for a corpus's lifetime.
#[derive(Debug, Clone)]
pub struct WordFilter {
    /// Minimum word length in characters (inclusive)
    pub min_chars: usize,
    /// Maximum word length in characters (inclusive)
    pub max_chars: usize,
    /// Admit words containing digits, underscores or punctuation
    pub allow_nonalpha: bool,
    pub stopwords: Stopwords,
}

impl Default for WordFilter {
    fn default() -> Self {
        Self {
            min_chars: 3,
            max_chars: 18,
            allow_nonalpha: false,
            stopwords: Stopwords::default(),
        }
    }
}

impl WordFilter {
    /// Should `token` contribute to a wordbag?
    pub fn admit(&self, token: &str) -> bool {
        let alpha = self.allow_nonalpha || token.chars().all(is_letter);
        if !alpha || self.stopwords.contains(token) {
            return false;
        }
        let n = token.chars().count();
        n >= self.min_chars && n <= self.max_chars
    }
}
