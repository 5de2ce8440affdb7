// Corpus: documents sharing one vocabulary, one stopword set and one
// filter configuration.
//
// Loading is a single forward pass per source: lines accumulate tokens
// into the current document until the end-of-document sentinel line, and
// whatever remains at end of input becomes the last document. In sentence
// mode a prepass over every source first collects the case statistics used
// to decide whether a line's first word should be lower-cased.

use std::fmt::Write as _;

use tracing::{debug, info};

use super::document::Document;
use super::filter::WordFilter;
use super::ngrams::{BigramCounts, NgramWindow};
use super::source::{DocumentSource, Line};
use super::stopwords::{StopwordSource, Stopwords};
use super::vocabulary::Vocabulary;
use crate::error::Result;
use crate::text::casing::{downcase_sentence_first, downcase_word_first, singlespace, CaseStats};
use crate::text::tokenizer::encode;

/// Default end-of-document sentinel line.
pub const EOD_LINE: &str = "---END.OF.DOCUMENT---";

/// How raw input becomes documents and which words they keep.
#[derive(Debug, Clone, PartialEq)]
pub struct CorpusOptions {
    /// Input is one sentence per line; lower-case sentence-initial words
    /// when the corpus supports it
    pub sentences: bool,
    /// Split lines with the invertible tokenizer (otherwise on whitespace)
    pub tokenize: bool,
    /// Lower-case whole lines (ignored in sentence mode)
    pub downcase: bool,
    /// Stopwords match case-sensitively
    pub cased_stopwords: bool,
    pub allow_nonalpha: bool,
    pub min_chars: usize,
    pub max_chars: usize,
    /// End-of-document sentinel line
    pub eod: String,
}

impl Default for CorpusOptions {
    fn default() -> Self {
        Self {
            sentences: true,
            tokenize: true,
            downcase: false,
            cased_stopwords: false,
            allow_nonalpha: false,
            min_chars: 3,
            max_chars: 18,
            eod: EOD_LINE.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Corpus {
    documents: Vec<Document>,
    vocab: Vocabulary,
    filter: WordFilter,
    options: CorpusOptions,
}

impl Corpus {
    /// An empty corpus, loading stopwords from `stopwords`.
    pub fn new(options: CorpusOptions, stopwords: &StopwordSource) -> Self {
        let stopwords = Stopwords::load(stopwords, options.cased_stopwords);
        Self::with_stopwords(options, stopwords)
    }

    /// An empty corpus with an already loaded stopword set.
    pub fn with_stopwords(options: CorpusOptions, stopwords: Stopwords) -> Self {
        let filter = WordFilter {
            min_chars: options.min_chars,
            max_chars: options.max_chars,
            allow_nonalpha: options.allow_nonalpha,
            stopwords,
        };
        Self {
            documents: Vec::new(),
            vocab: Vocabulary::new(),
            filter,
            options,
        }
    }

    /// Build a corpus from sources in one go.
    pub fn from_sources(
        options: CorpusOptions,
        stopwords: &StopwordSource,
        sources: &[DocumentSource],
    ) -> Result<Self> {
        let mut corpus = Self::new(options, stopwords);
        corpus.load(sources)?;
        Ok(corpus)
    }

    /// Append the documents of every source. Returns how many were added.
    ///
    /// Document ids continue from the documents already present.
    pub fn load(&mut self, sources: &[DocumentSource]) -> Result<usize> {
        let before = self.documents.len();

        let mut stats = CaseStats::new();
        if self.options.sentences {
            for source in sources {
                count_mixed_case(source, &self.options.eod, &mut stats)?;
            }
        }

        for source in sources {
            let name = source.name();
            let loaded = self.documents.len();
            let mut pending: Vec<String> = Vec::new();

            source.for_each_line(|line| {
                if line.is_sentinel(&self.options.eod) {
                    let tokens = std::mem::take(&mut pending);
                    self.push_document(&name, tokens);
                } else {
                    pending.extend(self.line_tokens(line, &stats));
                }
                Ok(())
            })?;
            if !pending.is_empty() {
                self.push_document(&name, pending);
            }

            info!(
                source = %name,
                documents = self.documents.len() - loaded,
                "Loaded documents"
            );
        }

        Ok(self.documents.len() - before)
    }

    /// Append one document built from `tokens`; returns its id.
    pub fn push_document(&mut self, source: &str, tokens: Vec<String>) -> usize {
        let id = self.documents.len() + 1;
        self.documents.push(Document::new(id, source, tokens));
        id
    }

    /// Turn one input line into tokens according to the options.
    fn line_tokens(&self, line: Line<'_>, stats: &CaseStats) -> Vec<String> {
        match line {
            Line::Text(text) => {
                let mut text = singlespace(text);
                if self.options.sentences {
                    text = downcase_sentence_first(&text, stats);
                } else if self.options.downcase {
                    text = text.to_lowercase();
                }
                if self.options.tokenize {
                    encode(&text)
                } else {
                    text.split_whitespace().map(str::to_string).collect()
                }
            }
            Line::Tokens(tokens) => {
                let mut tokens = tokens.to_vec();
                if self.options.sentences {
                    if let Some(first) = tokens.first_mut() {
                        *first = downcase_word_first(first, stats);
                    }
                } else if self.options.downcase {
                    for token in &mut tokens {
                        *token = token.to_lowercase();
                    }
                }
                tokens
            }
        }
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn filter(&self) -> &WordFilter {
        &self.filter
    }

    pub fn options(&self) -> &CorpusOptions {
        &self.options
    }

    /// Bag every document that hasn't been bagged yet, growing the
    /// vocabulary in document order.
    pub fn compute_wordbags(&mut self) {
        for doc in &mut self.documents {
            doc.wordbag(&self.filter, Some(&mut self.vocab));
        }
    }

    /// The complete vocabulary (bags every document first).
    pub fn vocab(&mut self) -> &Vocabulary {
        self.compute_wordbags();
        &self.vocab
    }

    /// The vocabulary as grown so far, without forcing any wordbag.
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocab
    }

    /// Sum over documents of their distinct admitted terms; the number of
    /// rows in the docword file.
    pub fn total_count(&mut self) -> usize {
        self.compute_wordbags();
        self.documents.iter().map(Document::count).sum()
    }

    /// Corpus-wide counts of adjacent raw-token pairs.
    pub fn bigrams(&self, window: NgramWindow) -> BigramCounts {
        let mut counts = BigramCounts::new();
        for doc in &self.documents {
            counts.extend(doc.bigrams(window));
        }
        if tracing::enabled!(tracing::Level::DEBUG) {
            let top: Vec<String> = counts
                .most_common(20)
                .into_iter()
                .map(|((a, b), n)| format!("{a} {b}:{n}"))
                .collect();
            debug!(distinct = counts.len(), "corpus 2-grams: {} ...", top.join(", "));
        }
        counts
    }

    /// One line per document with its most frequent terms.
    pub fn summary(&mut self, top_n: usize) -> Result<String> {
        self.compute_wordbags();
        let mut out = format!("{} docs:", self.documents.len());
        for doc in &self.documents {
            let top = doc.most_common(top_n, Some(&self.vocab))?;
            let terms: Vec<String> = top.iter().map(|(w, n)| format!("{w}:{n}")).collect();
            let _ = write!(out, "\n {}: {}", doc.name(), terms.join(" "));
        }
        Ok(out)
    }
}

/// Sentence-mode prepass: record lower/upper-case forms of every word.
fn count_mixed_case(source: &DocumentSource, eod: &str, stats: &mut CaseStats) -> Result<()> {
    source.for_each_line(|line| {
        if line.is_sentinel(eod) {
            return Ok(());
        }
        match line {
            Line::Text(text) => stats.observe_line(text),
            Line::Tokens(tokens) => tokens.iter().for_each(|t| stats.observe_word(t)),
        }
        Ok(())
    })
}
