// Corpus model: vocabulary, documents and their wordbags, stopwords,
// document sources and corpus-wide bigram statistics.

pub mod collection;
pub mod document;
pub mod filter;
pub mod io;
pub mod ngrams;
pub mod source;
pub mod stopwords;
pub mod vocabulary;

pub use collection::{Corpus, CorpusOptions, EOD_LINE};
pub use document::{Document, Term, WordBag};
pub use ngrams::{BigramCounts, NgramWindow};
pub use source::DocumentSource;
pub use stopwords::{StopwordSource, Stopwords};
pub use vocabulary::{Vocabulary, WordId};
