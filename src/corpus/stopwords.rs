// Stopword sets.
//
// Stopwords come from a file (one or more whitespace-separated words per
// line, optionally gzipped), an explicit list, or the built-in English list
// from the `stop-words` crate. A stopword file that can't be read is not
// fatal: we warn and carry on with no stopwords.

use std::collections::HashSet;
use std::path::PathBuf;

use stop_words::{get, LANGUAGE};
use tracing::{debug, warn};

use super::io;

/// Where a corpus gets its stopwords from.
#[derive(Debug, Clone, PartialEq)]
pub enum StopwordSource {
    File(PathBuf),
    Words(Vec<String>),
    BuiltinEnglish,
    None,
}

/// A frozen stopword set with its matching mode.
#[derive(Debug, Clone, Default)]
pub struct Stopwords {
    words: HashSet<String>,
    /// When false, words are stored and matched lower-cased.
    cased: bool,
}

impl Stopwords {
    /// Build a set from explicit words.
    pub fn from_words<I, S>(words: I, cased: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| {
                let w = w.as_ref();
                if cased {
                    w.to_string()
                } else {
                    w.to_lowercase()
                }
            })
            .collect();
        Self { words, cased }
    }

    /// Load stopwords from a source. Never fails; see the module notes.
    pub fn load(source: &StopwordSource, cased: bool) -> Self {
        let stopwords = match source {
            StopwordSource::File(path) => {
                let mut words = Vec::new();
                let loaded = io::for_each_line(path, |line| {
                    words.extend(line.split_whitespace().map(str::to_string));
                    Ok(())
                });
                match loaded {
                    Ok(()) => Self::from_words(words, cased),
                    Err(e) => {
                        warn!(error = %e, "stopwords file {} not found, using no stopwords", path.display());
                        Self::from_words(Vec::<String>::new(), cased)
                    }
                }
            }
            StopwordSource::Words(words) => Self::from_words(words, cased),
            StopwordSource::BuiltinEnglish => Self::from_words(get(LANGUAGE::English), cased),
            StopwordSource::None => Self::from_words(Vec::<String>::new(), cased),
        };

        if !stopwords.is_empty() {
            let mut sample: Vec<&str> = stopwords.words.iter().map(String::as_str).collect();
            sample.sort_unstable();
            sample.truncate(10);
            debug!(count = stopwords.len(), "stopwords: {} ...", sample.join(" "));
        }
        stopwords
    }

    /// Does `token` match a stopword under the configured case mode?
    pub fn contains(&self, token: &str) -> bool {
        if self.cased {
            self.words.contains(token)
        } else {
            self.words.contains(&token.to_lowercase())
        }
    }

    pub fn is_cased(&self) -> bool {
        self.cased
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
