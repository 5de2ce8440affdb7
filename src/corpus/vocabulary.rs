// Vocabulary: the bidirectional word <-> id table shared by a corpus.
//
// Ids are 1-based and follow first-seen order, so line N of the vocab file
// is word id N. Id 0 is reserved and never assigned. The table only grows.

use std::collections::HashMap;
use std::io::{self, Write};

use super::document::Term;
use crate::error::{Error, Result};

/// Integer id of a vocabulary word (1-based).
pub type WordId = u32;

#[derive(Debug, Default, Clone)]
pub struct Vocabulary {
    ids: HashMap<String, WordId>,
    /// `words[i]` has id `i + 1`
    words: Vec<String>,
}

impl Vocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the id of `word`, allocating the next id on first sight.
    pub fn id(&mut self, word: &str) -> WordId {
        if let Some(&id) = self.ids.get(word) {
            return id;
        }
        self.words.push(word.to_string());
        let id = self.words.len() as WordId;
        self.ids.insert(word.to_string(), id);
        id
    }

    /// Look up a word without allocating.
    pub fn get(&self, word: &str) -> Option<WordId> {
        self.ids.get(word).copied()
    }

    /// The word registered under `id`.
    pub fn word_of(&self, id: WordId) -> Result<&str> {
        if id == 0 || id > self.max_id() {
            return Err(Error::OutOfRange {
                id,
                max: self.max_id(),
            });
        }
        Ok(&self.words[id as usize - 1])
    }

    /// Number of distinct words registered so far (also the largest id).
    pub fn max_id(&self) -> WordId {
        self.words.len() as WordId
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Words in id order.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    /// Render a term as a word. Raw-word terms pass through and unknown ids
    /// fall back to their number.
    pub fn display(&self, term: &Term) -> String {
        match term {
            Term::Id(id) => self
                .word_of(*id)
                .map(str::to_string)
                .unwrap_or_else(|_| id.to_string()),
            Term::Word(word) => word.clone(),
        }
    }

    /// Write one word per line in id order (the vocab exchange file).
    pub fn write_to(&self, out: &mut dyn Write) -> io::Result<()> {
        for word in &self.words {
            writeln!(out, "{word}")?;
        }
        Ok(())
    }
}
