// Topic: the ranked word/phrase list describing one latent class.
//
// A topic starts empty, receives the sampler's ranked word list, and is
// finally rewritten once with corpus phrases prepended:
//
//   Empty -> WordsAssigned -> PhrasesAssembled

use std::fmt;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::exchange::parse_topic_line;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TopicState {
    #[default]
    Empty,
    WordsAssigned,
    PhrasesAssembled,
}

#[derive(Debug, Clone, Serialize)]
pub struct Topic {
    id: usize,
    words: Vec<String>,
    #[serde(skip)]
    state: TopicState,
}

impl Topic {
    pub fn new(id: usize) -> Self {
        Self {
            id,
            words: Vec::new(),
            state: TopicState::Empty,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    /// Words and phrases, most characteristic first.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn state(&self) -> TopicState {
        self.state
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Replace the word list with the sampler's ranking.
    pub fn assign(&mut self, words: Vec<String>) {
        self.words = words;
        self.state = TopicState::WordsAssigned;
    }

    /// Put `phrases` in front of the words, keep the first `topic_length`
    /// entries, then drop every single word that a kept phrase contains.
    ///
    /// Only the first call has any effect.
    pub fn prepend_truncate(&mut self, phrases: Vec<String>, topic_length: usize) {
        if self.state == TopicState::PhrasesAssembled {
            return;
        }
        let mut words = phrases;
        words.append(&mut self.words);
        self.words = truncate(words, topic_length);
        self.state = TopicState::PhrasesAssembled;
    }
}

/// Keep `topic_length` entries and remove singles consumed by kept phrases.
fn truncate(mut words: Vec<String>, topic_length: usize) -> Vec<String> {
    words.truncate(topic_length);
    let consumed: Vec<String> = words
        .iter()
        .filter(|entry| entry.split_whitespace().nth(1).is_some())
        .flat_map(|phrase| phrase.split_whitespace().map(str::to_string))
        .collect();
    if !consumed.is_empty() {
        words.retain(|w| !consumed.contains(w));
    }
    words
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.words.join(", "))
    }
}

/// One topic per latent class, indexed by class id.
#[derive(Debug, Clone, Default)]
pub struct TopicSet {
    topics: Vec<Topic>,
}

impl TopicSet {
    pub fn new(classes: usize) -> Self {
        Self {
            topics: (0..classes).map(Topic::new).collect(),
        }
    }

    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    pub fn topics_mut(&mut self) -> &mut [Topic] {
        &mut self.topics
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    /// Assign the words from one sampler line.
    ///
    /// Returns `Ok(false)` for lines that aren't topic reports, and
    /// [`Error::TopicIndex`] when the reported id is outside the class range.
    pub fn assign_line(&mut self, line: &str) -> Result<bool> {
        let Some((id, words)) = parse_topic_line(line) else {
            return Ok(false);
        };
        let classes = self.topics.len();
        let topic = self
            .topics
            .get_mut(id)
            .ok_or(Error::TopicIndex { id, classes })?;
        topic.assign(words);
        Ok(true)
    }

    /// Assign every topic report among `lines`; returns how many matched.
    pub fn assign_lines<I, S>(&mut self, lines: I) -> Result<usize>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut assigned = 0;
        for line in lines {
            if self.assign_line(line.as_ref())? {
                assigned += 1;
            }
        }
        Ok(assigned)
    }
}

impl fmt::Display for TopicSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for topic in &self.topics {
            writeln!(f, "{topic}")?;
        }
        Ok(())
    }
}
