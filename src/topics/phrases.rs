// Phrase assembly: merge corpus bigrams into topic word lists.
//
// For a topic's ranked words, every ordered pair (words[i], words[j]) with
// i < j that occurs as adjacent tokens somewhere in the corpus becomes a
// two-word phrase. Phrases are rarer and more telling than their parts, so
// they go in front of the single words and then consume them.

use tracing::debug;

use super::topic::TopicSet;
use crate::corpus::BigramCounts;

/// Two-word phrases from `words` seen as corpus bigrams, in discovery order.
pub fn phrase_candidates(words: &[String], bigrams: &BigramCounts) -> Vec<String> {
    let mut phrases = Vec::new();
    for (i, first) in words.iter().enumerate() {
        for second in &words[i + 1..] {
            if bigrams.contains(first, second) {
                let phrase = format!("{first} {second}");
                debug!("2-gram {phrase}");
                phrases.push(phrase);
            }
        }
    }
    phrases
}

/// Prepend each topic's phrases and cut it down to `topic_length` entries.
pub fn assemble_phrases(topics: &mut TopicSet, bigrams: &BigramCounts, topic_length: usize) {
    for topic in topics.topics_mut() {
        let phrases = phrase_candidates(topic.words(), bigrams);
        debug!(topic = topic.id(), phrases = phrases.len(), "Assembled phrases");
        topic.prepend_truncate(phrases, topic_length);
    }
}
