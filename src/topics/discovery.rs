// Topic discovery pipeline.
//
//   Corpus -> exchange files -> sampler training -> topic-word report
//          -> topic parsing -> phrase assembly
//
// Every stage runs once; asking for topic words or phrases again returns
// the cached result.

use tracing::{info, warn};

use super::phrases::assemble_phrases;
use super::topic::{Topic, TopicSet};
use crate::config::DiscoveryOptions;
use crate::corpus::{Corpus, DocumentSource, StopwordSource};
use crate::error::Result;
use crate::exchange::ExchangeFiles;
use crate::sampler::{SamplerOutcome, SamplerStatus, TopicSampler};

pub struct TopicDiscovery<S> {
    options: DiscoveryOptions,
    corpus: Corpus,
    sampler: S,
    topics: TopicSet,
    have_topics: bool,
    have_phrases: bool,
}

impl<S: TopicSampler> TopicDiscovery<S> {
    pub fn new(options: DiscoveryOptions, corpus: Corpus, sampler: S) -> Self {
        let topics = TopicSet::new(options.classes);
        Self {
            options,
            corpus,
            sampler,
            topics,
            have_topics: false,
            have_phrases: false,
        }
    }

    /// Load a corpus from `sources` and set up discovery over it.
    pub fn from_sources(
        options: DiscoveryOptions,
        stopwords: &StopwordSource,
        sources: &[DocumentSource],
        sampler: S,
    ) -> Result<Self> {
        let corpus = Corpus::from_sources(options.corpus.clone(), stopwords, sources)?;
        Ok(Self::new(options, corpus, sampler))
    }

    pub fn options(&self) -> &DiscoveryOptions {
        &self.options
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn corpus_mut(&mut self) -> &mut Corpus {
        &mut self.corpus
    }

    pub fn exchange_files(&self) -> ExchangeFiles {
        ExchangeFiles::new(&self.options.stem).gzipped(self.options.gzip)
    }

    /// Write the exchange files the sampler trains on.
    pub fn prepare(&mut self) -> Result<ExchangeFiles> {
        let files = self.exchange_files();
        files.write_all(&mut self.corpus)?;
        Ok(files)
    }

    /// Train the sampler's model over the prepared files.
    pub fn train(&mut self) -> Result<()> {
        let outcome = self.sampler.train(&self.options.sampler_params());
        self.check("train", outcome)?;
        Ok(())
    }

    /// Ask the sampler for each topic's ranked words.
    pub fn topic_words(&mut self) -> Result<&[Topic]> {
        if !self.have_topics {
            let outcome = self.sampler.topic_words(&self.options.sampler_params());
            let lines = self.check("topic words", outcome)?;
            let assigned = self.topics.assign_lines(&lines)?;
            if assigned != self.topics.len() {
                warn!(
                    assigned,
                    classes = self.topics.len(),
                    "Sampler reported a different number of topics than configured"
                );
            }
            self.have_topics = true;
        }
        Ok(self.topics.topics())
    }

    /// Topic words with corpus phrases merged in and cut to length.
    pub fn topic_phrases(&mut self) -> Result<&[Topic]> {
        if !self.have_phrases {
            self.topic_words()?;
            let bigrams = self.corpus.bigrams(self.options.ngram_window);
            assemble_phrases(&mut self.topics, &bigrams, self.options.topic_length);
            self.have_phrases = true;
        }
        Ok(self.topics.topics())
    }

    /// The whole pipeline: prepare and train (unless reusing a model), then
    /// report phrases.
    pub fn run(&mut self) -> Result<&[Topic]> {
        if self.options.recompute {
            self.prepare()?;
            self.train()?;
        }
        let topics = self.topic_phrases()?;
        info!(topics = topics.len(), "Topic discovery complete");
        Ok(topics)
    }

    pub fn topics(&self) -> &TopicSet {
        &self.topics
    }

    fn check(&self, step: &str, outcome: SamplerOutcome) -> Result<Vec<String>> {
        if let SamplerStatus::Warning { code } = outcome.status {
            if !self.options.strict_sampler {
                warn!(step, rc = ?code, "Sampler failed; continuing with its output");
            }
        }
        outcome.into_lines(self.options.strict_sampler)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::corpus::CorpusOptions;
    use crate::error::Error;
    use crate::sampler::SamplerParams;

    /// Replays canned topic-word lines and records calls.
    struct CannedSampler {
        lines: Vec<String>,
        train_status: SamplerStatus,
        calls: RefCell<Vec<&'static str>>,
    }

    impl CannedSampler {
        fn new(lines: &[&str]) -> Self {
            Self {
                lines: lines.iter().map(|l| l.to_string()).collect(),
                train_status: SamplerStatus::Success,
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl TopicSampler for &CannedSampler {
        fn train(&self, _params: &SamplerParams) -> SamplerOutcome {
            self.calls.borrow_mut().push("train");
            SamplerOutcome {
                status: self.train_status.clone(),
                stderr: vec!["training...".to_string()],
            }
        }

        fn topic_words(&self, _params: &SamplerParams) -> SamplerOutcome {
            self.calls.borrow_mut().push("topic_words");
            SamplerOutcome::success(self.lines.clone())
        }
    }

    fn options(dir: &std::path::Path, classes: usize) -> DiscoveryOptions {
        DiscoveryOptions {
            corpus: CorpusOptions {
                sentences: false,
                ..CorpusOptions::default()
            },
            classes,
            topic_length: 3,
            stem: dir.join("docs").display().to_string(),
            ..DiscoveryOptions::default()
        }
    }

    fn sources() -> Vec<DocumentSource> {
        vec![DocumentSource::inline(
            "mem",
            ["the ocean blue is calm today", "stock market prices rose sharply again"],
        )]
    }

    #[test]
    fn test_run_assembles_phrases() {
        let dir = tempfile::tempdir().unwrap();
        let sampler = CannedSampler::new(&[
            "Gibbs sampling done",
            "topic 0/2 words=ocean,blue,calm,today",
            "topic 1/2 words=sharply,stock,again",
        ]);
        let mut td = TopicDiscovery::from_sources(
            options(dir.path(), 2),
            &StopwordSource::None,
            &sources(),
            &sampler,
        )
        .unwrap();

        let topics: Vec<Vec<String>> = td.run().unwrap().iter().map(|t| t.words().to_vec()).collect();

        assert_eq!(topics[0], vec!["ocean blue", "calm today"]);
        // ("sharply", "again") is the document's last pair, outside the legacy window
        assert_eq!(topics[1], vec!["sharply", "stock", "again"]);
        assert_eq!(*sampler.calls.borrow(), vec!["train", "topic_words"]);
        assert!(td.exchange_files().docword_path().exists());
    }

    #[test]
    fn test_phrases_are_cached() {
        let dir = tempfile::tempdir().unwrap();
        let sampler = CannedSampler::new(&["topic 0/1 words=ocean,blue"]);
        let mut td = TopicDiscovery::from_sources(
            options(dir.path(), 1),
            &StopwordSource::None,
            &sources(),
            &sampler,
        )
        .unwrap();

        td.topic_phrases().unwrap();
        td.topic_phrases().unwrap();
        assert_eq!(*sampler.calls.borrow(), vec!["topic_words"]);
        assert_eq!(td.topics().topics()[0].words(), &["ocean blue"]);
    }

    #[test]
    fn test_reuse_model_skips_training() {
        let dir = tempfile::tempdir().unwrap();
        let sampler = CannedSampler::new(&["topic 0/1 words=ocean"]);
        let opts = DiscoveryOptions {
            recompute: false,
            ..options(dir.path(), 1)
        };
        let mut td =
            TopicDiscovery::from_sources(opts, &StopwordSource::None, &sources(), &sampler).unwrap();
        td.run().unwrap();
        assert_eq!(*sampler.calls.borrow(), vec!["topic_words"]);
        assert!(!td.exchange_files().docword_path().exists());
    }

    #[test]
    fn test_topic_out_of_range_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let sampler = CannedSampler::new(&["topic 4/5 words=ocean"]);
        let mut td = TopicDiscovery::from_sources(
            options(dir.path(), 2),
            &StopwordSource::None,
            &sources(),
            &sampler,
        )
        .unwrap();
        assert!(matches!(
            td.topic_words(),
            Err(Error::TopicIndex { id: 4, classes: 2 })
        ));
    }

    #[test]
    fn test_training_failure_policy() {
        let dir = tempfile::tempdir().unwrap();
        let mut sampler = CannedSampler::new(&["topic 0/1 words=ocean"]);
        sampler.train_status = SamplerStatus::Warning { code: Some(1) };

        let mut lenient = TopicDiscovery::from_sources(
            options(dir.path(), 1),
            &StopwordSource::None,
            &sources(),
            &sampler,
        )
        .unwrap();
        assert!(lenient.run().is_ok());

        let strict_opts = DiscoveryOptions {
            strict_sampler: true,
            ..options(dir.path(), 1)
        };
        let mut strict =
            TopicDiscovery::from_sources(strict_opts, &StopwordSource::None, &sources(), &sampler)
                .unwrap();
        assert!(matches!(strict.run(), Err(Error::Sampler(_))));
    }
}
