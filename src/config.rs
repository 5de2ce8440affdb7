use std::env;
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::corpus::{CorpusOptions, NgramWindow, StopwordSource};
use crate::sampler::{Rank, SamplerParams};

/// Sampler executable used when TOPICWRIGHT_HCA_BIN is unset (looked up on PATH).
pub const DEFAULT_HCA_BIN: &str = "hca";

/// Environment-level configuration.
///
/// Values come from env vars; a .env file is loaded automatically at
/// startup via dotenvy. Command-line flags override both.
#[derive(Debug, Clone)]
pub struct Config {
    /// The HCA executable (TOPICWRIGHT_HCA_BIN)
    pub hca_bin: PathBuf,
    /// Default stopword file (TOPICWRIGHT_STOPWORDS). When unset, the
    /// built-in English list is used.
    pub stopwords: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        Ok(Self {
            hca_bin: env::var("TOPICWRIGHT_HCA_BIN")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_HCA_BIN)),
            stopwords: env::var("TOPICWRIGHT_STOPWORDS")
                .ok()
                .filter(|s| !s.is_empty())
                .map(PathBuf::from),
        })
    }

    /// Check that an explicitly located sampler binary exists.
    ///
    /// Bare program names are left to PATH lookup when the sampler runs.
    pub fn require_sampler(&self) -> Result<()> {
        let is_path = self.hca_bin.components().count() > 1;
        if is_path && !self.hca_bin.exists() {
            anyhow::bail!(
                "HCA sampler not found at {}\n\
                 Set TOPICWRIGHT_HCA_BIN (or pass --hca-bin) to the hca executable.",
                self.hca_bin.display()
            );
        }
        Ok(())
    }

    /// Pick the stopword source: an explicit file wins over the configured
    /// default, which wins over the built-in list.
    pub fn stopword_source(&self, explicit: Option<&Path>, disabled: bool) -> StopwordSource {
        if disabled {
            return StopwordSource::None;
        }
        match explicit.or(self.stopwords.as_deref()) {
            Some(path) => StopwordSource::File(path.to_path_buf()),
            None => StopwordSource::BuiltinEnglish,
        }
    }
}

/// Every knob of a topic discovery run. Defaults match the classic
/// command-line defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoveryOptions {
    pub corpus: CorpusOptions,
    /// Number of topics
    pub classes: usize,
    /// Maximum entries (words and phrases) per final topic
    pub topic_length: usize,
    /// 0-10, scales the number of sampler iterations
    pub quality: f64,
    /// Burstiness model strength (0 disables)
    pub hca_burst: f64,
    pub hca_rank: Rank,
    /// Words the sampler reports per topic
    pub name_length: usize,
    /// Exchange file stem
    pub stem: String,
    pub ngram_window: NgramWindow,
    /// Treat a nonzero sampler exit as fatal
    pub strict_sampler: bool,
    /// Write gzip-compressed exchange files
    pub gzip: bool,
    /// Prepare files and train before reporting; when false an existing
    /// model is reused
    pub recompute: bool,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            corpus: CorpusOptions::default(),
            classes: 5,
            topic_length: 10,
            quality: 3.0,
            hca_burst: 0.0,
            hca_rank: Rank::Idf,
            name_length: 10,
            stem: "docs".to_string(),
            ngram_window: NgramWindow::Legacy,
            strict_sampler: false,
            gzip: false,
            recompute: true,
        }
    }
}

impl DiscoveryOptions {
    pub fn sampler_params(&self) -> SamplerParams {
        SamplerParams {
            stem: self.stem.clone(),
            classes: self.classes,
            quality: self.quality,
            burst: self.hca_burst,
            rank: self.hca_rank,
            name_length: self.name_length,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(stopwords: Option<&str>) -> Config {
        Config {
            hca_bin: PathBuf::from(DEFAULT_HCA_BIN),
            stopwords: stopwords.map(PathBuf::from),
        }
    }

    #[test]
    fn test_stopword_source_precedence() {
        let cfg = config(Some("env.txt"));
        assert_eq!(
            cfg.stopword_source(Some(Path::new("cli.txt")), false),
            StopwordSource::File(PathBuf::from("cli.txt"))
        );
        assert_eq!(
            cfg.stopword_source(None, false),
            StopwordSource::File(PathBuf::from("env.txt"))
        );
        assert_eq!(config(None).stopword_source(None, false), StopwordSource::BuiltinEnglish);
        assert_eq!(cfg.stopword_source(None, true), StopwordSource::None);
    }

    #[test]
    fn test_bare_sampler_name_not_checked() {
        assert!(config(None).require_sampler().is_ok());
        let missing = Config {
            hca_bin: PathBuf::from("/nonexistent/bin/hca"),
            stopwords: None,
        };
        assert!(missing.require_sampler().is_err());
    }

    #[test]
    fn test_default_sampler_params() {
        let params = DiscoveryOptions::default().sampler_params();
        assert_eq!(params.classes, 5);
        assert_eq!(params.model_name(), "c5.docs.b0");
    }
}
