// Topic sampler trait: the swap-ready boundary to the inference engine.
//
// The pipeline never does topic inference itself. It writes exchange files,
// asks a sampler to train on them, and then asks it to report the ranked
// words of each topic. The default implementation drives the HCA
// executable; tests plug in canned output.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{Error, Result};

/// How the sampler picks the words that name a topic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Rank {
    /// Inverse document frequency
    #[default]
    Idf,
    /// Likelihood ratio
    Rat,
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Rank::Idf => "idf",
            Rank::Rat => "rat",
        })
    }
}

impl FromStr for Rank {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "idf" => Ok(Rank::Idf),
            "rat" => Ok(Rank::Rat),
            other => Err(format!("unknown rank '{other}' (expected idf or rat)")),
        }
    }
}

/// Everything a sampler needs to train and report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SamplerParams {
    /// Exchange file stem, passed to the sampler verbatim
    pub stem: String,
    /// Number of latent classes (topics)
    pub classes: usize,
    /// 0-10; the sampler runs quality * 50 Gibbs iterations
    pub quality: f64,
    /// Strength of the topic burstiness model; 0 disables it
    pub burst: f64,
    pub rank: Rank,
    /// Maximum words reported per topic
    pub name_length: usize,
}

impl SamplerParams {
    pub fn iterations(&self) -> f64 {
        self.quality * 50.0
    }

    /// Name of the model the sampler saves between training and reporting.
    pub fn model_name(&self) -> String {
        format!(
            "c{}.{}.b{}",
            self.classes,
            self.stem,
            format_number(self.burst)
        )
    }
}

/// Render a number the way the sampler's flags expect (`150`, `0.01`).
pub fn format_number(x: f64) -> String {
    if x.is_finite() && x.fract() == 0.0 {
        format!("{}", x as i64)
    } else {
        format!("{x}")
    }
}

/// How a sampler run ended.
#[derive(Debug, Clone, PartialEq)]
pub enum SamplerStatus {
    Success,
    /// The sampler ran but exited nonzero (`None` when killed by a signal).
    Warning { code: Option<i32> },
    /// The sampler could not be run at all.
    Fatal(String),
}

/// Status plus everything the sampler wrote to stderr.
#[derive(Debug, Clone, PartialEq)]
pub struct SamplerOutcome {
    pub status: SamplerStatus,
    pub stderr: Vec<String>,
}

impl SamplerOutcome {
    pub fn success(stderr: Vec<String>) -> Self {
        Self {
            status: SamplerStatus::Success,
            stderr,
        }
    }

    pub fn fatal(reason: impl Into<String>) -> Self {
        Self {
            status: SamplerStatus::Fatal(reason.into()),
            stderr: Vec::new(),
        }
    }

    /// Apply a failure policy: fatal outcomes are always errors, nonzero
    /// exits only when `strict`. Yields the stderr lines otherwise.
    pub fn into_lines(self, strict: bool) -> Result<Vec<String>> {
        match self.status {
            SamplerStatus::Success => Ok(self.stderr),
            SamplerStatus::Warning { code } if strict => Err(Error::Sampler(match code {
                Some(code) => format!("exited with status {code}"),
                None => "terminated by signal".to_string(),
            })),
            SamplerStatus::Warning { .. } => Ok(self.stderr),
            SamplerStatus::Fatal(reason) => Err(Error::Sampler(reason)),
        }
    }
}

/// A topic inference engine driven through exchange files.
pub trait TopicSampler {
    /// Train a model on the exchange files under `params.stem`.
    fn train(&self, params: &SamplerParams) -> SamplerOutcome;

    /// Report each topic's ranked words as `topic <id>/<total> words=...`
    /// lines.
    fn topic_words(&self, params: &SamplerParams) -> SamplerOutcome;
}
