// HCA sampler adapter.
//
// HCA is run twice: once to train a model over the exchange files, once
// with zero iterations to restore that model and print each topic's top
// words to stderr.

use std::path::PathBuf;

use tracing::info;

use super::process::run_capturing_stderr;
use super::traits::{format_number, SamplerOutcome, SamplerParams, TopicSampler};

/// Drives the `hca` executable.
#[derive(Debug, Clone)]
pub struct HcaSampler {
    pub binary: PathBuf,
}

impl HcaSampler {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    fn program(&self) -> String {
        self.binary.display().to_string()
    }
}

/// Arguments for the training run.
pub fn training_args(program: &str, params: &SamplerParams) -> Vec<String> {
    let mut args = vec![
        program.to_string(),
        "-q8".to_string(),
        "-v".to_string(),
        "-v".to_string(),
        "-v".to_string(),
        "-e".to_string(),
        format!("-C{}", format_number(params.iterations())),
        format!("-K{}", params.classes),
    ];
    if params.burst != 0.0 {
        args.push("-Sbdk=100".to_string());
        args.push(format!("-Sad={}", format_number(params.burst)));
    }
    args.push(params.stem.clone());
    args.push(params.model_name());
    args
}

/// Arguments for the topic-word report run.
pub fn topic_word_args(program: &str, params: &SamplerParams) -> Vec<String> {
    vec![
        program.to_string(),
        "-q8".to_string(),
        "-v".to_string(),
        "-v".to_string(),
        "-V".to_string(),
        "-r0".to_string(),
        "-C0".to_string(),
        format!("-o{},{}", params.rank, params.name_length),
        "-e".to_string(),
        params.stem.clone(),
        params.model_name(),
    ]
}

impl TopicSampler for HcaSampler {
    fn train(&self, params: &SamplerParams) -> SamplerOutcome {
        let args = training_args(&self.program(), params);
        info!(
            classes = params.classes,
            iterations = %format_number(params.iterations()),
            model = %params.model_name(),
            "Training topic model"
        );
        run_capturing_stderr(&args)
    }

    fn topic_words(&self, params: &SamplerParams) -> SamplerOutcome {
        let args = topic_word_args(&self.program(), params);
        info!(model = %params.model_name(), "Extracting topic words");
        run_capturing_stderr(&args)
    }
}
