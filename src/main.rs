use std::io::{self, BufRead};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use colored::Colorize;
use tracing::{info, warn};

use topicwright::config::{Config, DiscoveryOptions};
use topicwright::corpus::io::for_each_line;
use topicwright::corpus::{Corpus, CorpusOptions, DocumentSource, NgramWindow, EOD_LINE};
use topicwright::exchange::ExchangeFiles;
use topicwright::output::{json, terminal};
use topicwright::sampler::{HcaSampler, Rank};
use topicwright::text::tokenizer;
use topicwright::topics::phrases::assemble_phrases;
use topicwright::topics::{Topic, TopicDiscovery, TopicSet};

/// topicwright: topic discovery over plain-text corpora.
///
/// Turns text files into the exchange files an HCA sampler trains on, then
/// reads the learned topics back and merges frequent corpus phrases into
/// them.
#[derive(Parser)]
#[command(name = "topicwright", version, about)]
struct Cli {
    /// Increase log detail (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Prepare exchange files, train the sampler and report topic phrases
    Discover {
        #[command(flatten)]
        corpus: CorpusArgs,

        #[command(flatten)]
        topics: TopicArgs,

        /// Sampler quality, 0-10; scales the number of iterations
        #[arg(long, default_value_t = 3.0)]
        quality: f64,

        /// Burstiness strength passed to the sampler (0 disables)
        #[arg(long, default_value_t = 0.0)]
        hca_burst: f64,

        /// Topic word ranking: idf or rat
        #[arg(long, default_value = "idf")]
        hca_rank: Rank,

        /// Words the sampler reports per topic
        #[arg(long, default_value_t = 10)]
        name_length: usize,

        /// The hca executable (default: TOPICWRIGHT_HCA_BIN, then `hca` on PATH)
        #[arg(long)]
        hca_bin: Option<PathBuf>,

        /// Reuse an existing model instead of preparing and training
        #[arg(long)]
        reuse_model: bool,

        /// Fail when the sampler exits with an error
        #[arg(long)]
        strict: bool,

        /// Print topics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write the exchange files only
    Prepare {
        #[command(flatten)]
        corpus: CorpusArgs,

        /// Also print each document's most frequent words
        #[arg(long)]
        summary: bool,
    },

    /// Tokenize stdin, one space-joined token list per line
    Tokenize,

    /// Merge corpus phrases into a saved topic-word report
    Phrases {
        #[command(flatten)]
        corpus: CorpusArgs,

        #[command(flatten)]
        topics: TopicArgs,

        /// Sampler output containing `topic <id>/<total> words=...` lines
        #[arg(long)]
        topic_words: PathBuf,

        /// Print topics as JSON
        #[arg(long)]
        json: bool,
    },
}

/// How input files become a corpus.
#[derive(Args)]
struct CorpusArgs {
    /// Input text files (.gz accepted); documents end at the sentinel line
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Input holds one sentence per line
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    sentences: bool,

    /// Split lines with the invertible tokenizer instead of on whitespace
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    tokenize: bool,

    /// Lower-case whole lines (ignored in sentence mode)
    #[arg(long)]
    downcase: bool,

    /// Match stopwords case-sensitively
    #[arg(long)]
    cased_stopwords: bool,

    /// Keep words containing digits or punctuation
    #[arg(long)]
    allow_nonalpha: bool,

    #[arg(long, default_value_t = 3)]
    min_chars: usize,

    #[arg(long, default_value_t = 18)]
    max_chars: usize,

    /// End-of-document sentinel line
    #[arg(long, default_value = EOD_LINE)]
    eod: String,

    /// Stopword file, one word per line (default: TOPICWRIGHT_STOPWORDS,
    /// then the built-in English list)
    #[arg(long)]
    stopwords: Option<PathBuf>,

    /// Disable stopword filtering
    #[arg(long, conflicts_with = "stopwords")]
    no_stopwords: bool,

    /// Exchange file stem
    #[arg(long, default_value = "docs")]
    stem: String,

    /// Gzip the exchange files
    #[arg(long)]
    gzip: bool,
}

impl CorpusArgs {
    fn options(&self) -> CorpusOptions {
        CorpusOptions {
            sentences: self.sentences,
            tokenize: self.tokenize,
            downcase: self.downcase,
            cased_stopwords: self.cased_stopwords,
            allow_nonalpha: self.allow_nonalpha,
            min_chars: self.min_chars,
            max_chars: self.max_chars,
            eod: self.eod.clone(),
        }
    }

    fn sources(&self) -> Vec<DocumentSource> {
        self.files.iter().cloned().map(DocumentSource::file).collect()
    }
}

/// Topic shape shared by discovery and offline phrase assembly.
#[derive(Args)]
struct TopicArgs {
    /// Number of topics
    #[arg(short = 'k', long, default_value_t = 5)]
    classes: usize,

    /// Entries kept per topic after phrases are merged in
    #[arg(long, default_value_t = 10)]
    topic_length: usize,

    /// Bigram window: legacy skips each document's final pair, full keeps it
    #[arg(long, default_value = "legacy")]
    ngram_window: NgramWindow,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Set up structured logging
    let default_filter = match cli.verbose {
        0 => "topicwright=info",
        1 => "topicwright=debug",
        _ => "topicwright=trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Commands::Discover {
            corpus,
            topics,
            quality,
            hca_burst,
            hca_rank,
            name_length,
            hca_bin,
            reuse_model,
            strict,
            json,
        } => {
            let mut config = Config::load()?;
            if let Some(bin) = hca_bin {
                config.hca_bin = bin;
            }
            config.require_sampler()?;

            let stopwords =
                config.stopword_source(corpus.stopwords.as_deref(), corpus.no_stopwords);
            let options = DiscoveryOptions {
                corpus: corpus.options(),
                classes: topics.classes,
                topic_length: topics.topic_length,
                quality,
                hca_burst,
                hca_rank,
                name_length,
                stem: corpus.stem.clone(),
                ngram_window: topics.ngram_window,
                strict_sampler: strict,
                gzip: corpus.gzip,
                recompute: !reuse_model,
            };
            let sources = corpus.sources();
            let sampler = HcaSampler::new(config.hca_bin.clone());

            let spinner = terminal::sampler_spinner("Discovering topics...");
            let result = run_interruptible(move || {
                let mut discovery =
                    TopicDiscovery::from_sources(options, &stopwords, &sources, sampler)?;
                info!(documents = discovery.corpus().len(), "Corpus loaded");
                let topics = discovery.run()?.to_vec();
                Ok(topics)
            })
            .await;
            spinner.finish_and_clear();

            print_topics(&result?, json)?;
        }

        Commands::Prepare { corpus, summary } => {
            let config = Config::load()?;
            let stopwords =
                config.stopword_source(corpus.stopwords.as_deref(), corpus.no_stopwords);
            let options = corpus.options();
            let sources = corpus.sources();
            let stem = corpus.stem.clone();
            let gzip = corpus.gzip;

            let (files, report) = run_interruptible(move || {
                let mut corpus = Corpus::from_sources(options, &stopwords, &sources)?;
                let files = ExchangeFiles::new(&stem).gzipped(gzip);
                files.write_all(&mut corpus)?;
                let report = if summary {
                    Some(corpus.summary(10)?)
                } else {
                    None
                };
                Ok((files, report))
            })
            .await?;

            if let Some(report) = report {
                terminal::display_summary(&report);
            }
            println!("{}", "Exchange files written:".bold());
            for path in [
                files.docword_path(),
                files.vocab_path(),
                files.txtbag_path(),
                files.ldac_path(),
            ] {
                println!("  {}", path.display());
            }
        }

        Commands::Tokenize => {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                let line = line.context("Failed to read stdin")?;
                println!("{}", tokenizer::encode(&line).join(" "));
            }
        }

        Commands::Phrases {
            corpus,
            topics,
            topic_words,
            json,
        } => {
            let config = Config::load()?;
            let stopwords =
                config.stopword_source(corpus.stopwords.as_deref(), corpus.no_stopwords);
            let options = corpus.options();
            let sources = corpus.sources();

            let result = run_interruptible(move || {
                let mut lines = Vec::new();
                for_each_line(&topic_words, |line| {
                    lines.push(line.to_string());
                    Ok(())
                })?;

                let mut set = TopicSet::new(topics.classes);
                let assigned = set.assign_lines(&lines)?;
                if assigned != topics.classes {
                    warn!(
                        assigned,
                        classes = topics.classes,
                        "Report holds a different number of topics than configured"
                    );
                }

                let corpus = Corpus::from_sources(options, &stopwords, &sources)?;
                let bigrams = corpus.bigrams(topics.ngram_window);
                assemble_phrases(&mut set, &bigrams, topics.topic_length);
                Ok(set.topics().to_vec())
            })
            .await?;

            print_topics(&result, json)?;
        }
    }

    Ok(())
}

/// Run a blocking pipeline off the async runtime, exiting with status 130
/// on Ctrl-C.
async fn run_interruptible<T, F>(job: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    let handle = tokio::task::spawn_blocking(job);
    tokio::select! {
        joined = handle => joined.context("Pipeline task failed")?,
        _ = tokio::signal::ctrl_c() => {
            warn!("user interrupt");
            std::process::exit(130);
        }
    }
}

fn print_topics(topics: &[Topic], as_json: bool) -> Result<()> {
    if as_json {
        println!("{}", json::render_topics(topics)?);
    } else {
        terminal::display_topics(topics);
    }
    Ok(())
}
