// Composition tests: verifying that the pipeline stages chain together.
//
// These tests exercise the data flow between modules:
//   text files -> Corpus -> exchange files -> sampler -> TopicSet -> phrases
// against a fake sampler (and, on Unix, a scripted stand-in for the hca
// executable). Files go to temporary directories.

use std::io::Read;
use std::path::Path;

use topicwright::config::DiscoveryOptions;
use topicwright::corpus::io::open_reader;
use topicwright::corpus::{Corpus, CorpusOptions, DocumentSource, StopwordSource, EOD_LINE};
use topicwright::exchange::ExchangeFiles;
use topicwright::sampler::{SamplerOutcome, SamplerParams, TopicSampler};
use topicwright::topics::phrases::assemble_phrases;
use topicwright::topics::{TopicDiscovery, TopicSet};

fn read_text(path: &Path) -> String {
    let mut text = String::new();
    open_reader(path).unwrap().read_to_string(&mut text).unwrap();
    text
}

fn plain_options() -> CorpusOptions {
    CorpusOptions {
        sentences: false,
        ..CorpusOptions::default()
    }
}

fn small_corpus() -> Corpus {
    Corpus::from_sources(
        plain_options(),
        &StopwordSource::None,
        &[DocumentSource::inline("mem", ["cat dog cat", EOD_LINE, "dog emu"])],
    )
    .unwrap()
}

/// Answers with fixed topic lines, but only once training has seen the
/// exchange files on disk.
struct FileCheckingSampler {
    report: Vec<String>,
}

impl TopicSampler for FileCheckingSampler {
    fn train(&self, params: &SamplerParams) -> SamplerOutcome {
        let files = ExchangeFiles::new(&params.stem);
        if !files.docword_path().exists() || !files.vocab_path().exists() {
            return SamplerOutcome::fatal("exchange files missing");
        }
        SamplerOutcome::success(vec![format!("training {}", params.model_name())])
    }

    fn topic_words(&self, _params: &SamplerParams) -> SamplerOutcome {
        SamplerOutcome::success(self.report.clone())
    }
}

const OCEAN_TEXT: &str = "\
The deep sea hides coral reefs.
Coral reefs shelter small fish in the deep sea.
---END.OF.DOCUMENT---
Stock market prices rose sharply today.
Analysts expect stock market prices to fall.
";

// ============================================================
// Chain: files -> Corpus -> exchange files -> sampler -> phrases
// ============================================================

#[test]
fn discovery_over_text_files_yields_phrases() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("news.txt");
    std::fs::write(&input, OCEAN_TEXT).unwrap();

    let options = DiscoveryOptions {
        classes: 2,
        topic_length: 4,
        stem: dir.path().join("out").join("docs").display().to_string(),
        ..DiscoveryOptions::default()
    };
    let sampler = FileCheckingSampler {
        report: vec![
            "topic 0/2 words=coral,reefs,deep,sea,fish".to_string(),
            "topic 1/2 words=stock,market,prices,analysts".to_string(),
        ],
    };
    let mut discovery = TopicDiscovery::from_sources(
        options,
        &StopwordSource::BuiltinEnglish,
        &[DocumentSource::file(&input)],
        sampler,
    )
    .unwrap();
    assert_eq!(discovery.corpus().len(), 2);

    let topics = discovery.run().unwrap();
    assert_eq!(topics[0].words(), ["coral reefs", "deep sea"]);
    assert_eq!(topics[1].words(), ["stock market", "market prices"]);
}

#[test]
fn training_without_exchange_files_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let options = DiscoveryOptions {
        classes: 1,
        stem: dir.path().join("docs").display().to_string(),
        ..DiscoveryOptions::default()
    };
    let sampler = FileCheckingSampler { report: vec![] };
    let mut discovery = TopicDiscovery::new(options, small_corpus(), sampler);
    assert!(discovery.train().is_err());
    discovery.prepare().unwrap();
    assert!(discovery.train().is_ok());
}

// ============================================================
// Chain: Corpus -> exchange files on disk
// ============================================================

#[test]
fn exchange_files_describe_the_same_counts() {
    let dir = tempfile::tempdir().unwrap();
    let files = ExchangeFiles::new(dir.path().join("docs"));
    let mut corpus = small_corpus();
    files.write_all(&mut corpus).unwrap();

    assert_eq!(read_text(&files.vocab_path()), "cat\ndog\nemu\n");
    assert_eq!(
        read_text(&files.docword_path()),
        "2\n3\n4\n1 0 2\n1 1 1\n2 1 1\n2 2 1\n"
    );
    assert_eq!(read_text(&files.txtbag_path()), "2\n3\n1 0 2 1 1\n2 1 1 2 1\n");
    assert_eq!(read_text(&files.ldac_path()), "1.mem 1:2 2:1\n2.mem 2:1 3:1\n");
}

#[test]
fn gzipped_exchange_files_match_plain_ones() {
    let dir = tempfile::tempdir().unwrap();
    let plain = ExchangeFiles::new(dir.path().join("plain"));
    let gz = ExchangeFiles::new(dir.path().join("gz")).gzipped(true);
    plain.write_all(&mut small_corpus()).unwrap();
    gz.write_all(&mut small_corpus()).unwrap();

    assert!(gz.docword_path().to_string_lossy().ends_with(".txt.gz"));
    assert_eq!(read_text(&gz.docword_path()), read_text(&plain.docword_path()));
    assert_eq!(read_text(&gz.vocab_path()), read_text(&plain.vocab_path()));
    assert_eq!(read_text(&gz.ldac_path()), read_text(&plain.ldac_path()));
}

#[test]
fn header_counts_reflect_documents_added_later() {
    let dir = tempfile::tempdir().unwrap();
    let files = ExchangeFiles::new(dir.path().join("docs"));
    let mut corpus = small_corpus();
    files.write_all(&mut corpus).unwrap();

    corpus
        .load(&[DocumentSource::inline("more", ["yak cat"])])
        .unwrap();
    files.write_all(&mut corpus).unwrap();

    let docword = read_text(&files.docword_path());
    assert!(docword.starts_with("3\n4\n6\n"));
    assert!(docword.ends_with("3 0 1\n3 3 1\n"));
}

// ============================================================
// Chain: saved topic report -> TopicSet -> phrases
// ============================================================

#[test]
fn saved_topic_report_gets_phrases_without_sampler() {
    let dir = tempfile::tempdir().unwrap();
    let report = dir.path().join("topics.log");
    std::fs::write(
        &report,
        "restoring model\ntopic 0/1 words=coral,reefs,fish\n",
    )
    .unwrap();

    let text = read_text(&report);
    let mut set = TopicSet::new(1);
    assert_eq!(set.assign_lines(text.lines()).unwrap(), 1);

    let corpus = Corpus::from_sources(
        plain_options(),
        &StopwordSource::None,
        &[DocumentSource::inline("mem", ["coral reefs shelter fish"])],
    )
    .unwrap();
    assemble_phrases(&mut set, &corpus.bigrams(Default::default()), 10);
    assert_eq!(set.topics()[0].words(), ["coral reefs", "fish"]);
}

// ============================================================
// Chain: HcaSampler -> child process -> stderr report
// ============================================================

#[cfg(unix)]
#[test]
fn hca_sampler_reads_report_from_child_stderr() {
    use std::os::unix::fs::PermissionsExt;
    use topicwright::sampler::{HcaSampler, SamplerStatus};

    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("fake-hca");
    std::fs::write(
        &script,
        "#!/bin/sh\n\
         case \"$*\" in\n\
         *-C0*) echo 'topic 0/2 words=coral,reefs' >&2; echo 'topic 1/2 words=stock' >&2 ;;\n\
         *) echo 'sampling' >&2; exit 3 ;;\n\
         esac\n",
    )
    .unwrap();
    std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

    let sampler = HcaSampler::new(&script);
    let params = DiscoveryOptions {
        classes: 2,
        ..DiscoveryOptions::default()
    }
    .sampler_params();

    let trained = sampler.train(&params);
    assert_eq!(trained.status, SamplerStatus::Warning { code: Some(3) });
    assert_eq!(trained.stderr, vec!["sampling"]);

    let report = sampler.topic_words(&params);
    assert_eq!(report.status, SamplerStatus::Success);
    let mut set = TopicSet::new(2);
    assert_eq!(set.assign_lines(&report.stderr).unwrap(), 2);
    assert_eq!(set.topics()[0].words(), ["coral", "reefs"]);
}
