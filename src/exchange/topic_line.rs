// Parser for the sampler's topic-word report lines:
//
//   topic <id>/<total> words=<word>,<word>,...
//
// Anything else the sampler prints is not ours to interpret and is skipped.

use std::sync::OnceLock;

use regex_lite::Regex;

fn topic_re() -> &'static Regex {
    static TOPIC_RE: OnceLock<Regex> = OnceLock::new();
    TOPIC_RE.get_or_init(|| {
        Regex::new(r"^topic (\d+)/\d+ words=(.*)").expect("topic line pattern is valid")
    })
}

/// Parse one sampler line into `(topic id, ranked words)`.
///
/// Returns `None` for lines that don't match the report format.
pub fn parse_topic_line(line: &str) -> Option<(usize, Vec<String>)> {
    let line = line.trim_end_matches(|c| c == '\r' || c == '\n');
    let caps = topic_re().captures(line)?;
    let id = caps[1].parse().ok()?;
    let words = caps[2]
        .split(',')
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect();
    Some((id, words))
}
