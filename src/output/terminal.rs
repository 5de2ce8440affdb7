// Colored terminal output for topics and corpus summaries.
//
// This module handles all terminal-specific formatting. The main.rs
// command handlers delegate here.

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::topics::Topic;

/// Display discovered topics, one per line.
pub fn display_topics(topics: &[Topic]) {
    if topics.is_empty() {
        println!("No topics reported. Check the sampler output with -v.");
        return;
    }

    println!(
        "\n{}",
        format!("=== Topics ({}) ===", topics.len()).bold()
    );
    println!();

    for topic in topics {
        let label = format!("{:>3}.", topic.id());
        if topic.is_empty() {
            println!("  {} {}", label.cyan().bold(), "(no words)".dimmed());
        } else {
            println!("  {} {}", label.cyan().bold(), format_words(topic.words()));
        }
    }
    println!();
}

/// Join a topic's entries for display, highlighting multi-word phrases.
pub fn format_words(words: &[String]) -> String {
    words
        .iter()
        .map(|w| {
            if w.contains(' ') {
                w.green().to_string()
            } else {
                w.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Print the corpus summary produced by `Corpus::summary`.
pub fn display_summary(summary: &str) {
    println!("\n{}", "=== Corpus ===".bold());
    for line in summary.lines() {
        println!("  {line}");
    }
}

/// A spinner shown while the sampler runs. The caller finishes it.
pub fn sampler_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("  {spinner} {msg} ({elapsed})") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}
