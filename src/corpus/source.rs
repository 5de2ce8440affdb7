// Document sources: where the raw lines of a corpus come from.
//
// A source is read line by line through a callback, so a file is streamed
// rather than loaded whole. Sentence mode needs two passes over the same
// input (case statistics, then tokenization); each pass re-reads it.

use std::path::PathBuf;

use super::io;
use crate::error::Result;

/// One input line: raw text, or a line that was tokenized upstream.
#[derive(Debug, Clone, Copy)]
pub enum Line<'a> {
    Text(&'a str),
    Tokens(&'a [String]),
}

impl Line<'_> {
    /// Is this line the end-of-document sentinel?
    pub fn is_sentinel(&self, eod: &str) -> bool {
        match self {
            Line::Text(text) => *text == eod,
            Line::Tokens(tokens) => tokens.len() == 1 && tokens[0] == eod,
        }
    }
}

/// The three shapes a document collection can be handed over in.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentSource {
    /// A text file (gzip when it ends in `.gz`), one sentence or paragraph
    /// per line.
    FilePath(PathBuf),
    /// Raw text lines held in memory.
    InlineLines { name: String, lines: Vec<String> },
    /// Lines already split into tokens.
    PretokenizedLines {
        name: String,
        lines: Vec<Vec<String>>,
    },
}

impl DocumentSource {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        DocumentSource::FilePath(path.into())
    }

    pub fn inline<I, S>(name: &str, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        DocumentSource::InlineLines {
            name: name.to_string(),
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    pub fn pretokenized(name: &str, lines: Vec<Vec<String>>) -> Self {
        DocumentSource::PretokenizedLines {
            name: name.to_string(),
            lines,
        }
    }

    /// Name used in the display name of documents from this source.
    pub fn name(&self) -> String {
        match self {
            DocumentSource::FilePath(path) => path.display().to_string(),
            DocumentSource::InlineLines { name, .. }
            | DocumentSource::PretokenizedLines { name, .. } => name.clone(),
        }
    }

    /// Feed every line of the source to `f`, in order.
    ///
    /// Line terminators are stripped from file and inline text lines.
    pub fn for_each_line<F>(&self, mut f: F) -> Result<()>
    where
        F: FnMut(Line<'_>) -> Result<()>,
    {
        match self {
            DocumentSource::FilePath(path) => io::for_each_line(path, |line| f(Line::Text(line))),
            DocumentSource::InlineLines { lines, .. } => lines
                .iter()
                .try_for_each(|line| f(Line::Text(crate::text::casing::chomp(line)))),
            DocumentSource::PretokenizedLines { lines, .. } => {
                lines.iter().try_for_each(|tokens| f(Line::Tokens(tokens)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_detection() {
        let eod = "---END.OF.DOCUMENT---";
        assert!(Line::Text(eod).is_sentinel(eod));
        assert!(!Line::Text("text").is_sentinel(eod));
        let tokens = vec![eod.to_string()];
        assert!(Line::Tokens(&tokens).is_sentinel(eod));
    }

    #[test]
    fn test_inline_lines_are_chomped() {
        let source = DocumentSource::inline("mem", ["one\n", "two\r\n"]);
        let mut seen = Vec::new();
        source
            .for_each_line(|line| {
                if let Line::Text(text) = line {
                    seen.push(text.to_string());
                }
                Ok(())
            })
            .unwrap();
        assert_eq!(seen, vec!["one", "two"]);
        assert_eq!(source.name(), "mem");
    }
}
