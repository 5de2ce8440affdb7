// Exchange file naming and writing.
//
// Files share a stem: for stem `out/docs` we write `out/docword.docs.txt`,
// `out/vocab.docs.txt`, `out/docs.txtbag` and `out/docs.ldac`. The sampler
// is given the stem itself and finds the files by convention.

use std::path::{Path, PathBuf};

use tracing::info;

use super::formats;
use crate::corpus::io::write_file;
use crate::corpus::Corpus;
use crate::error::Result;

#[derive(Debug, Clone, PartialEq)]
pub struct ExchangeFiles {
    stem: PathBuf,
    /// Append `.gz` to every file name
    gzip: bool,
}

impl ExchangeFiles {
    pub fn new(stem: impl Into<PathBuf>) -> Self {
        Self {
            stem: stem.into(),
            gzip: false,
        }
    }

    pub fn gzipped(mut self, gzip: bool) -> Self {
        self.gzip = gzip;
        self
    }

    pub fn stem(&self) -> &Path {
        &self.stem
    }

    fn dir(&self) -> &Path {
        self.stem.parent().unwrap_or_else(|| Path::new(""))
    }

    fn base(&self) -> String {
        self.stem
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    fn finish(&self, path: PathBuf) -> PathBuf {
        if self.gzip {
            let mut name = path.into_os_string();
            name.push(".gz");
            PathBuf::from(name)
        } else {
            path
        }
    }

    pub fn docword_path(&self) -> PathBuf {
        self.finish(self.dir().join(format!("docword.{}.txt", self.base())))
    }

    pub fn vocab_path(&self) -> PathBuf {
        self.finish(self.dir().join(format!("vocab.{}.txt", self.base())))
    }

    pub fn txtbag_path(&self) -> PathBuf {
        self.finish(self.dir().join(format!("{}.txtbag", self.base())))
    }

    pub fn ldac_path(&self) -> PathBuf {
        self.finish(self.dir().join(format!("{}.ldac", self.base())))
    }

    /// Write every exchange file for the corpus.
    pub fn write_all(&self, corpus: &mut Corpus) -> Result<()> {
        write_file(&self.vocab_path(), |out| formats::write_vocab(corpus, out))?;
        write_file(&self.docword_path(), |out| formats::write_docword(corpus, out))?;
        write_file(&self.txtbag_path(), |out| formats::write_txtbag(corpus, out))?;
        write_file(&self.ldac_path(), |out| formats::write_ldac(corpus, out))?;

        info!(
            stem = %self.stem.display(),
            documents = corpus.len(),
            vocabulary = corpus.vocabulary().len(),
            "Wrote exchange files"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::{CorpusOptions, DocumentSource, StopwordSource};

    #[test]
    fn test_paths_follow_stem() {
        let files = ExchangeFiles::new("out/docs");
        assert_eq!(files.docword_path(), PathBuf::from("out/docword.docs.txt"));
        assert_eq!(files.vocab_path(), PathBuf::from("out/vocab.docs.txt"));
        assert_eq!(files.txtbag_path(), PathBuf::from("out/docs.txtbag"));
        assert_eq!(files.ldac_path(), PathBuf::from("out/docs.ldac"));

        let bare = ExchangeFiles::new("docs").gzipped(true);
        assert_eq!(bare.docword_path(), PathBuf::from("docword.docs.txt.gz"));
    }

    #[test]
    fn test_write_all() {
        let dir = tempfile::tempdir().unwrap();
        let files = ExchangeFiles::new(dir.path().join("model/docs"));
        let source = DocumentSource::inline("mem", ["ocean blue ocean"]);
        let mut corpus =
            Corpus::from_sources(CorpusOptions::default(), &StopwordSource::None, &[source])
                .unwrap();

        files.write_all(&mut corpus).unwrap();

        let vocab = std::fs::read_to_string(files.vocab_path()).unwrap();
        assert_eq!(vocab, "ocean\nblue\n");
        let docword = std::fs::read_to_string(files.docword_path()).unwrap();
        assert_eq!(docword, "1\n2\n2\n1 0 2\n1 1 1\n");
        assert!(files.txtbag_path().exists());
        assert!(files.ldac_path().exists());
    }
}
