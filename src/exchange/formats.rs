// Line formats of the exchange files read by the sampler.
//
//   vocab    one word per line; line N is word id N
//   docword  3-line header (documents, max word id, nonzero rows), then
//            "<doc id> <0-based word id> <count>" rows, ids ascending
//   txtbag   2-line header (documents, max word id), then one line per
//            document: "<doc id> <0-based id> <count> <0-based id> <count> ..."
//   ldac     "<doc name> <id>:<count> <id>:<count> ..." with 1-based ids

use std::io::{self, Write};

use crate::corpus::{Corpus, Document};

/// `"<id>:<count> ..."` over the document's wordbag (1-based ids).
pub fn ldac_terms(doc: &Document) -> String {
    doc.entries()
        .map(|(term, count)| format!("{term}:{count}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// A full ldac line for one document.
pub fn ldac_line(doc: &Document) -> String {
    format!("{} {}", doc.name(), ldac_terms(doc))
}

/// `"<0-based id> <count> ..."` over the document's wordbag.
pub fn txtbag_terms(doc: &Document) -> String {
    id_counts(doc)
        .map(|(id, count)| format!("{id} {count}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// A full txtbag line for one document.
pub fn txtbag_line(doc: &Document) -> String {
    format!("{} {}", doc.id(), txtbag_terms(doc))
}

/// `(doc id, 0-based word id, count)` rows, word ids ascending.
pub fn docword_rows(doc: &Document) -> impl Iterator<Item = (usize, u32, usize)> + '_ {
    id_counts(doc).map(move |(id, count)| (doc.id(), id, count))
}

/// Vocabulary-backed terms as (0-based id, count); raw-word terms are skipped.
fn id_counts(doc: &Document) -> impl Iterator<Item = (u32, usize)> + '_ {
    doc.entries()
        .filter_map(|(term, count)| term.id().map(|id| (id - 1, count)))
}

/// The docword header values: (documents, max word id, nonzero rows).
pub fn docword_header(corpus: &mut Corpus) -> (usize, u32, usize) {
    let total = corpus.total_count();
    let max_id = corpus.vocab().max_id();
    (corpus.len(), max_id, total)
}

pub fn write_vocab(corpus: &mut Corpus, out: &mut dyn Write) -> io::Result<()> {
    corpus.vocab().write_to(out)
}

pub fn write_docword(corpus: &mut Corpus, out: &mut dyn Write) -> io::Result<()> {
    let (docs, max_id, total) = docword_header(corpus);
    writeln!(out, "{docs}\n{max_id}\n{total}")?;
    for doc in corpus.documents() {
        for (doc_id, word_id, count) in docword_rows(doc) {
            writeln!(out, "{doc_id} {word_id} {count}")?;
        }
    }
    Ok(())
}

pub fn write_txtbag(corpus: &mut Corpus, out: &mut dyn Write) -> io::Result<()> {
    let max_id = corpus.vocab().max_id();
    writeln!(out, "{}\n{max_id}", corpus.len())?;
    for doc in corpus.documents() {
        writeln!(out, "{}", txtbag_line(doc))?;
    }
    Ok(())
}

pub fn write_ldac(corpus: &mut Corpus, out: &mut dyn Write) -> io::Result<()> {
    corpus.compute_wordbags();
    for doc in corpus.documents() {
        writeln!(out, "{}", ldac_line(doc))?;
    }
    Ok(())
}
