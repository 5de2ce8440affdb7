// File access with transparent gzip.
//
// Any path ending in `.gz` is read through a gzip decoder and written
// through a gzip encoder; everything else is plain text.

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;

use crate::error::{Error, Result};

fn is_gzip(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "gz")
}

/// Open a file for buffered line reading.
pub fn open_reader(path: &Path) -> Result<Box<dyn BufRead>> {
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    if is_gzip(path) {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Call `f` with every line of the file, without its line terminator.
pub fn for_each_line<F>(path: &Path, mut f: F) -> Result<()>
where
    F: FnMut(&str) -> Result<()>,
{
    let mut reader = open_reader(path)?;
    let mut line = String::new();
    loop {
        line.clear();
        let n = reader
            .read_line(&mut line)
            .map_err(|e| Error::io(path, e))?;
        if n == 0 {
            return Ok(());
        }
        f(crate::text::casing::chomp(&line))?;
    }
}

/// Create (or truncate) a file and hand a buffered writer to `write`.
///
/// Parent directories are created as needed. The writer is flushed, and a
/// gzip stream finished, before returning.
pub fn write_file<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut dyn Write) -> io::Result<()>,
{
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    let file = File::create(path).map_err(|e| Error::io(path, e))?;

    let result = if is_gzip(path) {
        let mut out = BufWriter::new(GzEncoder::new(file, Compression::default()));
        write(&mut out)
            .and_then(|()| out.into_inner().map_err(|e| e.into_error()))
            .and_then(|encoder| encoder.finish())
            .map(|_| ())
    } else {
        let mut out = BufWriter::new(file);
        write(&mut out).and_then(|()| out.flush())
    };
    result.map_err(|e| Error::io(path, e))
}
