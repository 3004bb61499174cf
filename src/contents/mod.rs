//! Streaming reader for gzip compressed Contents files.
//!
//! Each line of a Contents file maps one installed path to the package(s)
//! shipping it:
//!
//! ```text
//! usr/bin/foo                                   admin/foo
//! usr/share/doc/bar/README                      doc/bar,doc/bar-common
//! ```
mod parse;
pub use parse::{package_display_name, split_package_list};

use crate::error::ContentsError;

use flate2::read::MultiGzDecoder;
use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::{Path, PathBuf},
};

/// One line of a Contents file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentsRecord {
    pub file_path: String,
    /// Usually `section/name`, may be a comma separated list of those
    pub package_ref: String,
}

impl ContentsRecord {
    /// Packages named by this record. Falls back to the whole field if it isn't a clean list.
    pub fn packages(&self) -> Vec<&str> {
        split_package_list(&self.package_ref).unwrap_or_else(|| vec![self.package_ref.as_str()])
    }
}

/// Open a downloaded Contents file for line by line extraction.
///
/// Every gzip member of the file is read, anything after the last member must be another member.
pub fn extract(
    path: &Path,
) -> Result<ContentsReader<BufReader<MultiGzDecoder<File>>>, ContentsError> {
    let f = File::open(path).map_err(|e| ContentsError::filesystem(path, e))?;
    Ok(ContentsReader::new(BufReader::new(MultiGzDecoder::new(f)), path))
}

/// Forward-only iterator of [`ContentsRecord`]s over a decompressed stream.
///
/// A malformed line yields an error and iteration may continue past it.
/// A decompression or read error ends the iteration.
pub struct ContentsReader<R> {
    inner: R,
    // Where the stream came from, for error messages
    source: PathBuf,
    line_no: usize,
    buffer: Vec<u8>,
    done: bool,
}

impl<R: BufRead> ContentsReader<R> {
    pub fn new(inner: R, source: impl Into<PathBuf>) -> Self {
        ContentsReader {
            inner,
            source: source.into(),
            line_no: 0,
            buffer: Vec::with_capacity(256),
            done: false,
        }
    }

    /// Number of lines read so far
    pub fn lines_read(&self) -> usize {
        self.line_no
    }

    fn malformed(&self, reason: impl Into<String>) -> ContentsError {
        ContentsError::MalformedLine {
            path: self.source.clone(),
            line: self.line_no,
            reason: reason.into(),
        }
    }

    // flate2 reports bad compressed data as InvalidInput
    fn read_error(&self, e: io::Error) -> ContentsError {
        match e.kind() {
            io::ErrorKind::InvalidInput
            | io::ErrorKind::InvalidData
            | io::ErrorKind::UnexpectedEof => ContentsError::Decode {
                path: self.source.clone(),
                source: e,
            },
            _ => ContentsError::filesystem(&self.source, e),
        }
    }

    fn next_record(&mut self) -> Result<Option<ContentsRecord>, ContentsError> {
        self.buffer.clear();
        let len = self
            .inner
            .read_until(b'\n', &mut self.buffer)
            .map_err(|e| self.read_error(e))?;
        if len == 0 {
            // EOF
            return Ok(None);
        }
        self.line_no += 1;

        let line = match std::str::from_utf8(&self.buffer) {
            Ok(line) => line,
            Err(e) => return Err(self.malformed(format!("invalid UTF-8: {}", e))),
        };
        match parse::split_contents_line(line) {
            Some((path, package)) => Ok(Some(ContentsRecord {
                file_path: path.to_owned(),
                package_ref: package.to_owned(),
            })),
            None => Err(self.malformed(format!(
                "no whitespace between path and package in {:?}",
                line.trim_end()
            ))),
        }
    }
}

impl<R: BufRead> Iterator for ContentsReader<R> {
    type Item = Result<ContentsRecord, ContentsError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                // A broken stream can't be resumed, a bad line can
                if !matches!(e, ContentsError::MalformedLine { .. }) {
                    self.done = true;
                }
                Some(Err(e))
            }
        }
    }
}
