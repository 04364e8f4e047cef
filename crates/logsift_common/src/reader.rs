//! Streaming reader - forward-only line source over one file
//!
//! Lines are read through a fixed-size `BufReader`, so memory stays bounded by
//! the longest line rather than the file size. The reader is not restartable:
//! open a new one to read the file again.
//!
//! The underlying handle is dropped as soon as the sequence ends (EOF or
//! error), and otherwise when the reader itself is dropped, e.g. after
//! `take(n)`.

use crate::error::{LogsiftError, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::iter::FusedIterator;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default chunk size for file reads
pub const DEFAULT_BUFFER_CAPACITY: usize = 64 * 1024;

/// Lazy sequence of raw lines, without their line terminators
pub struct LogReader<R = BufReader<File>> {
    path: PathBuf,
    reader: Option<R>,
    buf: Vec<u8>,
    lines_read: u64,
}

impl LogReader<BufReader<File>> {
    /// Open `path` with the default buffer size
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_capacity(path, DEFAULT_BUFFER_CAPACITY)
    }

    /// Open `path`, reading in chunks of `capacity` bytes
    pub fn open_with_capacity(path: impl AsRef<Path>, capacity: usize) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| LogsiftError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(path = %path.display(), capacity, "opened log file");
        Ok(Self::from_reader(path, BufReader::with_capacity(capacity.max(1), file)))
    }
}

impl<R: BufRead> LogReader<R> {
    /// Wrap an already-buffered source. `name` is used in error messages.
    pub fn from_reader(name: impl Into<PathBuf>, reader: R) -> Self {
        Self {
            path: name.into(),
            reader: Some(reader),
            buf: Vec::new(),
            lines_read: 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Lines handed out so far
    pub fn lines_read(&self) -> u64 {
        self.lines_read
    }

    /// True once EOF or an error has ended the sequence
    pub fn is_finished(&self) -> bool {
        self.reader.is_none()
    }

    fn finish(&mut self) {
        if self.reader.take().is_some() {
            debug!(path = %self.path.display(), lines = self.lines_read, "closed log file");
        }
    }

    fn read_line(&mut self) -> Option<io::Result<()>> {
        let reader = self.reader.as_mut()?;
        self.buf.clear();

        match reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => None,
            Ok(_) => Some(Ok(())),
            Err(e) => Some(Err(e)),
        }
    }
}

impl<R: BufRead> Iterator for LogReader<R> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.read_line() {
            None => {
                self.finish();
                None
            }
            Some(Err(source)) => {
                let err = LogsiftError::Read {
                    path: self.path.clone(),
                    line: self.lines_read,
                    source,
                };
                self.finish();
                Some(Err(err))
            }
            Some(Ok(())) => {
                let mut line = self.buf.as_slice();
                if let Some(stripped) = line.strip_suffix(b"\n") {
                    line = stripped.strip_suffix(b"\r").unwrap_or(stripped);
                }
                self.lines_read += 1;
                Some(Ok(String::from_utf8_lossy(line).into_owned()))
            }
        }
    }
}

impl<R: BufRead> FusedIterator for LogReader<R> {}
