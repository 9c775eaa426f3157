//! Durable sensor log - append-only line store
//!
//! One record per line, append-only for the process lifetime. Write access is
//! single-owner: the ingestion worker holds the only [`LogWriter`]. Reads open
//! the file independently per call and never block on the writer; the
//! write-then-sync discipline in [`LogWriter::append`] is what keeps a racing
//! reader from ever observing a torn line.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Handle on the durable log. Cheap to clone; each read opens the file fresh.
#[derive(Debug, Clone)]
pub struct SensorLog {
    path: PathBuf,
}

impl SensorLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open the exclusive append handle, creating the file if absent.
    /// Single-writer discipline: call once, hand the writer to the producer.
    pub fn open_writer(&self) -> io::Result<LogWriter> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        Ok(LogWriter { file })
    }

    /// Last non-blank line of the log, or `None` when the file is absent or
    /// holds no non-blank lines (cold start).
    pub async fn read_latest(&self) -> io::Result<Option<String>> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e),
        };

        Ok(contents
            .lines()
            .rev()
            .find(|line| !line.trim().is_empty())
            .map(|line| line.trim().to_string()))
    }
}

/// Exclusive append handle to the sensor log.
pub struct LogWriter {
    file: File,
}

impl LogWriter {
    /// Append one record as a newline-terminated line, flushed to stable
    /// storage before returning.
    pub fn append(&mut self, record: &str) -> io::Result<()> {
        // Full line in a single write call: a reader racing this append sees
        // either the previous complete line or this one, never a fragment.
        let mut line = String::with_capacity(record.len() + 1);
        line.push_str(record);
        line.push('\n');
        self.file.write_all(line.as_bytes())?;
        self.file.sync_data()
    }
}
