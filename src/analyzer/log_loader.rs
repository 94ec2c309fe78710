//! Sequential line reader over a transcript file.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use super::types::AnalyzerError;

/// Buffer size for reading transcript files (8KB).
const BUFFER_SIZE: usize = 8 * 1024;

/// Transcript file loader.
///
/// Owns the only file handle of a run; it is closed when the loader is
/// dropped, whether the pass finished or failed.
pub struct LogLoader {
    path: PathBuf,
    reader: BufReader<File>,
    line_buffer: String,
    line_number: usize,
}

impl LogLoader {
    /// Create a new log loader.
    ///
    /// # Parameters
    ///
    /// * `path` - Path to the transcript file
    ///
    /// # Returns
    ///
    /// `Ok(LogLoader)` if file opens successfully, `Err(AnalyzerError::Open)` otherwise.
    pub fn new(path: &Path) -> Result<Self, AnalyzerError> {
        let file = File::open(path).map_err(|source| AnalyzerError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            reader: BufReader::with_capacity(BUFFER_SIZE, file),
            line_buffer: String::with_capacity(512),
            line_number: 0,
        })
    }

    /// Read the next line from the transcript.
    ///
    /// # Returns
    ///
    /// `Ok(Some((line_number, line)))` with the `\n` / `\r\n` terminator
    /// stripped, `Ok(None)` at EOF. Blank lines are returned as empty strings
    /// so line numbers stay accurate. A lone `\r` is not a line break.
    pub fn next_line(&mut self) -> Result<Option<(usize, &str)>, AnalyzerError> {
        self.line_buffer.clear();

        match self.reader.read_line(&mut self.line_buffer) {
            Ok(0) => Ok(None),
            Ok(_) => {
                self.line_number += 1;
                let line = self.line_buffer.strip_suffix('\n').unwrap_or(&self.line_buffer);
                Ok(Some((self.line_number, line.strip_suffix('\r').unwrap_or(line))))
            }
            Err(source) => Err(AnalyzerError::Read {
                path: self.path.clone(),
                line: self.line_number + 1,
                source,
            }),
        }
    }

    /// 1-based number of the line last returned by `next_line`.
    pub fn line_number(&self) -> usize {
        self.line_number
    }
}
