use crate::error::{ReplaceError, Result};
use crate::replacer::FileRecord;
use chrono::{DateTime, Local};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Line written when a run modified nothing
pub const NO_REPLACEMENTS: &str = "No replacements made";

/// Name of the log file for a run started at `started`
pub fn log_file_name(started: &DateTime<Local>) -> String {
    format!("log-{}.txt", started.format("%Y-%m-%d-%H-%M-%S"))
}

/// Append-only report of the changes made during one run
///
/// Generic over the writer so tests can record into a `Vec<u8>`.
pub struct ReplaceLog<W: Write> {
    writer: W,
    search_text: String,
    replacement_text: String,
    blocks: usize,
}

impl ReplaceLog<BufWriter<File>> {
    /// Create (or truncate) the run's log file inside `dir`
    ///
    /// # Returns
    /// * `Result<(Self, PathBuf)>` - The log and the path of the file it writes to
    pub fn create_in(
        dir: &Path,
        started: &DateTime<Local>,
        search_text: &str,
        replacement_text: &str,
    ) -> Result<(Self, PathBuf)> {
        let path = dir.join(log_file_name(started));
        let file = File::create(&path).map_err(|source| ReplaceError::LogCreation {
            path: path.clone(),
            source,
        })?;

        Ok((
            Self::new(BufWriter::new(file), search_text, replacement_text),
            path,
        ))
    }
}

impl<W: Write> ReplaceLog<W> {
    pub fn new(writer: W, search_text: &str, replacement_text: &str) -> Self {
        Self {
            writer,
            search_text: search_text.to_string(),
            replacement_text: replacement_text.to_string(),
            blocks: 0,
        }
    }

    /// Append the block describing one rewritten file
    pub fn record(&mut self, record: &FileRecord) -> Result<()> {
        writeln!(self.writer, "File: {}", record.path.display()).map_err(ReplaceError::LogWrite)?;
        writeln!(self.writer, "Replacements:").map_err(ReplaceError::LogWrite)?;
        for offset in &record.offsets {
            writeln!(
                self.writer,
                "  {}: \"{}\" -> \"{}\"",
                offset, self.search_text, self.replacement_text
            )
            .map_err(ReplaceError::LogWrite)?;
        }
        writeln!(self.writer).map_err(ReplaceError::LogWrite)?;

        self.blocks += 1;
        Ok(())
    }

    /// Close out the report after the walk finished
    ///
    /// Writes the sentinel line if no block was recorded.
    pub fn finish(&mut self) -> Result<()> {
        if self.blocks == 0 {
            writeln!(self.writer, "{}", NO_REPLACEMENTS).map_err(ReplaceError::LogWrite)?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush().map_err(ReplaceError::LogWrite)
    }

    /// Number of file blocks written so far
    #[cfg(test)]
    pub fn blocks(&self) -> usize {
        self.blocks
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.writer
    }
}
