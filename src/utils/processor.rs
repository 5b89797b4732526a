//! Log file processing loop.
//!
//! [`LogProcessor`] reads an audit log one line at a time, parses each line
//! and hands the record to a caller-supplied handler. Nothing is buffered
//! beyond the current line, so memory use does not grow with the file.
//!
//! Lines that fail to parse are reported on stderr and skipped, unless
//! strict parsing is enabled, in which case the first one aborts the run.
//! Bytes that are not valid UTF-8 are replaced with U+FFFD rather than
//! failing the read.

use crate::audit::parser::parse_line;
use crate::audit::types::LogRecord;
use crate::error::ConvertError;
use crate::utils::format::format_number;
use crate::utils::progress::ProgressBar;
use crate::utils::reader::open_file;
use anyhow::{Context, Result};
use std::io::{BufRead, BufReader};

/// Statistics collected during log processing
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProcessStats {
    /// Total number of lines read
    pub total_lines: usize,
    /// Lines that parsed cleanly
    pub parsed_entries: usize,
    /// Lines emitted with a degraded operation field
    pub recovered_entries: usize,
    /// Lines dropped because they could not be parsed
    pub skipped_lines: usize,
    /// Empty lines
    pub blank_lines: usize,
}

impl ProcessStats {
    /// Number of records handed to the handler
    pub const fn emitted(&self) -> usize {
        self.parsed_entries + self.recovered_entries
    }

    /// Print a summary of processing statistics
    pub fn report(&self) {
        eprintln!("\nProcessing Summary:");
        eprintln!("  Total lines: {}", format_number(self.total_lines));
        eprintln!("  Parsed entries: {}", format_number(self.parsed_entries));
        if self.recovered_entries > 0 {
            eprintln!(
                "  Recovered entries: {}",
                format_number(self.recovered_entries)
            );
        }
        if self.blank_lines > 0 {
            eprintln!("  Blank lines: {}", format_number(self.blank_lines));
        }
        if self.skipped_lines > 0 {
            let skip_percentage = (self.skipped_lines as f64 / self.total_lines as f64) * 100.0;
            eprintln!(
                "  Skipped lines: {} ({:.2}%)",
                format_number(self.skipped_lines),
                skip_percentage
            );
        }
    }
}

/// Context provided to the record handler
#[derive(Debug)]
pub struct ProcessContext {
    /// Current line number (1-based)
    pub line_number: usize,
}

/// Drives parsing of a single audit log file
pub struct LogProcessor<'a> {
    file: &'a str,
    progress_label: String,
    strict_parsing: bool,
    show_progress: bool,
}

impl<'a> LogProcessor<'a> {
    /// Create a new log processor for the given file
    pub fn new(file: &'a str, progress_label: &str) -> Self {
        Self {
            file,
            progress_label: progress_label.to_string(),
            strict_parsing: false,
            show_progress: false,
        }
    }

    /// Enable strict parsing mode (fail on any parse error)
    #[must_use]
    pub const fn strict_parsing(mut self, strict: bool) -> Self {
        self.strict_parsing = strict;
        self
    }

    /// Draw a progress bar on stderr while processing
    #[must_use]
    pub const fn show_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Open the file and process every line with `handler`
    ///
    /// The handler receives each parsed record and the current context.
    /// Returning an error stops processing.
    pub fn process<F, E>(self, handler: F) -> Result<ProcessStats>
    where
        F: FnMut(&LogRecord, &ProcessContext) -> Result<(), E>,
        E: Into<anyhow::Error>,
    {
        let reader = BufReader::new(open_file(self.file)?);
        let file_size = std::fs::metadata(self.file)
            .ok()
            .map(|m| m.len() as usize);
        self.process_reader(reader, file_size, handler)
    }

    /// Process lines from an already opened reader
    pub fn process_reader<R, F, E>(
        self,
        mut reader: R,
        file_size: Option<usize>,
        mut handler: F,
    ) -> Result<ProcessStats>
    where
        R: BufRead,
        F: FnMut(&LogRecord, &ProcessContext) -> Result<(), E>,
        E: Into<anyhow::Error>,
    {
        let progress = match (self.show_progress, file_size) {
            (false, _) => ProgressBar::hidden(),
            (true, Some(size)) => ProgressBar::new(size, &self.progress_label),
            (true, None) => ProgressBar::new_spinner(&self.progress_label),
        };

        let mut stats = ProcessStats::default();
        let mut context = ProcessContext { line_number: 0 };
        let mut buf = Vec::with_capacity(1024);
        let mut bytes_read = 0;

        loop {
            buf.clear();
            let n = reader
                .read_until(b'\n', &mut buf)
                .map_err(|source| ConvertError::Scan {
                    path: self.file.to_string(),
                    line: context.line_number + 1,
                    source,
                })?;
            if n == 0 {
                break;
            }
            bytes_read += n;

            context.line_number += 1;
            stats.total_lines += 1;
            let line_number = context.line_number;

            let raw = buf.strip_suffix(b"\n").unwrap_or(&buf[..]);
            let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
            let line = String::from_utf8_lossy(raw);

            if line_number % 10_000 == 0 {
                match file_size {
                    Some(size) => progress.update(bytes_read.min(size)),
                    None => progress.update(line_number),
                }
            }

            if line.is_empty() {
                stats.blank_lines += 1;
                continue;
            }

            let record = match parse_line(&line) {
                Ok(record) => {
                    stats.parsed_entries += 1;
                    record
                }
                Err(err) if self.strict_parsing => {
                    return Err(ConvertError::Parse {
                        line: line_number,
                        source: err,
                    }
                    .into());
                }
                Err(err) => {
                    progress.println(format!("{}:{}: {}", self.file, line_number, err));
                    if let Some(record) = err.into_recovered() {
                        stats.recovered_entries += 1;
                        record
                    } else {
                        stats.skipped_lines += 1;
                        continue;
                    }
                }
            };

            if let Err(e) = handler(&record, &context) {
                return Err(e.into()).with_context(|| {
                    format!("Handler failed at line {} in {}", line_number, self.file)
                });
            }
        }

        progress.finish();
        Ok(stats)
    }
}
