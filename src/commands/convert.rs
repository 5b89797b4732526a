//! Audit log to JSON conversion.
//!
//! Reads an audit log line by line and writes one tab-indented JSON
//! document per record, in input order.
//!
//! # Usage
//!
//! ```bash
//! # Default input is ./audit.log
//! db-audit
//!
//! # Explicit file (plain or compressed)
//! db-audit --file /var/log/cassandra/audit/audit.log
//! db-audit --file audit.log.zst --output audit.json
//!
//! # Older single-level record layout
//! db-audit --file audit.log --shape flat
//! ```
//!
//! # Output
//!
//! Nested shape (default):
//!
//! ```text
//! {
//!     "log_level": "INFO",
//!     "stage": "AuditLog",
//!     "date_time": "2021-01-01 12:00:00,000",
//!     "class": "SomeClass",
//!     "operation": {
//!         "host": "127.0.0.1",
//!         ...
//!     }
//! }
//! ```
//!
//! Lines that cannot be parsed are reported on stderr and skipped. With
//! `--strict` the first such line ends the run with a non-zero exit code.

use crate::audit::types::LogRecord;
use crate::error::ConvertError;
use crate::utils::format::to_json_document;
use crate::utils::processor::{LogProcessor, ProcessStats};
use anyhow::Result;
use clap::ValueEnum;
use std::fs::File;
use std::io::{self, BufWriter, Write};

/// Layout of the emitted JSON documents
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputShape {
    /// Operation attributes under an `operation` object
    #[default]
    Nested,
    /// All attributes at the top level
    Flat,
}

/// Settings for a conversion run
#[derive(Debug, Clone)]
pub struct ConvertOptions<'a> {
    /// Input audit log path
    pub file: &'a str,
    /// Output file; stdout when `None`
    pub output: Option<&'a str>,
    pub shape: OutputShape,
    /// Abort on the first line that fails to parse
    pub strict: bool,
    /// Show a progress bar on stderr
    pub progress: bool,
    /// Print processing statistics on stderr when done
    pub summary: bool,
}

impl<'a> ConvertOptions<'a> {
    /// Defaults for converting `file` to stdout
    pub fn new(file: &'a str) -> Self {
        Self {
            file,
            output: None,
            shape: OutputShape::default(),
            strict: false,
            progress: false,
            summary: false,
        }
    }
}

/// Convert the input file, writing documents to stdout or `options.output`.
pub fn run(options: &ConvertOptions<'_>) -> Result<ProcessStats> {
    let stats = match options.output {
        Some(path) => {
            let file = File::create(path).map_err(|source| ConvertError::FileOpen {
                path: path.to_string(),
                source,
            })?;
            let mut writer = BufWriter::new(file);
            let stats = run_with_writer(options, &mut writer)?;

            let file = writer
                .into_inner()
                .map_err(|e| ConvertError::FileClose(e.into_error()))?;
            file.sync_all().map_err(ConvertError::FileClose)?;
            stats
        }
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            let stats = run_with_writer(options, &mut writer)?;
            writer.flush().map_err(ConvertError::FileClose)?;
            stats
        }
    };

    if options.summary {
        stats.report();
    }

    Ok(stats)
}

/// Convert the input file into `writer`.
///
/// The writer is not flushed; that is left to the caller.
pub fn run_with_writer<W: Write>(
    options: &ConvertOptions<'_>,
    writer: &mut W,
) -> Result<ProcessStats> {
    LogProcessor::new(options.file, "Converting")
        .strict_parsing(options.strict)
        .show_progress(options.progress)
        .process(|record, ctx| write_record(&mut *writer, record, options.shape, ctx.line_number))
}

fn write_record<W: Write>(
    writer: &mut W,
    record: &LogRecord,
    shape: OutputShape,
    line: usize,
) -> Result<(), ConvertError> {
    let document = match shape {
        OutputShape::Nested => to_json_document(record),
        OutputShape::Flat => to_json_document(&record.flatten()),
    }
    .map_err(|source| ConvertError::Serialization { line, source })?;

    writer
        .write_all(&document)
        .map_err(|source| ConvertError::OutputWrite { line, source })
}
