//! # DB Audit Tools
//!
//! Converts the pipe-delimited audit log written by a database server into
//! one JSON record per line.
//!
//! ## Overview
//!
//! Each audit line carries a whitespace-separated header followed by
//! `key:value` attributes joined with `|`:
//!
//! ```text
//! INFO AuditLog 2021-01-01 12:00:00,000 SomeClass - host:/127.0.0.1|source:/127.0.0.1|user:alice|...|consistency level:ONE
//! ```
//!
//! The header becomes the top-level fields of a [`LogRecord`](audit::types::LogRecord)
//! and the attributes fill its nested operation record. Records are streamed:
//! one line is read, converted, and written before the next is touched.
//!
//! ## Architecture
//!
//! - [`audit`] - Line parser and record types
//! - [`commands`] - The conversion command
//! - [`error`] - Fatal failure classes and their exit codes
//! - [`utils`] - Input reading, the processing loop, progress and formatting
//!
//! ## Example Usage
//!
//! ```bash
//! # Convert ./audit.log to stdout
//! db-audit
//!
//! # Compressed input, flat output to a file
//! db-audit --file audit.log.gz --shape flat --output audit.json
//!
//! # Fail fast on malformed lines and report statistics
//! db-audit -file audit.log --strict --summary
//! ```

pub mod audit;
pub mod commands;
pub mod error;
pub mod utils;
