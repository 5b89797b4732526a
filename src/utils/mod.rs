//! Utility functions and helpers.
//!
//! - [`format`] - JSON document and number formatting
//! - [`processor`] - Line-by-line processing loop with statistics
//! - [`progress`] - Progress display on stderr
//! - [`reader`] - File reader with automatic decompression

pub mod format;
pub mod processor;
pub mod progress;
pub mod reader;
