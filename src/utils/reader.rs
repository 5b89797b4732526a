//! Input file reader with automatic decompression support.
//!
//! Rotated audit logs are often archived compressed, so `.gz` and `.zst`
//! files are decoded on the fly and read exactly like plain text.
//!
//! # Examples
//!
//! ```no_run
//! use db_audit_tools::utils::reader::open_file;
//! use std::io::{BufRead, BufReader};
//!
//! let reader = BufReader::new(open_file("audit.log.gz").unwrap());
//! for line in reader.lines() {
//!     let line = line.unwrap();
//!     // Process line...
//! }
//! ```

use crate::error::ConvertError;
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Opens a file with automatic decompression based on extension.
///
/// - `.gz` → Gzip decompression
/// - `.zst` → Zstandard decompression
/// - Otherwise → Plain file
///
/// # Errors
///
/// Returns [`ConvertError::FileOpen`] when the file cannot be opened or the
/// zstd decoder cannot be initialised.
pub fn open_file(path: impl AsRef<Path>) -> Result<Box<dyn Read + Send>, ConvertError> {
    let path = path.as_ref();
    let open_error = |source| ConvertError::FileOpen {
        path: path.display().to_string(),
        source,
    };

    let file = File::open(path).map_err(open_error)?;

    match path.extension().and_then(|e| e.to_str()).unwrap_or("") {
        "gz" => Ok(Box::new(GzDecoder::new(file))),
        "zst" => {
            let decoder = zstd::Decoder::new(file).map_err(open_error)?;
            Ok(Box::new(decoder))
        }
        _ => Ok(Box::new(file)),
    }
}
