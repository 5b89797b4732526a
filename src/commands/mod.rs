//! Command implementations.
//!
//! - [`convert`] - Convert an audit log into JSON records, one per line

pub mod convert;
