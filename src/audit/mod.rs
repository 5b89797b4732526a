//! Core audit log parsing and data structures.
//!
//! ## Key Components
//!
//! - [`types`] - Output records and the known field table
//! - [`parser`] - Line parser turning one log line into a record
//!
//! ## Example
//!
//! ```
//! use db_audit_tools::audit::parser::parse_line;
//!
//! let line = "INFO AuditLog 2021-01-01 12:00:00, Cls - host:/10.0.0.1|operation:SELECT * FROM ks.tbl.select.";
//! let record = parse_line(line).unwrap();
//! assert_eq!(record.operation.operation_message, "SELECT * FROM ks.tbl");
//! assert_eq!(record.operation.operation, "select");
//! ```

pub mod parser;
pub mod types;
