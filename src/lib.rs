//! Structured extraction of SIGRA reports
//!
//! SIGRA, the undergraduate administration system of the University of
//! Brasília, exports its reports as paginated fixed-width text. This crate
//! turns those exports into typed records.

pub mod analysis;
pub mod batch;
pub mod domain;
pub use domain::{Config, ConfigError};

/// Parsing of the individual report kinds.
pub mod report;
pub use report::{ParseOptions, ParsedReport, Report, ReportKind};

/// Reading report files from disk.
pub mod source;
pub use source::{Encoding, LoadError};
