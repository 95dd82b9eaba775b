//! Parsing a report exported in several files.
//!
//! SIGRA exports are often split, one file per department or per period.
//! The files of one report kind are parsed in parallel and their outputs
//! merged in the order the files were given, so a later file takes
//! precedence over an earlier one.

use std::{
    ffi::OsStr,
    path::{Path, PathBuf},
};

use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use walkdir::WalkDir;

use crate::{
    report::{
        self, Merge, ParseOptions, Parsed, ParsedReport, ReportKind, catalog, contacts, flow,
        history, offering, roster, statistics,
    },
    source::{self, Encoding, LoadError},
};

/// Errors that can occur when parsing a batch of report files.
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    /// A file could not be read.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// A file does not follow the layout of its report kind.
    #[error("failed to parse {path}: {source}")]
    Parse {
        /// The file that was being parsed.
        path: PathBuf,
        /// The parse error.
        source: report::Error,
    },
}

/// Parses several files with the same parser and merges the results.
///
/// # Errors
///
/// Returns the error of the first file, in input order, that fails to load
/// or parse.
pub fn parse_files<T, F>(
    paths: &[PathBuf],
    encoding: Encoding,
    options: &ParseOptions,
    parse: F,
) -> Result<Parsed<T>, BatchError>
where
    T: Merge + Default + Send,
    F: Fn(&str, &ParseOptions) -> Result<Parsed<T>, report::Error> + Sync,
{
    let results: Vec<Result<Parsed<T>, BatchError>> = paths
        .par_iter()
        .map(|path| parse_file(path, encoding, options, &parse))
        .collect();
    let outputs = results.into_iter().collect::<Result<Vec<_>, _>>()?;

    let mut merged = Parsed::default();
    for output in outputs {
        merged.merge(output);
    }
    tracing::debug!("merged {} files", paths.len());
    Ok(merged)
}

fn parse_file<T, F>(
    path: &Path,
    encoding: Encoding,
    options: &ParseOptions,
    parse: &F,
) -> Result<Parsed<T>, BatchError>
where
    F: Fn(&str, &ParseOptions) -> Result<Parsed<T>, report::Error>,
{
    let text = source::read_to_string(path, encoding)?;
    parse(&text, options).map_err(|source| BatchError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses several files of one report kind and merges the results.
///
/// # Errors
///
/// Returns the error of the first file, in input order, that fails to load
/// or parse.
pub fn parse_kind(
    kind: ReportKind,
    paths: &[PathBuf],
    encoding: Encoding,
    options: &ParseOptions,
) -> Result<ParsedReport, BatchError> {
    Ok(match kind {
        ReportKind::Offering => {
            ParsedReport::Offering(parse_files(paths, encoding, options, offering::parse)?)
        }
        ReportKind::Catalog => {
            ParsedReport::Catalog(parse_files(paths, encoding, options, catalog::parse)?)
        }
        ReportKind::Flow => ParsedReport::Flow(parse_files(paths, encoding, options, flow::parse)?),
        ReportKind::Roster => {
            ParsedReport::Roster(parse_files(paths, encoding, options, roster::parse)?)
        }
        ReportKind::Contacts => {
            ParsedReport::Contacts(parse_files(paths, encoding, options, contacts::parse)?)
        }
        ReportKind::GradeHistory => {
            ParsedReport::GradeHistory(parse_files(paths, encoding, options, history::parse)?)
        }
        ReportKind::EntryStatistics => ParsedReport::EntryStatistics(parse_files(
            paths,
            encoding,
            options,
            statistics::parse,
        )?),
    })
}

/// Collects the report files under a directory, sorted by path.
///
/// Only `.txt` files are considered; unreadable entries are skipped.
#[must_use]
pub fn collect_reports(root: &Path) -> Vec<PathBuf> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| entry.path().extension() == Some(OsStr::new("txt")))
        .map(walkdir::DirEntry::into_path)
        .collect()
}
