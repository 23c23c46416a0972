use thiserror::Error;

use crate::{
    layout::Field,
    prelude::{Epoch, SV},
};

/// Errors that may rise while scanning the file header.
/// These are fatal: the file is not interpreted any further.
#[derive(Error, Debug)]
pub enum ParsingError {
    #[error("header delimiter not found")]
    MissingHeaderDelimiter,
    #[error("invalid RINEX VERSION / TYPE descriptor \"{0}\"")]
    VersionParsing(String),
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),
    #[error("not a navigation file")]
    NotNavigationData,
    #[error("i/o error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Errors tied to a single navigation record.
/// The record is dropped and the file interpretation moves on.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecordError {
    #[error("line {line}: record interrupted after {collected}/{expected} continuation lines")]
    TruncatedRecord {
        line: usize,
        collected: usize,
        expected: usize,
    },
    /// Wrong number of values, or a value out of its column.
    /// In the latter case `found` counts the values read in place.
    #[error("line {line}: {sv} expecting {min} to {max} values, found {found}")]
    FieldCountMismatch {
        line: usize,
        sv: SV,
        min: usize,
        max: usize,
        found: usize,
    },
    #[error("line {line}: invalid epoch \"{content}\"")]
    EpochParsing { line: usize, content: String },
    #[error("line {line}: invalid satellite \"{content}\"")]
    SvParsing { line: usize, content: String },
}

/// A numeric token that matched the number pattern,
/// but did not convert to a finite value.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("invalid numeric token \"{token}\"")]
pub struct ParseError {
    pub token: String,
}

/// Errors tied to a single propagation request.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PropagationError {
    #[error("missing {0} parameter")]
    MissingParameter(Field),
    #[error("{field}={value:e} is out of its physical domain")]
    Domain { field: Field, value: f64 },
    #[error("{sv}: no ephemeris valid at {epoch}")]
    NoEphemeris { sv: SV, epoch: Epoch },
}

/// Top level error, returned by the [crate::driver]
#[derive(Error, Debug)]
pub enum Error {
    #[error("parsing error: {0}")]
    Parsing(#[from] ParsingError),
    #[error("propagation error: {0}")]
    Propagation(#[from] PropagationError),
    #[error("i/o error: {0}")]
    IoError(#[from] std::io::Error),
}
