#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate gnss_rs as gnss;

#[macro_use]
extern crate lazy_static;

pub mod cfg;
pub mod constants;
pub mod driver;
pub mod error;
pub mod gnss_time;
pub mod header;
pub mod ionosphere;
pub mod kepler;
pub mod layout;
pub mod leap;
pub mod navigation;
pub mod orbit;
pub mod reader;
pub mod token;
pub mod version;

#[cfg(test)]
mod tests;

use log::debug;

use std::{io::BufRead, path::Path, str::FromStr};

use crate::{
    error::{ParsingError, RecordError},
    header::Header,
    navigation::{DuplicatePolicy, EphemerisStore, RecordReader},
    prelude::Constellation,
    reader::BufferedReader,
};

/// Package to include all basic structures
pub mod prelude {
    // export
    pub use crate::{
        cfg::Config,
        driver::{run, Summary},
        error::{Error, ParseError, ParsingError, PropagationError, RecordError},
        header::{Header, TimeSystemCorrection},
        ionosphere::KbModel,
        kepler::{ConvergenceWarning, KeplerOptions, KeplerSolution},
        layout::{Field, Layout},
        leap::Leap,
        navigation::{DuplicatePolicy, EphemerisRecord, EphemerisStore},
        orbit::{EcefPosition, Kepler, Perturbations},
        version::Version,
        NavigationFile,
    };

    // pub re-export
    pub use gnss::prelude::{Constellation, SV};
    pub use hifitime::{Duration, Epoch, TimeScale};
}

/// [NavigationFile] is the result of interpreting one navigation file:
/// its [Header], the [EphemerisStore] built from its body,
/// and the records that had to be rejected.
#[derive(Debug, Clone)]
pub struct NavigationFile {
    /// File [Header]
    pub header: Header,
    /// All accepted records
    pub store: EphemerisStore,
    /// Rejected records, in order of appearance
    pub rejected: Vec<RecordError>,
}

impl NavigationFile {
    /// Interprets a navigation file, header first.
    /// ## Inputs
    /// - reader: [BufRead]able content
    /// - filter: only retain records of this [Constellation].
    ///   The filter applies to correctly formed records only: malformed
    ///   records are reported whatever their constellation.
    /// - policy: [DuplicatePolicy] applied while building the store
    ///
    /// Only header and I/O errors are fatal: malformed records are
    /// skipped and listed in [Self::rejected].
    pub fn parse<R: BufRead>(
        reader: &mut R,
        filter: Option<Constellation>,
        policy: DuplicatePolicy,
    ) -> Result<Self, ParsingError> {
        let header = Header::parse(reader)?;

        let mut records = RecordReader::new(reader, &header)
            .ok_or_else(|| ParsingError::UnsupportedFormat(format!("RINEX {}", header.version)))?;

        let mut store = EphemerisStore::new(policy);
        let mut rejected = Vec::<RecordError>::new();

        for record in records.by_ref() {
            match record {
                Ok(record) => match filter {
                    Some(constellation) if record.sv.constellation != constellation => {
                        debug!("{}({}) filtered out", record.sv, record.toc);
                    },
                    _ => store.insert(record),
                },
                Err(e) => rejected.push(e),
            }
        }

        if let Some(e) = records.take_io_error() {
            return Err(ParsingError::IoError(e));
        }

        debug!(
            "{} records stored, {} skipped",
            store.len(),
            rejected.len()
        );

        Ok(Self {
            header,
            store,
            rejected,
        })
    }

    /// Interprets a local navigation file, possibly gzip compressed
    /// (requires the `flate2` feature)
    pub fn from_file<P: AsRef<Path>>(
        path: P,
        filter: Option<Constellation>,
        policy: DuplicatePolicy,
    ) -> Result<Self, ParsingError> {
        let mut reader = BufferedReader::new(path.as_ref())?;
        Self::parse(&mut reader, filter, policy)
    }

    /// Returns number of rejected records
    pub fn skipped(&self) -> usize {
        self.rejected.len()
    }
}

impl FromStr for NavigationFile {
    type Err = ParsingError;
    /// Interprets navigation content, without filter
    /// and with the default [DuplicatePolicy]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut content = s.as_bytes();
        Self::parse(&mut content, None, DuplicatePolicy::default())
    }
}
