use crate::{
    constants::Constants,
    kepler::KeplerOptions,
    navigation::DuplicatePolicy,
    prelude::{Constellation, Duration},
};

use std::path::{Path, PathBuf};

#[cfg(feature = "serde")]
use serde::Deserialize;

fn default_fit_interval() -> Duration {
    Duration::from_seconds(Constants::FIT_INTERVAL)
}

/// Run [Config]uration of the [crate::driver]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
pub struct Config {
    /// Navigation file to interpret (plain or gzip compressed)
    pub input_path: PathBuf,
    /// Positions are written to this file
    pub output_path: PathBuf,
    /// Only keep records of this constellation
    #[cfg_attr(feature = "serde", serde(default))]
    pub constellation_filter: Option<Constellation>,
    /// Ephemeris validity, on each side of ToE
    #[cfg_attr(feature = "serde", serde(default = "default_fit_interval"))]
    pub fit_interval: Duration,
    /// Handling of records sharing the same (SV, ToC)
    #[cfg_attr(feature = "serde", serde(default))]
    pub duplicates: DuplicatePolicy,
    /// Kepler solver options
    #[cfg_attr(feature = "serde", serde(default))]
    pub kepler: KeplerOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_path: PathBuf::new(),
            output_path: PathBuf::new(),
            constellation_filter: None,
            fit_interval: default_fit_interval(),
            duplicates: DuplicatePolicy::default(),
            kepler: KeplerOptions::default(),
        }
    }
}

impl Config {
    /// Builds a default [Config] for this (input, output) pair
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(input_path: P, output_path: Q) -> Self {
        Self {
            input_path: input_path.as_ref().to_path_buf(),
            output_path: output_path.as_ref().to_path_buf(),
            ..Default::default()
        }
    }
    /// Copies and returns [Config] with desired constellation filter
    pub fn with_constellation_filter(&self, constellation: Constellation) -> Self {
        let mut s = self.clone();
        s.constellation_filter = Some(constellation);
        s
    }
    /// Copies and returns [Config] with desired fit interval
    pub fn with_fit_interval(&self, fit_interval: Duration) -> Self {
        let mut s = self.clone();
        s.fit_interval = fit_interval;
        s
    }
    /// Copies and returns [Config] with desired [DuplicatePolicy]
    pub fn with_duplicates(&self, policy: DuplicatePolicy) -> Self {
        let mut s = self.clone();
        s.duplicates = policy;
        s
    }
    /// Copies and returns [Config] with desired [KeplerOptions]
    pub fn with_kepler_options(&self, opts: KeplerOptions) -> Self {
        let mut s = self.clone();
        s.kepler = opts;
        s
    }
}
