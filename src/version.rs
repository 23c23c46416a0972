//! `RINEX` revision description
use thiserror::Error;

use crate::layout::Layout;

/// Version is used to describe RINEX standards revisions.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Version {
    /// Version major number
    pub major: u8,
    /// Version minor number
    pub minor: u8,
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum ParsingError {
    #[error("empty version descriptor")]
    Empty,
    #[error("failed to parse version")]
    ParseIntError(#[from] std::num::ParseIntError),
}

impl Default for Version {
    /// Builds a default `Version` object
    fn default() -> Self {
        Self::new(3, 2)
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}.{:02}", self.major, self.minor)
    }
}

impl From<Version> for (u8, u8) {
    fn from(v: Version) -> (u8, u8) {
        (v.major, v.minor)
    }
}

impl std::str::FromStr for Version {
    type Err = ParsingError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParsingError::Empty);
        }
        match s.split_once('.') {
            Some((major, minor)) => Ok(Self {
                major: major.parse::<u8>()?,
                minor: if minor.is_empty() {
                    0
                } else {
                    minor.parse::<u8>()?
                },
            }),
            None => Ok(Self {
                major: s.parse::<u8>()?,
                minor: 0,
            }),
        }
    }
}

impl Version {
    /// Builds a new `Version` object
    pub const fn new(major: u8, minor: u8) -> Self {
        Self { major, minor }
    }
    /// Returns true if a navigation [Layout] is known for this revision
    pub fn is_supported(&self) -> bool {
        Layout::lookup(*self).is_some()
    }
}
