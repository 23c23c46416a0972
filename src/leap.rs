//! Describes `leap` second information, contained in `header`
use thiserror::Error;

use crate::prelude::Constellation;

use std::str::FromStr;

/// `Leap` to describe leap seconds.
/// UTC = GPST - ΔtLS
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Leap {
    /// current number
    pub leap: u32,
    /// ΔtLS : future or past leap second(s)
    pub delta_tls: Option<u32>,
    /// week counter
    pub week: Option<u32>,
    /// day counter
    pub day: Option<u32>,
    /// system time
    pub system: Option<Constellation>,
}

/// `Leap` parsing related errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("failed to parse leap second counter")]
    ParseIntError(#[from] std::num::ParseIntError),
    #[error("unknown time system \"{0}\"")]
    TimeSystem(String),
}

impl Leap {
    /// Builds a new `Leap` object to describe leap seconds
    pub fn new(
        leap: u32,
        delta_tls: Option<u32>,
        week: Option<u32>,
        day: Option<u32>,
        system: Option<Constellation>,
    ) -> Self {
        Self {
            leap,
            delta_tls,
            week,
            day,
            system,
        }
    }
}

/// Returns [start, end[ trimmed content, tolerating short lines
fn column(s: &str, start: usize, end: usize) -> &str {
    s.get(start..end.min(s.len())).unwrap_or("").trim()
}

impl FromStr for Leap {
    type Err = Error;
    /// Builds `Leap` from standard RINEX descriptor
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut ls = Leap::default();
        // leap second has two formats
        let items: Vec<&str> = s.split_ascii_whitespace().collect();
        if items.len() < 3 {
            // [1] simple format: basic
            ls.leap = items.first().unwrap_or(&"").parse::<u32>()?;
        } else {
            // [2] complex format: advanced infos (4I6, A3)
            ls.leap = column(s, 0, 6).parse::<u32>()?;
            ls.delta_tls = Some(column(s, 6, 12).parse::<u32>()?);
            ls.week = Some(column(s, 12, 18).parse::<u32>()?);
            ls.day = Some(column(s, 18, 24).parse::<u32>()?);
            let system = column(s, 24, 27);
            if !system.is_empty() {
                ls.system = Some(
                    Constellation::from_str(system)
                        .map_err(|_| Error::TimeSystem(system.to_string()))?,
                );
            }
        }
        Ok(ls)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    #[test]
    fn simple_format() {
        let leap = Leap::from_str("    15").unwrap();
        assert_eq!(leap.leap, 15);
        assert_eq!(leap.delta_tls, None);
        assert_eq!(leap.system, None);
        assert!(Leap::from_str("").is_err());
        assert!(Leap::from_str("   abc").is_err());
    }
    #[test]
    fn complex_format() {
        let leap = Leap::from_str("    18    18  2185     7GPS").unwrap();
        assert_eq!(
            leap,
            Leap::new(18, Some(18), Some(2185), Some(7), Some(Constellation::GPS))
        );
        let leap = Leap::from_str("    17    18  1929     7").unwrap();
        assert_eq!(leap, Leap::new(17, Some(18), Some(1929), Some(7), None));
    }
}
