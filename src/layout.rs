//! Navigation record layouts.
//!
//! Each supported revision describes, as data, where the epoch line fields
//! sit and which ephemeris fields the record carries, in order of appearance.
//! The record reader only ever consults this table, so a new revision is
//! supported by adding a [Layout] to [LAYOUTS].
use crate::{
    gnss_time::{gpst_epoch, window_two_digit_year},
    prelude::{Constellation, Epoch, SV},
    version::Version,
};

use std::str::FromStr;

/// Broadcast ephemeris field
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Field {
    /// SV clock bias (s)
    ClockBias,
    /// SV clock drift (s.s⁻¹)
    ClockDrift,
    /// SV clock drift rate (s.s⁻²)
    ClockDriftRate,
    /// Issue of data, ephemeris
    Iode,
    /// Amplitude of the sine harmonic correction to the orbit radius (m)
    Crs,
    /// Mean motion difference from computed value (rad.s⁻¹)
    DeltaN,
    /// Mean anomaly at reference time (rad)
    M0,
    /// Amplitude of the cosine harmonic correction to the argument of latitude (rad)
    Cuc,
    /// Eccentricity
    Eccentricity,
    /// Amplitude of the sine harmonic correction to the argument of latitude (rad)
    Cus,
    /// Square root of the semi major axis (m^½)
    SqrtA,
    /// Time of ephemeris (seconds of GPS week)
    Toe,
    /// Amplitude of the cosine harmonic correction to the inclination (rad)
    Cic,
    /// Longitude of ascending node at weekly epoch (rad)
    Omega0,
    /// Amplitude of the sine harmonic correction to the inclination (rad)
    Cis,
    /// Inclination at reference time (rad)
    Io,
    /// Amplitude of the cosine harmonic correction to the orbit radius (m)
    Crc,
    /// Argument of perigee (rad)
    Omega,
    /// Rate of right ascension (rad.s⁻¹)
    OmegaDot,
    /// Rate of inclination (rad.s⁻¹)
    Idot,
    /// Codes on L2 channel
    CodesL2,
    /// GPS week, to go with ToE (continuous)
    GpsWeek,
    /// L2 P data flag
    L2PFlag,
    /// SV accuracy (m)
    SvAccuracy,
    /// SV health
    Health,
    /// Total group delay (s)
    Tgd,
    /// Issue of data, clock
    Iodc,
    /// Transmission time of message (seconds of GPS week)
    TransmissionTime,
    /// Fit interval (h)
    FitInterval,
}

impl Field {
    /// Readable name, as commonly found in ephemeris tables
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ClockBias => "SVclockBias",
            Self::ClockDrift => "SVclockDrift",
            Self::ClockDriftRate => "SVclockDriftRate",
            Self::Iode => "IODE",
            Self::Crs => "Crs",
            Self::DeltaN => "DeltaN",
            Self::M0 => "M0",
            Self::Cuc => "Cuc",
            Self::Eccentricity => "Eccentricity",
            Self::Cus => "Cus",
            Self::SqrtA => "sqrtA",
            Self::Toe => "Toe",
            Self::Cic => "Cic",
            Self::Omega0 => "Omega0",
            Self::Cis => "Cis",
            Self::Io => "Io",
            Self::Crc => "Crc",
            Self::Omega => "omega",
            Self::OmegaDot => "OmegaDot",
            Self::Idot => "IDOT",
            Self::CodesL2 => "CodesL2",
            Self::GpsWeek => "GPSWeek",
            Self::L2PFlag => "L2Pflag",
            Self::SvAccuracy => "SVacc",
            Self::Health => "health",
            Self::Tgd => "TGD",
            Self::Iodc => "IODC",
            Self::TransmissionTime => "TransTime",
            Self::FitInterval => "FitIntvl",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// GPS/QZSS legacy navigation message content, in order of appearance
pub const LNAV_FIELDS: [Field; 29] = [
    Field::ClockBias,
    Field::ClockDrift,
    Field::ClockDriftRate,
    Field::Iode,
    Field::Crs,
    Field::DeltaN,
    Field::M0,
    Field::Cuc,
    Field::Eccentricity,
    Field::Cus,
    Field::SqrtA,
    Field::Toe,
    Field::Cic,
    Field::Omega0,
    Field::Cis,
    Field::Io,
    Field::Crc,
    Field::Omega,
    Field::OmegaDot,
    Field::Idot,
    Field::CodesL2,
    Field::GpsWeek,
    Field::L2PFlag,
    Field::SvAccuracy,
    Field::Health,
    Field::Tgd,
    Field::Iodc,
    Field::TransmissionTime,
    Field::FitInterval,
];

/// Width of a numeric value column (D19.12)
pub const VALUE_WIDTH: usize = 19;

/// Column span, [start, end[ in bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Columns {
    pub start: usize,
    pub end: usize,
}

impl Columns {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
    /// Returns the (trimmed) content of this span.
    /// Short lines are tolerated: missing columns read as blank.
    pub fn slice<'a>(&self, line: &'a str) -> &'a str {
        let end = self.end.min(line.len());
        line.get(self.start..end).unwrap_or("").trim()
    }
}

/// Navigation record [Layout] for one revision
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    /// Revision this layout applies to
    pub version: Version,
    /// Satellite identifier on the epoch line
    pub sv: Columns,
    /// Year, month, day, hours, minutes and (fractional) seconds of ToC
    pub toc: [Columns; 6],
    /// First byte of the numeric content on the epoch line
    pub epoch_body: usize,
    /// Value columns of the epoch line (clock terms)
    pub clock_slots: [Columns; 3],
    /// Value columns of a continuation line.
    /// The last one is open ended, so an overflowing value is read whole.
    pub orbit_slots: [Columns; 4],
    /// Number of lines that follow the epoch line
    pub continuation_lines: usize,
    /// Fields carried by a record, in order of appearance
    pub fields: &'static [Field],
    /// Number of leading fields that must be present.
    /// The remaining fields may be omitted, in order, from the end.
    pub required: usize,
    /// Reserved (spare) slots that may follow the last field.
    /// They are read then discarded.
    pub reserved: usize,
}

/// Consecutive value columns, starting at `start`
const fn value_columns<const N: usize>(start: usize) -> [Columns; N] {
    let mut slots = [Columns::new(0, 0); N];
    let mut i = 0;
    while i < N {
        let offset = start + i * VALUE_WIDTH;
        slots[i] = Columns::new(offset, offset + VALUE_WIDTH);
        i += 1;
    }
    slots[N - 1].end = usize::MAX;
    slots
}

/// RINEX 2.11: PRN only, two digit year, F5.1 seconds
pub const V2_11: Layout = Layout {
    version: Version::new(2, 11),
    sv: Columns::new(0, 3),
    toc: [
        Columns::new(3, 5),
        Columns::new(6, 8),
        Columns::new(9, 11),
        Columns::new(12, 14),
        Columns::new(15, 17),
        Columns::new(17, 22),
    ],
    epoch_body: 22,
    clock_slots: value_columns(22),
    orbit_slots: value_columns(3),
    continuation_lines: 7,
    fields: &LNAV_FIELDS,
    required: 29,
    reserved: 2,
};

/// RINEX 3.02: full satellite identifier, four digit year, integer seconds
pub const V3_02: Layout = Layout {
    version: Version::new(3, 2),
    sv: Columns::new(0, 3),
    toc: [
        Columns::new(4, 8),
        Columns::new(9, 11),
        Columns::new(12, 14),
        Columns::new(15, 17),
        Columns::new(18, 20),
        Columns::new(21, 23),
    ],
    epoch_body: 23,
    clock_slots: value_columns(23),
    orbit_slots: value_columns(4),
    continuation_lines: 7,
    fields: &LNAV_FIELDS,
    required: 28,
    reserved: 2,
};

/// All known layouts
pub static LAYOUTS: [Layout; 2] = [V2_11, V3_02];

impl Layout {
    /// Returns the [Layout] that applies to this revision, if any
    pub fn lookup(version: Version) -> Option<&'static Layout> {
        LAYOUTS.iter().find(|layout| layout.version == version)
    }

    /// Accepted number of numeric tokens per record (inclusive range)
    pub fn accepted_tokens(&self) -> (usize, usize) {
        (self.required, self.fields.len() + self.reserved)
    }

    /// Returns true if this token count describes a complete record
    pub fn accepts(&self, tokens: usize) -> bool {
        let (min, max) = self.accepted_tokens();
        tokens >= min && tokens <= max
    }

    /// Number of lines that follow the epoch line, for this constellation.
    /// Mixed files interleave shorter GLONASS and SBAS records.
    pub fn continuation_lines(&self, constellation: Constellation) -> usize {
        if constellation == Constellation::Glonass || constellation.is_sbas() {
            3
        } else {
            self.continuation_lines
        }
    }

    /// Returns true if this line opens a new record
    pub fn is_epoch_line(&self, line: &str) -> bool {
        if line.len() < self.epoch_body {
            return false;
        }
        let sv = self.sv.slice(line);
        if sv.is_empty() {
            return false;
        }
        if self.version.major < 3 {
            sv.parse::<u8>().is_ok()
        } else {
            let mut chars = sv.chars();
            let letter = chars.next().map(|c| c.is_ascii_uppercase()).unwrap_or(false);
            letter && chars.as_str().trim().parse::<u8>().is_ok()
        }
    }

    /// Identifies the satellite of an epoch line.
    /// Old revisions only carry the PRN number: the constellation
    /// is then defined by the file header.
    pub fn parse_sv(&self, line: &str, constellation: Constellation) -> Option<SV> {
        let sv = self.sv.slice(line);
        if self.version.major < 3 {
            let prn = sv.parse::<u8>().ok()?;
            Some(SV::new(constellation, prn))
        } else {
            if !sv.is_ascii() || sv.len() < 2 {
                return None;
            }
            SV::from_str(sv).ok()
        }
    }

    /// Interprets ToC of an epoch line, in GPST
    pub fn parse_toc(&self, line: &str) -> Option<Epoch> {
        let [y, m, d, hh, mm, ss] = self.toc.map(|columns| columns.slice(line));
        let year = window_two_digit_year(y.parse::<i32>().ok()?);
        let seconds = ss.parse::<f64>().ok()?;
        gpst_epoch(
            year,
            m.parse::<u8>().ok()?,
            d.parse::<u8>().ok()?,
            hh.parse::<u8>().ok()?,
            mm.parse::<u8>().ok()?,
            seconds,
        )
    }

    /// Returns the value columns of a record, in order of appearance:
    /// clock terms of the epoch line first, then every continuation line.
    /// Blank columns read as empty strings.
    pub fn value_slots<'a, S: AsRef<str>>(
        &self,
        epoch_line: &'a str,
        continuation: &'a [S],
    ) -> Vec<&'a str> {
        let mut slots = self
            .clock_slots
            .iter()
            .map(|columns| columns.slice(epoch_line))
            .collect::<Vec<_>>();
        for line in continuation {
            slots.extend(self.orbit_slots.iter().map(|columns| columns.slice(line.as_ref())));
        }
        slots
    }
}
