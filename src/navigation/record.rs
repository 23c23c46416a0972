use crate::{
    error::PropagationError,
    gnss_time::{from_week_seconds, normalize_tk, week_seconds},
    layout::Field,
    prelude::{Duration, Epoch, SV},
};

use std::collections::BTreeMap;

/// [EphemerisRecord] is one broadcast navigation message,
/// for one satellite, published at one time of clock.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EphemerisRecord {
    /// Satellite
    pub sv: SV,
    /// Time of clock, in GPST
    pub toc: Epoch,
    /// Named fields, as described by the revision layout.
    /// A field that failed numeric conversion is absent,
    /// it is never coerced to zero.
    pub orbits: BTreeMap<Field, f64>,
}

impl EphemerisRecord {
    /// Builds a new empty [EphemerisRecord]
    pub fn new(sv: SV, toc: Epoch) -> Self {
        Self {
            sv,
            toc,
            orbits: BTreeMap::new(),
        }
    }

    /// Returns given field, if it exists
    pub fn get(&self, field: Field) -> Option<f64> {
        self.orbits.get(&field).copied()
    }

    /// Returns given field, or [PropagationError::MissingParameter]
    pub(crate) fn require(&self, field: Field) -> Result<f64, PropagationError> {
        self.get(field)
            .ok_or(PropagationError::MissingParameter(field))
    }

    /// Defines (or overwrites) given field
    pub(crate) fn set(&mut self, field: Field, value: f64) {
        self.orbits.insert(field, value);
    }

    /// Copies and returns [EphemerisRecord] with desired field
    pub fn with_field(&self, field: Field, value: f64) -> Self {
        let mut s = self.clone();
        s.set(field, value);
        s
    }

    /// Returns SV onboard clock (bias [s], drift [s/s], drift rate [s/s²]).
    pub fn sv_clock(&self) -> Option<(f64, f64, f64)> {
        Some((
            self.get(Field::ClockBias)?,
            self.get(Field::ClockDrift)?,
            self.get(Field::ClockDriftRate)?,
        ))
    }

    /// Returns the broadcast SV clock offset at `t`,
    /// evaluated from the clock polynomial referenced to ToC.
    /// Relativistic and group delay terms are not included.
    pub fn clock_correction(&self, t: Epoch) -> Option<Duration> {
        let (a0, a1, a2) = self.sv_clock()?;
        let dt = normalize_tk((t - self.toc).to_seconds());
        Some(Duration::from_seconds(a0 + a1 * dt + a2 * dt.powi(2)))
    }

    /// Returns TGD (if value exists) as [Duration]
    pub fn tgd(&self) -> Option<Duration> {
        let tgd_s = self.get(Field::Tgd)?;
        Some(Duration::from_seconds(tgd_s))
    }

    /// Returns the continuous GPS week counter, if it exists
    pub fn week(&self) -> Option<i64> {
        let week = self.get(Field::GpsWeek)?;
        if week >= 0.0 {
            Some(week.round() as i64)
        } else {
            None
        }
    }

    /// Returns ToE expressed as [Epoch] in GPST.
    /// When the week counter is not known, ToE is resolved
    /// to the week of ToC.
    pub fn toe(&self) -> Option<Epoch> {
        let toe = self.get(Field::Toe)?;
        match self.week() {
            Some(week) => Some(from_week_seconds(week, toe)),
            None => {
                let (_, toc_sow) = week_seconds(self.toc);
                Some(self.toc + Duration::from_seconds(normalize_tk(toe - toc_sow)))
            },
        }
    }

    /// Returns true if `t` lies within `fit_interval` of ToE (inclusive).
    pub fn is_valid(&self, t: Epoch, fit_interval: Duration) -> bool {
        match self.toe() {
            Some(toe) => (t - toe).abs() <= fit_interval,
            None => false,
        }
    }
}
