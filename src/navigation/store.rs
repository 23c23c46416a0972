use log::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::{
    constants::Constants,
    error::PropagationError,
    kepler::KeplerOptions,
    navigation::EphemerisRecord,
    orbit::EcefPosition,
    prelude::{Duration, Epoch, SV},
};

use std::collections::BTreeMap;

/// How to handle two records published for the same satellite
/// at the same time of clock
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DuplicatePolicy {
    /// Keep all records: lookups pick the closest one
    #[default]
    KeepAll,
    /// Latest record replaces the previous one
    Overwrite,
}

/// [EphemerisStore] holds the records of one navigation file, per satellite
/// and in chronological order. It is built once, then queried.
#[derive(Debug, Clone, PartialEq)]
pub struct EphemerisStore {
    records: BTreeMap<SV, Vec<EphemerisRecord>>,
    policy: DuplicatePolicy,
    fit_interval: Duration,
    kepler: KeplerOptions,
}

impl Default for EphemerisStore {
    fn default() -> Self {
        Self {
            records: BTreeMap::new(),
            policy: DuplicatePolicy::default(),
            fit_interval: Duration::from_seconds(Constants::FIT_INTERVAL),
            kepler: KeplerOptions::default(),
        }
    }
}

impl EphemerisStore {
    /// Builds a new empty [EphemerisStore]
    pub fn new(policy: DuplicatePolicy) -> Self {
        Self {
            policy,
            ..Default::default()
        }
    }

    /// Builds an [EphemerisStore] from a set of records
    pub fn from_records<I: IntoIterator<Item = EphemerisRecord>>(
        records: I,
        policy: DuplicatePolicy,
    ) -> Self {
        let mut s = Self::new(policy);
        for record in records {
            s.insert(record);
        }
        s
    }

    /// Returns [EphemerisStore] with desired validity window,
    /// on each side of ToE
    pub fn with_fit_interval(mut self, fit_interval: Duration) -> Self {
        self.fit_interval = fit_interval.abs();
        self
    }

    /// Returns [EphemerisStore] with desired [KeplerOptions]
    pub fn with_kepler_options(mut self, opts: KeplerOptions) -> Self {
        self.kepler = opts;
        self
    }

    /// Returns the validity window, on each side of ToE
    pub fn fit_interval(&self) -> Duration {
        self.fit_interval
    }

    /// Inserts a new record, preserving chronological order.
    /// Records sharing the same ToC keep their order of insertion.
    pub(crate) fn insert(&mut self, record: EphemerisRecord) {
        let list = self.records.entry(record.sv).or_default();
        if self.policy == DuplicatePolicy::Overwrite {
            if let Some(existing) = list.iter_mut().find(|r| r.toc == record.toc) {
                debug!("{}({}) overwritten", record.sv, record.toc);
                *existing = record;
                return;
            }
        }
        let index = list.partition_point(|r| r.toc <= record.toc);
        list.insert(index, record);
    }

    /// Returns total number of records
    pub fn len(&self) -> usize {
        self.records.values().map(|list| list.len()).sum()
    }

    /// Returns true if this store does not contain any record
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns [SV] iterator, in ascending order
    pub fn satellites(&self) -> impl Iterator<Item = SV> + '_ {
        self.records.keys().copied()
    }

    /// Returns records of this satellite, in chronological order
    pub fn records(&self, sv: SV) -> &[EphemerisRecord] {
        self.records.get(&sv).map(|list| list.as_slice()).unwrap_or(&[])
    }

    /// Returns all records, satellite per satellite, in chronological order
    pub fn all_records(&self) -> impl Iterator<Item = &EphemerisRecord> + '_ {
        self.records.values().flatten()
    }

    /// Selects the record whose ToE is the closest to `t`, within the fit interval.
    /// On equal distance, the earliest record is preferred.
    pub fn select(&self, sv: SV, t: Epoch) -> Option<&EphemerisRecord> {
        self.records(sv)
            .iter()
            .filter_map(|record| {
                let dt = (t - record.toe()?).abs();
                if dt <= self.fit_interval {
                    Some((record, dt))
                } else {
                    None
                }
            })
            .min_by_key(|(_, dt)| *dt)
            .map(|(record, _)| record)
    }

    /// Returns [EcefPosition] of `sv` at `t`
    pub fn propagate(&self, sv: SV, t: Epoch) -> Result<EcefPosition, PropagationError> {
        let record = self
            .select(sv, t)
            .ok_or(PropagationError::NoEphemeris { sv, epoch: t })?;
        record.position(t, &self.kepler)
    }

    /// Propagates a batch of (satellite, epoch) requests.
    /// Each request succeeds or fails on its own.
    pub fn propagate_batch(&self, requests: &[(SV, Epoch)]) -> Vec<Result<EcefPosition, PropagationError>> {
        requests
            .iter()
            .map(|(sv, t)| self.propagate(*sv, *t))
            .collect()
    }

    /// Propagates a batch of (satellite, epoch) requests over the rayon thread pool.
    /// Results are returned in order of request.
    #[cfg(feature = "parallel")]
    #[cfg_attr(docsrs, doc(cfg(feature = "parallel")))]
    pub fn par_propagate_batch(
        &self,
        requests: &[(SV, Epoch)],
    ) -> Vec<Result<EcefPosition, PropagationError>> {
        requests
            .par_iter()
            .map(|(sv, t)| self.propagate(*sv, *t))
            .collect()
    }
}
