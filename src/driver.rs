//! File path wiring: reads one navigation file, propagates every record
//! at its own time of clock and writes the positions in CSV format.
use itertools::Itertools;
use log::{info, warn};

use crate::{
    cfg::Config,
    error::Error,
    orbit::EcefPosition,
    NavigationFile,
};

use std::{
    fs::File,
    io::{BufWriter, Write},
};

/// CSV header line
pub const CSV_HEADER: &str = "sv,epoch,x,y,z";

/// [Summary] of one run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    /// Records stored
    pub records: usize,
    /// Records rejected while parsing
    pub skipped: usize,
    /// Positions written
    pub propagated: usize,
    /// Propagation failures
    pub failed: usize,
}

/// Formats one [EcefPosition] as a CSV line (without termination)
pub fn csv_line(position: &EcefPosition) -> String {
    [
        position.sv.to_string(),
        position.epoch.to_string(),
        format!("{:.3}", position.x),
        format!("{:.3}", position.y),
        format!("{:.3}", position.z),
    ]
    .iter()
    .join(",")
}

/// Runs the complete process described by [Config]
pub fn run(cfg: &Config) -> Result<Summary, Error> {
    let nav = NavigationFile::from_file(&cfg.input_path, cfg.constellation_filter, cfg.duplicates)?;

    let store = nav
        .store
        .with_fit_interval(cfg.fit_interval)
        .with_kepler_options(cfg.kepler);

    let mut summary = Summary {
        records: store.len(),
        skipped: nav.rejected.len(),
        ..Default::default()
    };

    let requests = store
        .all_records()
        .map(|record| (record.sv, record.toc))
        .collect::<Vec<_>>();

    #[cfg(feature = "parallel")]
    let results = store.par_propagate_batch(&requests);

    #[cfg(not(feature = "parallel"))]
    let results = store.propagate_batch(&requests);

    let mut writer = BufWriter::new(File::create(&cfg.output_path)?);
    writeln!(writer, "{}", CSV_HEADER)?;

    for ((sv, t), result) in requests.iter().zip(results.iter()) {
        match result {
            Ok(position) => {
                writeln!(writer, "{}", csv_line(position))?;
                summary.propagated += 1;
            },
            Err(e) => {
                warn!("{}({}): {}", sv, t, e);
                summary.failed += 1;
            },
        }
    }

    writer.flush()?;

    info!(
        "{}: {} records ({} skipped), {} positions, {} failures",
        cfg.input_path.display(),
        summary.records,
        summary.skipped,
        summary.propagated,
        summary.failed
    );

    Ok(summary)
}
