//! Benchmarking navigation file parsing & orbit propagation
extern crate criterion;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use brdc_orbits::prelude::{Duration, DuplicatePolicy, NavigationFile};

fn parsing(path: &str) -> NavigationFile {
    NavigationFile::from_file(path, None, DuplicatePolicy::default()).unwrap()
}

fn benchmark(c: &mut Criterion) {
    let mut parsing_grp = c.benchmark_group("parsing");

    parsing_grp.bench_function("NAV/V2", |b| {
        b.iter(|| {
            parsing("test_resources/NAV/V2/brdc1810.09n");
        })
    });

    parsing_grp.bench_function("NAV/V3", |b| {
        b.iter(|| {
            parsing("test_resources/NAV/V3/QZSS00JPN_R_20210780000_01D_JN.rnx");
        })
    });

    parsing_grp.finish();

    let nav = parsing("test_resources/NAV/V2/brdc1810.09n");

    // one position every 30s, over one hour, for each record
    let requests = nav
        .store
        .all_records()
        .flat_map(|record| {
            (0..120).map(move |i| (record.sv, record.toc + Duration::from_seconds(30.0 * i as f64)))
        })
        .collect::<Vec<_>>();

    let mut propagation_grp = c.benchmark_group("propagation");

    propagation_grp.bench_function("batch", |b| {
        b.iter(|| {
            black_box(nav.store.propagate_batch(&requests));
        })
    });

    #[cfg(feature = "parallel")]
    propagation_grp.bench_function("parallel batch", |b| {
        b.iter(|| {
            black_box(nav.store.par_propagate_batch(&requests));
        })
    });

    propagation_grp.finish();
}

criterion_group!(benches, benchmark);
criterion_main!(benches);
