//! Normalization performance benchmarks.
//!
//! Measures latest-observation selection and full normalization over large
//! indicator payloads.

use std::sync::Arc;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use epiglobe::models::RawIndicatorRecord;
use epiglobe::normalize::select_latest;
use epiglobe::{CountryReferenceTable, MockDiseaseApi, Normalizer};

const CODES: &[&str] = &[
    "USA", "FRA", "IND", "BRA", "ZAF", "NER", "TCD", "BFA", "CHN", "DEU", "GBR", "JPN", "KEN",
    "NGA", "MEX", "ARG", "AUS", "CAN", "EGY", "PER",
];

/// Synthetic WHO payload: every country across many years plus regional rows.
fn generate_records(count: usize) -> Vec<RawIndicatorRecord> {
    (0..count)
        .map(|i| {
            let code = CODES[i % CODES.len()];
            let year = 1990 + (i / CODES.len()) as i64 % 35;
            if i % 7 == 0 {
                RawIndicatorRecord::spatial("REGION", "AFR", year, Some(i as f64))
            } else {
                RawIndicatorRecord::country(code, year, Some((i % 1000) as f64))
            }
        })
        .collect()
}

fn bench_select_latest(c: &mut Criterion) {
    let mut group = c.benchmark_group("select_latest");

    for size in [1_000, 10_000, 100_000].iter() {
        let records = generate_records(*size);
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("records", size), &records, |b, records| {
            b.iter(|| select_latest(black_box(records)));
        });
    }

    group.finish();
}

fn bench_normalize(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().expect("Failed to build runtime");
    let mut group = c.benchmark_group("normalize");

    for size in [1_000, 10_000].iter() {
        let records = generate_records(*size);
        let table = Arc::new(CountryReferenceTable::new(Arc::new(MockDiseaseApi::sample())));
        runtime.block_on(table.initialize());
        let normalizer = Normalizer::new(table);

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("records", size), &records, |b, records| {
            b.iter(|| runtime.block_on(normalizer.normalize(black_box(records))));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_select_latest, bench_normalize);
criterion_main!(benches);
