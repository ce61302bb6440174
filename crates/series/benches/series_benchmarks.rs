//! Benchmarks for perform-series operations.
#![allow(missing_docs)]

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use perform_primitives::{CompoundMethod, Frequency, Timestamp};
use perform_series::{TimeSeries, infer_freq};
use rand::Rng;

fn random_business_series(n: usize) -> TimeSeries {
    let mut rng = rand::thread_rng();
    let start = NaiveDate::from_ymd_opt(2000, 1, 3).unwrap();
    let index: Vec<Timestamp> = start
        .iter_days()
        .filter(|d| !matches!(d.weekday(), Weekday::Sat | Weekday::Sun))
        .take(n)
        .map(|d| d.and_time(NaiveTime::MIN))
        .collect();
    let values = (0..n).map(|_| rng.r#gen::<f64>() * 0.04 - 0.02).collect();
    TimeSeries::new("bench", index, values).unwrap()
}

fn bench_infer_freq(c: &mut Criterion) {
    let mut group = c.benchmark_group("infer_freq");

    for size in [252, 2520, 25200] {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let series = random_business_series(size);
            b.iter(|| infer_freq(black_box(series.index())).unwrap());
        });
    }

    group.finish();
}

fn bench_resample(c: &mut Criterion) {
    let mut group = c.benchmark_group("resample");

    for size in [252, 2520, 25200] {
        let series = random_business_series(size);
        group.throughput(Throughput::Elements(size as u64));
        for freq in [Frequency::Weekly, Frequency::Monthly, Frequency::Annual] {
            group.bench_with_input(
                BenchmarkId::new(freq.to_string(), size),
                &series,
                |b, series| {
                    b.iter(|| series.to_freq(black_box(freq), CompoundMethod::Geometric).unwrap());
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_infer_freq, bench_resample);

criterion_main!(benches);
