use chrono::{Month, NaiveDate};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use tempora::{
    CalendarPeriodCollector, DayRange, DaySeeker, Period, RelationFilter, SeekDirection,
    TimeRange,
};

fn start_day() -> DayRange {
    DayRange::new(NaiveDate::from_ymd_opt(2020, 1, 10).unwrap()).unwrap()
}

fn bench_day_seek(c: &mut Criterion) {
    let mut group = c.benchmark_group("day_seek");

    let plain = DaySeeker::new(RelationFilter::new(), SeekDirection::Forward);
    let working = DaySeeker::new(RelationFilter::new().working_days(), SeekDirection::Forward);
    let start = start_day();

    for offset in [1i64, 30, 365, 3650].iter() {
        group.throughput(Throughput::Elements(*offset as u64));

        group.bench_with_input(BenchmarkId::new("all_days", offset), offset, |b, &n| {
            b.iter(|| plain.find(black_box(&start), n).unwrap());
        });

        group.bench_with_input(BenchmarkId::new("working_days", offset), offset, |b, &n| {
            b.iter(|| working.find(black_box(&start), n).unwrap());
        });

        group.bench_with_input(BenchmarkId::new("backward", offset), offset, |b, &n| {
            b.iter(|| working.find(black_box(&start), -n).unwrap());
        });
    }

    group.finish();
}

fn bench_pruned_seek(c: &mut Criterion) {
    let mut group = c.benchmark_group("pruned_seek");

    // Only one month a year survives the gates
    let seeker = DaySeeker::new(
        RelationFilter::new().with_months([Month::February]).with_days([29]),
        SeekDirection::Forward,
    );
    let start = start_day();

    group.bench_function("leap_days_x10", |b| {
        b.iter(|| seeker.find(black_box(&start), 10).unwrap());
    });

    group.finish();
}

fn bench_collect(c: &mut Criterion) {
    let mut group = c.benchmark_group("collect");

    let collector =
        CalendarPeriodCollector::new(RelationFilter::new().working_days(), SeekDirection::Forward);
    for years in [1i64, 10].iter() {
        let start = start_day().start();
        let range = TimeRange::with_duration(start, chrono::TimeDelta::days(365 * years)).unwrap();
        group.bench_with_input(BenchmarkId::new("working_days", years), &range, |b, range| {
            b.iter(|| collector.collect_days(black_box(range)).unwrap());
        });
    }

    group.bench_function("hours_of_month", |b| {
        let range = TimeRange::with_duration(start_day().start(), chrono::TimeDelta::days(31)).unwrap();
        b.iter(|| collector.collect_hours(black_box(&range)).unwrap());
    });

    group.finish();
}

criterion_group!(benches, bench_day_seek, bench_pruned_seek, bench_collect);
criterion_main!(benches);
