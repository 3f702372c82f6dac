use chrono::NaiveDate;
use criterion::{Criterion, black_box, criterion_group, criterion_main};

use jeongsan::core::*;
use jeongsan::filing;

fn directory(locations: usize) -> EntityDirectory {
    let mut directory = EntityDirectory::new();
    for i in 0..locations {
        directory.insert(
            format!("숙소 {i}"),
            BusinessIdentity::new(
                format!("{:03}-11-{:05}", i % 8, i),
                format!("사업자 {}", i % 8),
                "대표자",
            ),
        );
    }
    directory
}

fn month_of_records(locations: usize) -> Vec<RawRecord> {
    let mut records = Vec::new();
    for day in 1..=30u32 {
        for i in 0..locations {
            records.push(RawRecord::new(
                NaiveDate::from_ymd_opt(2026, 6, day).unwrap(),
                format!("숙소 {i}"),
                ItemCounts {
                    blanket: (i as u32) % 4,
                    mat: (day + i as u32) % 3,
                    towel: 5,
                    ..ItemCounts::default()
                },
            ));
        }
    }
    records
}

fn bench_aggregate(c: &mut Criterion) {
    let directory = directory(50);
    let records = month_of_records(50);

    c.bench_function("aggregate_50_locations_30_days", |b| {
        b.iter(|| aggregate(black_box(records.clone()), &directory))
    });
}

fn bench_statements(c: &mut Criterion) {
    let directory = directory(50);
    let businesses = aggregate(month_of_records(50), &directory);
    let catalog = PriceCatalog::standard();
    let period = Period::new(2026, 6).unwrap();

    c.bench_function("build_statements", |b| {
        b.iter(|| {
            for business in businesses.values() {
                black_box(build_statement(business, period, &catalog));
            }
        })
    });

    c.bench_function("build_filing_sheet", |b| {
        b.iter(|| {
            let rows = filing::build_filing_rows(&businesses, period, &catalog);
            black_box(filing::to_sheet_csv(&rows))
        })
    });
}

criterion_group!(benches, bench_aggregate, bench_statements);
criterion_main!(benches);
